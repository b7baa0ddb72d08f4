//! # Identity Seeder
//!
//! Seeds users, roles and role mappings into a SeaORM-backed database at
//! application startup from a static seed configuration.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod repositories;
pub mod seeds;
pub mod telemetry;
pub use migration;
