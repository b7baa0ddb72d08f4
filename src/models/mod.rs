//! # Data Models
//!
//! SeaORM entities for the identity tables populated by the seeder.

pub mod role;
pub mod role_mapping;
pub mod user;

pub use role::Entity as Role;
pub use role_mapping::{Entity as RoleMapping, PrincipalType};
pub use user::Entity as User;
