//! # Repository Layer
//!
//! Repositories encapsulate SeaORM operations for the identity tables. The
//! [`SeedStore`] and [`PrincipalStore`] traits are the seams the seeding
//! pipeline writes through, so any backing store can be registered.

use async_trait::async_trait;
use sea_orm::DbErr;

use crate::models::PrincipalType;
use crate::models::role::Model as RoleModel;
use crate::models::role_mapping::Model as RoleMappingModel;
use crate::seeds::config::SeedKey;

pub mod role;
pub mod role_mapping;
pub mod user;

pub use role::RoleRepository;
pub use role_mapping::RoleMappingRepository;
pub use user::UserRepository;

/// A model that can be seeded from records keyed by a unique name.
#[async_trait]
pub trait SeedStore: Send + Sync {
    /// Seed record accepted by this store
    type Seed: SeedKey + Send + Sync;
    /// Persisted record returned by this store
    type Record: Send;

    /// Returns the record whose key matches `seed`, creating it from `seed`
    /// when absent. The flag is `true` when a new record was created.
    async fn find_or_create(&self, seed: &Self::Seed) -> Result<(Self::Record, bool), DbErr>;

    /// Creates the record, or replaces the content of the one with the same key.
    async fn upsert(&self, seed: &Self::Seed) -> Result<Self::Record, DbErr>;
}

/// A model that grants roles to principals.
#[async_trait]
pub trait PrincipalStore: Send + Sync {
    /// Creates an association granting `role` to the given principal.
    async fn create_principal(
        &self,
        role: &RoleModel,
        principal_type: PrincipalType,
        principal_id: &str,
    ) -> Result<RoleMappingModel, DbErr>;
}
