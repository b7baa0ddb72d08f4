//! Typed model registry.
//!
//! Stores are registered by name per model kind. Seeding resolves the three
//! stores it needs once, before any write is issued.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::config::{RoleSeed, SeedConfig, UserSeed};
use crate::error::SeedError;
use crate::models::{role, user};
use crate::repositories::{
    PrincipalStore, RoleMappingRepository, RoleRepository, SeedStore, UserRepository,
};

pub const DEFAULT_USER_MODEL: &str = "User";
pub const DEFAULT_ROLE_MODEL: &str = "Role";
pub const DEFAULT_ROLE_MAPPING_MODEL: &str = "RoleMapping";

/// Store seeding users.
pub type UserStore = dyn SeedStore<Seed = UserSeed, Record = user::Model>;
/// Store seeding roles.
pub type RoleStore = dyn SeedStore<Seed = RoleSeed, Record = role::Model>;

/// The model kinds a seed configuration addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    User,
    Role,
    RoleMapping,
}

impl ModelKind {
    /// Name the model is registered under unless overridden.
    pub fn default_model_name(&self) -> &'static str {
        match self {
            ModelKind::User => DEFAULT_USER_MODEL,
            ModelKind::Role => DEFAULT_ROLE_MODEL,
            ModelKind::RoleMapping => DEFAULT_ROLE_MAPPING_MODEL,
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_model_name())
    }
}

/// The stores one seeding run writes to.
#[derive(Clone)]
pub struct ResolvedModels {
    pub user: Arc<UserStore>,
    pub role: Arc<RoleStore>,
    pub role_mapping: Arc<dyn PrincipalStore>,
}

/// Named stores per model kind.
#[derive(Clone, Default)]
pub struct ModelRegistry {
    users: HashMap<String, Arc<UserStore>>,
    roles: HashMap<String, Arc<RoleStore>>,
    role_mappings: HashMap<String, Arc<dyn PrincipalStore>>,
}

impl ModelRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the SeaORM repositories under the conventional names.
    pub fn with_database(db: Arc<DatabaseConnection>) -> Self {
        let mut registry = Self::new();
        registry.register_user_model(
            DEFAULT_USER_MODEL,
            Arc::new(UserRepository::new(Arc::clone(&db))),
        );
        registry.register_role_model(
            DEFAULT_ROLE_MODEL,
            Arc::new(RoleRepository::new(Arc::clone(&db))),
        );
        registry.register_role_mapping_model(
            DEFAULT_ROLE_MAPPING_MODEL,
            Arc::new(RoleMappingRepository::new(db)),
        );
        registry
    }

    pub fn register_user_model(&mut self, name: impl Into<String>, store: Arc<UserStore>) {
        self.users.insert(name.into(), store);
    }

    pub fn register_role_model(&mut self, name: impl Into<String>, store: Arc<RoleStore>) {
        self.roles.insert(name.into(), store);
    }

    pub fn register_role_mapping_model(
        &mut self,
        name: impl Into<String>,
        store: Arc<dyn PrincipalStore>,
    ) {
        self.role_mappings.insert(name.into(), store);
    }

    /// Looks up the stores named by `config`, falling back to the
    /// conventional names for kinds without an override.
    pub fn resolve(&self, config: &SeedConfig) -> Result<ResolvedModels, SeedError> {
        Ok(ResolvedModels {
            user: lookup(&self.users, ModelKind::User, config)?,
            role: lookup(&self.roles, ModelKind::Role, config)?,
            role_mapping: lookup(&self.role_mappings, ModelKind::RoleMapping, config)?,
        })
    }
}

fn lookup<T: ?Sized>(
    stores: &HashMap<String, Arc<T>>,
    kind: ModelKind,
    config: &SeedConfig,
) -> Result<Arc<T>, SeedError> {
    let name = config
        .model_override(kind)
        .unwrap_or_else(|| kind.default_model_name());

    stores
        .get(name)
        .cloned()
        .ok_or_else(|| SeedError::UnknownModel {
            kind,
            name: name.to_string(),
        })
}
