//! Database seeding functionality
//!
//! Seeds users, roles and the role mappings linking them from a
//! [`SeedConfig`]. Roles are written first, then users, then the mappings,
//! since a mapping needs both of its sides to exist. Writes within a stage
//! run concurrently; stages run one after another.

use std::sync::Arc;

use sea_orm::{DatabaseConnection, DbErr};
use tokio::task::JoinSet;

use crate::error::SeedError;
use crate::models::{role, role_mapping, user};

pub mod batch;
pub mod config;
pub mod mapping;
pub mod registry;


pub use batch::add_update_model;
pub use config::{MappingSeed, ModelSeed, RoleSeed, SeedConfig, SeedConfigError, UserSeed};
pub use mapping::add_role_mapping;
pub use registry::{ModelKind, ModelRegistry, ResolvedModels};

/// Records produced by one seeding run.
#[derive(Debug, Clone, Default)]
pub struct SeedOutcome {
    /// Roles in seed order
    pub roles: Vec<role::Model>,
    /// Users in seed order
    pub users: Vec<user::Model>,
    /// One entry per configured mapping; `None` where the pair was skipped
    pub mappings: Vec<Option<role_mapping::Model>>,
}

impl SeedOutcome {
    /// Number of role mappings actually created.
    pub fn created_mappings(&self) -> usize {
        self.mappings.iter().flatten().count()
    }
}

/// Seeds roles, users and role mappings through the stores `registry`
/// resolves for `config`.
///
/// The first failure ends the run and is returned as is; records written
/// before it are kept.
pub async fn seed_identities(
    registry: &ModelRegistry,
    config: &SeedConfig,
) -> Result<SeedOutcome, SeedError> {
    let models = registry.resolve(config)?;

    let roles = add_update_model(models.role, config.role_data(), config.overwrite).await?;
    tracing::info!(count = roles.len(), "Seeded roles");

    let users = add_update_model(models.user, config.user_data(), config.overwrite).await?;
    tracing::info!(count = users.len(), "Seeded users");

    let mappings =
        add_role_mapping(models.role_mapping, config.mapping_data(), &users, &roles).await?;

    let outcome = SeedOutcome {
        roles,
        users,
        mappings,
    };
    tracing::info!(
        created = outcome.created_mappings(),
        requested = config.mapping_data().len(),
        "Seeded role mappings"
    );

    Ok(outcome)
}

/// Seeds the SeaORM tables of `db` from `config`.
pub async fn seed_database(
    db: &DatabaseConnection,
    config: &SeedConfig,
) -> Result<SeedOutcome, SeedError> {
    let registry = ModelRegistry::with_database(Arc::new(db.clone()));
    seed_identities(&registry, config).await
}

/// Joins indexed write tasks, placing each result in the slot of its index.
///
/// Returns on the first failure; dropping the set aborts the remaining tasks.
pub(crate) async fn join_indexed<T>(
    mut tasks: JoinSet<Result<(usize, T), DbErr>>,
    len: usize,
) -> Result<Vec<Option<T>>, SeedError>
where
    T: Send + 'static,
{
    let mut slots: Vec<Option<T>> = std::iter::repeat_with(|| None).take(len).collect();

    while let Some(joined) = tasks.join_next().await {
        let (index, value) = joined??;
        slots[index] = Some(value);
    }

    Ok(slots)
}
