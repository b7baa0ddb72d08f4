//! Linking seeded users to seeded roles.

use std::sync::Arc;

use sea_orm::DbErr;
use tokio::task::JoinSet;

use super::config::MappingSeed;
use super::join_indexed;
use crate::error::SeedError;
use crate::models::{PrincipalType, role, role_mapping, user};
use crate::repositories::PrincipalStore;

/// Grants roles to users for every `{user, role}` pair in `mappings`.
///
/// Both names are looked up only in `users` and `roles`, the records the
/// current run produced. A pair whose user or role is missing yields `None`
/// and no write. The result holds one entry per pair in input order, and is
/// empty when any of the three inputs is empty.
pub async fn add_role_mapping<P>(
    store: Arc<P>,
    mappings: &[MappingSeed],
    users: &[user::Model],
    roles: &[role::Model],
) -> Result<Vec<Option<role_mapping::Model>>, SeedError>
where
    P: PrincipalStore + ?Sized + 'static,
{
    if mappings.is_empty() || users.is_empty() || roles.is_empty() {
        return Ok(Vec::new());
    }

    let mut tasks = JoinSet::new();
    for (index, mapping) in mappings.iter().enumerate() {
        let user = users.iter().find(|user| user.username == mapping.user);
        let role = roles.iter().find(|role| role.name == mapping.role);

        let (Some(user), Some(role)) = (user, role) else {
            log::debug!(
                "Skipping role mapping '{}' -> '{}': user or role not seeded",
                mapping.user,
                mapping.role
            );
            continue;
        };

        let store = Arc::clone(&store);
        let role = role.clone();
        let principal_id = user.id.to_string();
        tasks.spawn(async move {
            let created = store
                .create_principal(&role, PrincipalType::User, &principal_id)
                .await?;
            Ok::<_, DbErr>((index, created))
        });
    }

    join_indexed(tasks, mappings.len()).await
}
