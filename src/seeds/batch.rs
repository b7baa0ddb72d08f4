//! Batch upserts of seed records.

use std::sync::Arc;

use sea_orm::DbErr;
use tokio::task::JoinSet;

use super::join_indexed;
use crate::error::SeedError;
use crate::repositories::SeedStore;
use crate::seeds::config::SeedKey;

/// Writes every record of `records` through `store` concurrently.
///
/// With `overwrite` each record is upserted, replacing the stored content.
/// Otherwise each record is found by its key or created when absent. The
/// returned records follow the order of `records`. The first failing write
/// is returned and the writes still in flight are aborted; writes that
/// already completed stay in place.
pub async fn add_update_model<S>(
    store: Arc<S>,
    records: &[S::Seed],
    overwrite: bool,
) -> Result<Vec<S::Record>, SeedError>
where
    S: SeedStore + ?Sized + 'static,
    S::Seed: Clone + 'static,
    S::Record: 'static,
{
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let mut tasks = JoinSet::new();
    for (index, seed) in records.iter().cloned().enumerate() {
        let store = Arc::clone(&store);
        tasks.spawn(async move {
            let record = if overwrite {
                let record = store.upsert(&seed).await?;
                log::debug!("Upserted seed record '{}'", seed.key());
                record
            } else {
                let (record, created) = store.find_or_create(&seed).await?;
                if created {
                    log::debug!("Created seed record '{}'", seed.key());
                } else {
                    log::debug!("Seed record '{}' already exists, keeping it", seed.key());
                }
                record
            };
            Ok::<_, DbErr>((index, record))
        });
    }

    let slots = join_indexed(tasks, records.len()).await?;
    Ok(slots.into_iter().flatten().collect())
}
