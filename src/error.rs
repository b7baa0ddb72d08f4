//! # Error Handling
//!
//! Errors surfaced by the seeding pipeline. Store failures are carried as the
//! original [`sea_orm::DbErr`] so callers see exactly what the database said.

use thiserror::Error;

use crate::seeds::registry::ModelKind;

/// Errors that abort a seeding run.
#[derive(Debug, Error)]
pub enum SeedError {
    /// A write or read against the backing store failed.
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    /// The seed configuration names a model that is not registered.
    #[error("no {kind} model registered under '{name}'")]
    UnknownModel { kind: ModelKind, name: String },

    /// A spawned write task panicked or was cancelled.
    #[error("seed write task did not complete: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl SeedError {
    /// Returns the underlying database error, if this is one.
    pub fn as_db_err(&self) -> Option<&sea_orm::DbErr> {
        match self {
            SeedError::Database(err) => Some(err),
            _ => None,
        }
    }
}

/// Whether the error is a unique constraint violation on any supported backend.
pub fn is_unique_violation(error: &sea_orm::DbErr) -> bool {
    use sea_orm::RuntimeErr;

    const PG_UNIQUE: &str = "23505";
    const MYSQL_DUPLICATE_CODES: &[&str] = &["1022", "1062", "1169", "1586"];
    const SQLITE_DUPLICATE_CODES: &[&str] = &["1555", "2067"];

    let runtime_err = match error {
        sea_orm::DbErr::Query(RuntimeErr::SqlxError(sqlx_err))
        | sea_orm::DbErr::Exec(RuntimeErr::SqlxError(sqlx_err)) => sqlx_err,
        _ => return false,
    };

    let Some(db_error) = runtime_err.as_database_error() else {
        return false;
    };

    if db_error.is_unique_violation() {
        return true;
    }

    db_error.code().is_some_and(|code| {
        let code_str = code.as_ref();
        code_str == PG_UNIQUE
            || MYSQL_DUPLICATE_CODES.contains(&code_str)
            || SQLITE_DUPLICATE_CODES.contains(&code_str)
    })
}
