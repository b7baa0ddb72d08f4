//! # Seeder Entry Point
//!
//! Loads configuration, connects to the database, applies migrations and
//! seeds users, roles and role mappings from the configured seed file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use seeder::{
    config::ConfigLoader,
    db,
    seeds::{SeedConfig, seed_database},
    telemetry,
};

/// Seed users, roles and role mappings from a JSON seed file.
#[derive(Debug, Parser)]
#[command(name = "seeder", version, about)]
struct Cli {
    /// Seed file to load instead of the configured `SEEDER_SEED_FILE`
    #[arg(long, value_name = "PATH")]
    seed_file: Option<PathBuf>,

    /// Replace existing users and roles with the seeded content
    #[arg(long, conflicts_with = "no_overwrite")]
    overwrite: bool,

    /// Keep existing users and roles even if the seed file asks to overwrite
    #[arg(long)]
    no_overwrite: bool,

    /// Do not apply pending migrations before seeding
    #[arg(long)]
    skip_migrations: bool,
}

impl Cli {
    /// Overwrite choice made on the command line, if any.
    fn overwrite_flag(&self) -> Option<bool> {
        match (self.overwrite, self.no_overwrite) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::new()
        .load()
        .context("loading configuration")?;
    telemetry::init_tracing(&config).context("initializing telemetry")?;

    log::info!("Loaded configuration for profile: {}", config.profile);
    if let Ok(redacted_json) = config.redacted_json() {
        log::debug!("Configuration: {}", redacted_json);
    }

    let seed_path = cli
        .seed_file
        .clone()
        .unwrap_or_else(|| config.seed_file.clone());
    let mut seed_config = SeedConfig::from_path(&seed_path)
        .with_context(|| format!("loading seed file {}", seed_path.display()))?;
    seed_config.overwrite = cli
        .overwrite_flag()
        .or(config.seed_overwrite)
        .unwrap_or(seed_config.overwrite);

    let db = db::init_pool(&config)
        .await
        .context("initializing database connection pool")?;
    db::health_check(&db).await?;

    if config.run_migrations && !cli.skip_migrations {
        db::migrate(&db).await?;
    }

    let outcome = seed_database(&db, &seed_config)
        .await
        .context("seeding identities")?;

    log::info!(
        "Seeding complete: {} role(s), {} user(s), {} role mapping(s)",
        outcome.roles.len(),
        outcome.users.len(),
        outcome.created_mappings()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overwrite_flags_force_either_way() {
        let cli = Cli::try_parse_from(["seeder", "--overwrite"]).unwrap();
        assert_eq!(cli.overwrite_flag(), Some(true));

        let cli = Cli::try_parse_from(["seeder", "--no-overwrite"]).unwrap();
        assert_eq!(cli.overwrite_flag(), Some(false));

        let cli = Cli::try_parse_from(["seeder"]).unwrap();
        assert_eq!(cli.overwrite_flag(), None);
    }

    #[test]
    fn conflicting_overwrite_flags_are_rejected() {
        assert!(Cli::try_parse_from(["seeder", "--overwrite", "--no-overwrite"]).is_err());
    }
}
