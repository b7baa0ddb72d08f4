//! Database migrations for the identity seeder.
//!
//! Creates the roles, users and role_mappings tables using SeaORM Migration.

pub use sea_orm_migration::prelude::*;

mod m2026_10_01_000100_create_roles;
mod m2026_10_01_000200_create_users;
mod m2026_10_01_000300_create_role_mappings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2026_10_01_000100_create_roles::Migration),
            Box::new(m2026_10_01_000200_create_users::Migration),
            Box::new(m2026_10_01_000300_create_role_mappings::Migration),
        ]
    }
}
