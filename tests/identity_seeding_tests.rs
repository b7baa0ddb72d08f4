//! End-to-end seeding against an in-memory SQLite database.

use anyhow::Result;
use seeder::models::PrincipalType;
use seeder::repositories::{RoleMappingRepository, RoleRepository, UserRepository};
use seeder::seeds::{
    MappingSeed, ModelSeed, RoleSeed, SeedConfig, UserSeed, seed_database,
};
use std::sync::Arc;

#[path = "test_utils/mod.rs"]
mod test_utils;
use test_utils::setup_test_db;

fn alice_admin_config() -> SeedConfig {
    SeedConfig::from_json_str(
        r#"{
            "Role": { "data": [{ "name": "admin", "description": "Administrators" }] },
            "User": { "data": [{ "name": "alice", "email": "alice@example.com" }] },
            "RoleMapping": { "data": [{ "user": "alice", "role": "admin" }] }
        }"#,
    )
    .expect("valid seed document")
}

#[tokio::test]
async fn seeds_single_mapping_for_alice_as_admin() -> Result<()> {
    let db = setup_test_db().await?;

    let outcome = seed_database(&db, &alice_admin_config()).await?;
    assert_eq!(outcome.created_mappings(), 1);

    let db = Arc::new(db);
    let admin = RoleRepository::new(db.clone())
        .find_by_name("admin")
        .await?
        .expect("admin role seeded");
    let alice = UserRepository::new(db.clone())
        .find_by_username("alice")
        .await?
        .expect("alice seeded");
    assert_eq!(alice.email.as_deref(), Some("alice@example.com"));

    let mappings = RoleMappingRepository::new(db.clone())
        .find_by_role(admin.id)
        .await?;
    assert_eq!(mappings.len(), 1);
    assert_eq!(mappings[0].principal_type, PrincipalType::User.as_str());
    assert_eq!(mappings[0].principal_id, alice.id.to_string());
    Ok(())
}

#[tokio::test]
async fn reseeding_without_overwrite_keeps_records() -> Result<()> {
    let db = setup_test_db().await?;
    let config = SeedConfig {
        role_mapping: None,
        ..alice_admin_config()
    };

    let first = seed_database(&db, &config).await?;

    let mut changed = config.clone();
    changed.role = Some(ModelSeed::new(vec![
        RoleSeed::new("admin").with_description("Changed"),
    ]));
    let second = seed_database(&db, &changed).await?;

    assert_eq!(first.roles, second.roles);
    assert_eq!(first.users, second.users);
    assert_eq!(second.roles[0].description.as_deref(), Some("Administrators"));

    let roles = RoleRepository::new(Arc::new(db)).find_all().await?;
    assert_eq!(roles.len(), 1);
    Ok(())
}

#[tokio::test]
async fn reseeding_with_overwrite_applies_latest_content() -> Result<()> {
    let db = setup_test_db().await?;
    seed_database(&db, &alice_admin_config()).await?;

    let config = SeedConfig {
        overwrite: true,
        role: Some(ModelSeed::new(vec![
            RoleSeed::new("admin").with_description("Superusers"),
        ])),
        user: Some(ModelSeed::new(vec![
            UserSeed::new("alice").with_email("alice@corp.example"),
        ])),
        role_mapping: None,
    };
    let outcome = seed_database(&db, &config).await?;

    assert_eq!(outcome.roles[0].description.as_deref(), Some("Superusers"));
    assert_eq!(
        outcome.users[0].email.as_deref(),
        Some("alice@corp.example")
    );

    let db = Arc::new(db);
    assert_eq!(RoleRepository::new(db.clone()).find_all().await?.len(), 1);
    let users = UserRepository::new(db.clone()).find_all().await?;
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, outcome.users[0].id);
    Ok(())
}

#[tokio::test]
async fn mappings_for_unseeded_names_are_skipped() -> Result<()> {
    let db = setup_test_db().await?;
    let mut config = alice_admin_config();
    config.role_mapping = Some(ModelSeed::new(vec![
        MappingSeed::new("bob", "admin"),
        MappingSeed::new("alice", "admin"),
        MappingSeed::new("alice", "auditor"),
    ]));

    let outcome = seed_database(&db, &config).await?;

    assert_eq!(outcome.mappings.len(), 3);
    assert!(outcome.mappings[0].is_none());
    assert!(outcome.mappings[1].is_some());
    assert!(outcome.mappings[2].is_none());

    let all = RoleMappingRepository::new(Arc::new(db)).find_all().await?;
    assert_eq!(all.len(), 1);
    Ok(())
}

#[tokio::test]
async fn mappings_without_users_or_roles_are_a_noop() -> Result<()> {
    let db = setup_test_db().await?;
    let config = SeedConfig::from_json_str(
        r#"{
            "Role": { "data": [] },
            "User": { "data": [] },
            "RoleMapping": { "data": [{ "user": "alice", "role": "admin" }] }
        }"#,
    )?;

    let outcome = seed_database(&db, &config).await?;

    assert!(outcome.mappings.is_empty());
    let all = RoleMappingRepository::new(Arc::new(db)).find_all().await?;
    assert!(all.is_empty());
    Ok(())
}

#[tokio::test]
async fn duplicate_seed_names_resolve_to_one_row() -> Result<()> {
    let db = setup_test_db().await?;
    let config = SeedConfig {
        role: Some(ModelSeed::new(vec![
            RoleSeed::new("admin"),
            RoleSeed::new("admin"),
            RoleSeed::new("editor"),
        ])),
        ..Default::default()
    };

    let outcome = seed_database(&db, &config).await?;

    assert_eq!(outcome.roles.len(), 3);
    assert_eq!(outcome.roles[0].id, outcome.roles[1].id);
    assert_eq!(RoleRepository::new(Arc::new(db)).find_all().await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn example_seed_file_seeds_cleanly() -> Result<()> {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("seed.example.json");
    let config = SeedConfig::from_path(path)?;
    let db = setup_test_db().await?;

    let outcome = seed_database(&db, &config).await?;

    assert_eq!(outcome.roles.len(), 2);
    assert_eq!(outcome.users.len(), 2);
    assert_eq!(outcome.created_mappings(), 2);
    Ok(())
}
