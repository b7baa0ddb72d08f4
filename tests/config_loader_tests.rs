use seeder::config::{ConfigError, ConfigLoader};
use std::{
    env, fs,
    path::PathBuf,
    sync::{Mutex, MutexGuard, OnceLock},
};
use tempfile::TempDir;

fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

fn env_guard() -> MutexGuard<'static, ()> {
    env_lock()
        .lock()
        .unwrap_or_else(|poison| poison.into_inner())
}

fn clear_env() {
    unsafe {
        env::remove_var("SEEDER_PROFILE");
        env::remove_var("SEEDER_DATABASE_URL");
        env::remove_var("SEEDER_LOG_LEVEL");
        env::remove_var("SEEDER_SEED_FILE");
        env::remove_var("SEEDER_SEED_OVERWRITE");
        env::remove_var("SEEDER_RUN_MIGRATIONS");
        env::remove_var("SEEDER_DB_MAX_CONNECTIONS");
        env::remove_var("SEEDER_DB_ACQUIRE_TIMEOUT_MS");
    }
}

fn write_env_file(dir: &TempDir, name: &str, contents: &str) {
    let path = dir.path().join(name);
    fs::write(path, contents).unwrap();
}

#[test]
fn loads_defaults_when_no_env_present() {
    let _guard = env_guard();
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let cfg = loader.load().expect("config loads with defaults");

    assert_eq!(cfg.profile, "local");
    assert_eq!(cfg.database_url, "sqlite::memory:");
    assert_eq!(cfg.seed_file, PathBuf::from("seed.json"));
    assert_eq!(cfg.seed_overwrite, None);
    assert!(cfg.run_migrations);
    clear_env();
}

#[test]
fn layered_env_files_apply_in_order() {
    let _guard = env_guard();
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    write_env_file(&temp_dir, ".env", "SEEDER_SEED_FILE=base.json\n");
    write_env_file(&temp_dir, ".env.test", "SEEDER_SEED_FILE=profile.json\n");
    write_env_file(
        &temp_dir,
        ".env.test.local",
        "SEEDER_SEED_FILE=profile-local.json\nSEEDER_SEED_OVERWRITE=yes\n",
    );

    // Select profile via .env.local before profile-specific files load.
    write_env_file(
        &temp_dir,
        ".env.local",
        "SEEDER_PROFILE=test\nSEEDER_SEED_FILE=local.json\nSEEDER_RUN_MIGRATIONS=false\n",
    );

    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let cfg = loader.load().expect("config loads with layered env files");

    assert_eq!(cfg.profile, "test");
    assert_eq!(cfg.seed_file, PathBuf::from("profile-local.json"));
    assert_eq!(cfg.seed_overwrite, Some(true));
    assert!(!cfg.run_migrations);
    clear_env();
}

#[test]
fn os_environment_has_highest_precedence() {
    let _guard = env_guard();
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    write_env_file(
        &temp_dir,
        ".env",
        "SEEDER_DATABASE_URL=postgres://seed:pw@localhost/app\nSEEDER_LOG_LEVEL=debug\n",
    );

    unsafe {
        env::set_var("SEEDER_DATABASE_URL", "sqlite::memory:");
    }

    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let cfg = loader.load().expect("config loads with env override");
    assert_eq!(cfg.database_url, "sqlite::memory:");
    assert_eq!(cfg.log_level, "debug");

    clear_env();
}

#[test]
fn zero_max_connections_is_rejected() {
    let _guard = env_guard();
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    write_env_file(&temp_dir, ".env", "SEEDER_DB_MAX_CONNECTIONS=0\n");

    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let err = loader.load().expect_err("zero connections should fail");
    assert!(matches!(err, ConfigError::InvalidMaxConnections { value: 0 }));

    clear_env();
}

#[test]
fn non_numeric_max_connections_is_rejected() {
    let _guard = env_guard();
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    write_env_file(&temp_dir, ".env", "SEEDER_DB_MAX_CONNECTIONS=abc\n");

    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let err = loader.load().expect_err("non-numeric connections should fail");
    assert!(matches!(
        err,
        ConfigError::InvalidSetting { ref key, ref value }
            if key == "SEEDER_DB_MAX_CONNECTIONS" && value == "abc"
    ));

    clear_env();
}

#[test]
fn unrecognised_boolean_is_rejected() {
    let _guard = env_guard();
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    write_env_file(&temp_dir, ".env", "SEEDER_SEED_OVERWRITE=maybe\n");

    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let err = loader.load().expect_err("unrecognised flag should fail");
    assert!(matches!(
        err,
        ConfigError::InvalidSetting { ref key, ref value }
            if key == "SEEDER_SEED_OVERWRITE" && value == "maybe"
    ));

    unsafe {
        env::set_var("SEEDER_RUN_MIGRATIONS", "sometimes");
    }
    write_env_file(&temp_dir, ".env", "SEEDER_SEED_OVERWRITE=off\n");
    let err = loader.load().expect_err("env override is validated too");
    assert!(matches!(
        err,
        ConfigError::InvalidSetting { ref key, .. } if key == "SEEDER_RUN_MIGRATIONS"
    ));

    clear_env();
}
