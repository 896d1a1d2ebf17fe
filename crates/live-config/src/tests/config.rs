use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, err};
use serial_test::serial;

// =========================================================================
// Loading Tests
// =========================================================================

#[test]
#[serial]
fn given_no_config_file_when_load_then_defaults() {
    // Given
    let _temp = setup_config_dir();

    // When
    let config = Config::load().unwrap();

    // Then
    assert_eq!(config.registry.release_grace_ms, 100);
    assert_eq!(config.registry.max_channels, 1024);
    assert_eq!(config.pool.max_idle_ms, 300_000);
    assert_eq!(config.pool.max_entries, 32);
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn given_config_toml_when_load_then_values_applied() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        r#"
[registry]
release_grace_ms = 250
max_channels = 64

[pool]
max_idle_ms = 60000
max_entries = 8
"#,
    )
    .unwrap();

    // When
    let config = Config::load().unwrap();

    // Then
    assert_eq!(config.registry.release_grace_ms, 250);
    assert_eq!(config.registry.max_channels, 64);
    assert_eq!(config.pool.max_idle_ms, 60_000);
    assert_eq!(config.pool.max_entries, 8);
}

#[test]
#[serial]
fn given_invalid_toml_when_load_then_error() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(temp.path().join("config.toml"), "registry = not toml").unwrap();

    // When / Then
    assert_that!(Config::load(), err(anything()));
}

#[test]
#[serial]
fn given_unknown_log_level_when_load_then_error() {
    // Given - log level names are strict, typos fail at load time
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        "[logging]\nlevel = \"verbose\"\n",
    )
    .unwrap();

    // When / Then
    assert_that!(Config::load(), err(anything()));
}

// =========================================================================
// Environment Override Tests
// =========================================================================

#[test]
#[serial]
fn given_env_override_when_load_then_applied() {
    // Given
    let _temp = setup_config_dir();
    let _grace = EnvGuard::set("LIVE_RELEASE_GRACE_MS", "500");
    let _entries = EnvGuard::set("LIVE_POOL_MAX_ENTRIES", "4");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_eq!(config.registry.release_grace_ms, 500);
    assert_eq!(config.pool.max_entries, 4);
}

#[test]
#[serial]
fn given_unparseable_env_override_when_load_then_ignored() {
    // Given
    let _temp = setup_config_dir();
    let _grace = EnvGuard::set("LIVE_RELEASE_GRACE_MS", "soon");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_eq!(config.registry.release_grace_ms, 100);
}

#[test]
#[serial]
fn given_log_file_env_override_when_load_then_applied() {
    // Given
    let _temp = setup_config_dir();
    let _file = EnvGuard::set("LIVE_LOG_FILE", "live.log");
    let _colored = EnvGuard::set("LIVE_LOG_COLORED", "false");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_eq!(config.logging.file.as_deref(), Some("live.log"));
    assert!(!config.logging.colored);
}
