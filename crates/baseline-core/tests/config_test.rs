//! Tests for the layered configuration system.

use std::sync::Mutex;

use baseline_core::config::{BaselineConfig, CliOverrides};
use baseline_core::errors::ConfigError;
use baseline_core::types::policy::TargetSpec;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all BASELINE_ env vars and point HOME at an empty directory so a
/// developer's user config cannot leak into the assertions.
fn isolate_env(home: &std::path::Path) {
    for key in [
        "BASELINE_TARGET",
        "BASELINE_STRICT",
        "BASELINE_WHITELIST",
        "BASELINE_DATASET",
        "BASELINE_BROWSERS",
        "BASELINE_MAX_FILE_SIZE",
    ] {
        std::env::remove_var(key);
    }
    std::env::set_var("HOME", home);
}

#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    std::fs::write(
        dir.path().join("baseline.toml"),
        r#"
[policy]
target = 2020
strict = false
whitelist = ["Fetch"]

[scan]
max_file_size = 2_000_000

[style]
browsers = ["chrome 100"]
"#,
    )
    .unwrap();

    std::env::set_var("BASELINE_STRICT", "true");
    std::env::set_var("BASELINE_MAX_FILE_SIZE", "5000000");

    let cli = CliOverrides {
        target: Some("newly".to_string()),
        ..Default::default()
    };
    let config = BaselineConfig::load(dir.path(), Some(&cli)).unwrap();

    // CLI wins over project file
    let policy = config.policy().unwrap();
    assert_eq!(policy.target, TargetSpec::Newly);
    // env wins over project file
    assert!(policy.strict);
    assert_eq!(config.scan.effective_max_file_size(), 5_000_000);
    // project file wins over defaults
    assert_eq!(config.whitelist_names(), &["Fetch".to_string()]);
    assert_eq!(config.browser_targets().unwrap().len(), 1);

    isolate_env(home.path());
}

#[test]
fn test_defaults_without_any_layer() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    let config = BaselineConfig::load(dir.path(), None).unwrap();
    let policy = config.policy().unwrap();
    assert_eq!(policy.target, TargetSpec::Widely);
    assert!(!policy.strict);
    assert!(config.whitelist_names().is_empty());
    assert_eq!(config.scan.effective_max_file_size(), 1_048_576);
    assert_eq!(
        config.dataset.effective_path(dir.path()),
        dir.path().join("web-features.json")
    );
    assert!(config.scan.effective_include().iter().any(|g| g == "**/*.css"));
}

#[test]
fn test_user_config_is_lowest_layer() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let user_dir = home.path().join(".baseline");
    std::fs::create_dir_all(&user_dir).unwrap();
    std::fs::write(
        user_dir.join("config.toml"),
        "[policy]\ntarget = \"newly\"\nwhitelist = [\"at\"]\n",
    )
    .unwrap();

    let dir = tempdir();
    std::fs::write(dir.path().join("baseline.toml"), "[policy]\ntarget = 2019\n").unwrap();

    let config = BaselineConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.policy().unwrap().target, TargetSpec::Year(2019));
    assert_eq!(config.whitelist_names(), &["at".to_string()]);
}

#[test]
fn test_env_lists_are_split() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    std::env::set_var("BASELINE_WHITELIST", "fetch, at ,,structuredClone");
    std::env::set_var("BASELINE_BROWSERS", "chrome 100,safari >= 15.4");
    let dir = tempdir();
    let config = BaselineConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.whitelist_names().len(), 3);
    let targets = config.browser_targets().unwrap();
    assert_eq!(targets[1].browser, "safari");

    isolate_env(home.path());
}

#[test]
fn test_invalid_target_is_fatal() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    std::fs::write(dir.path().join("baseline.toml"), "[policy]\ntarget = \"sometimes\"\n").unwrap();
    let err = BaselineConfig::load(dir.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "policy.target"));
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    std::fs::write(dir.path().join("baseline.toml"), "[policy\ntarget = ").unwrap();
    let err = BaselineConfig::load(dir.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_missing_explicit_config_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    let cli = CliOverrides {
        config_path: Some(dir.path().join("nope.toml")),
        ..Default::default()
    };
    let err = BaselineConfig::load(dir.path(), Some(&cli)).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

#[test]
fn test_zero_max_file_size_rejected() {
    let config = BaselineConfig::from_toml("[scan]\nmax_file_size = 0\n").unwrap();
    let err = BaselineConfig::validate(&config).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

#[test]
fn test_bad_browser_target_rejected() {
    let config = BaselineConfig::from_toml("[style]\nbrowsers = [\"netscape\"]\n").unwrap();
    assert!(BaselineConfig::validate(&config).is_err());
}

#[test]
fn test_toml_roundtrip_keeps_year_target() {
    let config = BaselineConfig::from_toml("[policy]\ntarget = 2021\nstrict = true\n").unwrap();
    let text = config.to_toml().unwrap();
    let back = BaselineConfig::from_toml(&text).unwrap();
    assert_eq!(back.policy().unwrap(), config.policy().unwrap());
}
