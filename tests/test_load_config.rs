use std::env;
use std::fs::write;
use std::path::PathBuf;
use std::time::Duration;

use fdc_harvest::load_config::{load_config, load_config_or_default};
use serial_test::serial;
use tempfile::{tempdir, NamedTempFile};

/// A static config file plus the API key from env produces a fully merged HarvestConfig.
#[test]
#[serial]
fn test_load_config_success_injects_env_api_key() {
    let config_yaml = r#"
input_path: ./data/foods.txt
store_path: ./data/nutrients.csv
base_url: http://localhost:9999/fdc/v1/
max_retries: 3
retry_delay_secs: 0.5
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).unwrap();

    env::set_var("FDC_API_KEY", "top-secret-test-key");

    let config = load_config(config_file.path()).expect("Config should load");

    assert_eq!(config.input_path, PathBuf::from("./data/foods.txt"));
    assert_eq!(config.store_path, PathBuf::from("./data/nutrients.csv"));
    assert_eq!(config.base_url, "http://localhost:9999/fdc/v1");
    assert_eq!(config.max_retries, 3);
    assert_eq!(config.retry_delay, Duration::from_millis(500));
    assert_eq!(config.api_key, "top-secret-test-key");
}

/// Keys left out of the file fall back to the built-in defaults.
#[test]
#[serial]
fn test_load_config_partial_file_uses_defaults() {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), "store_path: elsewhere.csv\n").unwrap();
    env::set_var("FDC_API_KEY", "k");

    let config = load_config(config_file.path()).expect("Config should load");

    assert_eq!(config.store_path, PathBuf::from("elsewhere.csv"));
    assert_eq!(config.input_path, PathBuf::from("food.txt"));
    assert_eq!(config.base_url, "https://api.nal.usda.gov/fdc/v1");
    assert_eq!(config.max_retries, 5);
    assert_eq!(config.retry_delay, Duration::from_secs(5));
}

#[test]
#[serial]
fn test_load_config_errors_on_missing_env() {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), "max_retries: 2\n").unwrap();

    env::remove_var("FDC_API_KEY");

    let err = load_config(config_file.path()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("FDC_API_KEY"), "Must error for missing env var, got: {msg}");
}

#[test]
#[serial]
fn test_load_config_errors_for_invalid_file() {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), b"not-yaml: [:::").unwrap();
    env::set_var("FDC_API_KEY", "invalid-but-present");

    let err = load_config(config_file.path()).unwrap_err();
    let msg = err.to_string();
    assert!(
        msg.contains("parse") || msg.contains("YAML"),
        "Parse error expected, got: {msg}"
    );
}

#[test]
#[serial]
fn test_load_config_rejects_zero_retries() {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), "max_retries: 0\n").unwrap();
    env::set_var("FDC_API_KEY", "k");

    let err = load_config(config_file.path()).unwrap_err();
    assert!(err.to_string().contains("max_retries"));
}

#[test]
#[serial]
fn test_load_config_requires_explicit_file_to_exist() {
    let dir = tempdir().unwrap();
    env::set_var("FDC_API_KEY", "k");

    let err = load_config(dir.path().join("missing.yaml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
#[serial]
fn test_missing_default_file_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    env::set_var("FDC_API_KEY", "k");

    let config = load_config_or_default(dir.path().join("fdc-harvest.yaml"))
        .expect("defaults should apply");

    assert_eq!(config.max_retries, 5);
    assert_eq!(config.store_path, PathBuf::from("food_nutrients.csv"));
}
