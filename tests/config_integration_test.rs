//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables should be run with --test-threads=1
//! to avoid interference between tests.

use cohort::config::load_config;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("COHORT_APPLICATION_LOG_LEVEL");
    std::env::remove_var("COHORT_INPUT_ENCOUNTERS_PATH");
    std::env::remove_var("COHORT_INPUT_DEATHS_PATH");
    std::env::remove_var("COHORT_WINDOWS_FOLLOW_UP_HOURS");
    std::env::remove_var("COHORT_WINDOWS_TRAILING_DAYS");
    std::env::remove_var("COHORT_CACHE_ENABLED");
    std::env::remove_var("COHORT_CACHE_PATH");
    std::env::remove_var("COHORT_OUTPUT_PATH");
}

fn write_temp_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[application]
name = "cohort"
log_level = "debug"

[input]
encounters_path = "data/encounters.csv"
deaths_path = "data/deaths.csv"

[windows]
follow_up_hours = 48
trailing_days = 180

[cache]
enabled = true
path = "data/utilization_cache.csv"

[output]
path = "data/cohort.csv"

[logging]
local_enabled = true
local_path = "/tmp/cohort-logs"
local_rotation = "hourly"
"#;

    let temp_file = write_temp_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.name, "cohort");
    assert_eq!(config.application.log_level, "debug");

    assert_eq!(config.input.encounters_path, "data/encounters.csv");
    assert_eq!(config.input.deaths_path, "data/deaths.csv");

    assert_eq!(config.windows.follow_up_hours, 48);
    assert_eq!(config.windows.trailing_days, 180);

    assert!(config.cache.enabled);
    assert_eq!(config.cache.path, "data/utilization_cache.csv");

    assert_eq!(config.output.path, "data/cohort.csv");

    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_path, "/tmp/cohort-logs");
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_load_minimal_config_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[input]
encounters_path = "encounters.csv"
deaths_path = "deaths.csv"

[output]
path = "cohort.csv"
"#;

    let temp_file = write_temp_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.windows.follow_up_hours, 72);
    assert_eq!(config.windows.trailing_days, 365);
    assert!(config.cache.enabled);
    assert_eq!(config.cache.path, "utilization_cache.csv");
    assert!(!config.logging.local_enabled);
}

#[test]
fn test_env_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[input]
encounters_path = "encounters.csv"
deaths_path = "deaths.csv"

[output]
path = "cohort.csv"
"#;

    std::env::set_var("COHORT_APPLICATION_LOG_LEVEL", "warn");
    std::env::set_var("COHORT_WINDOWS_FOLLOW_UP_HOURS", "24");
    std::env::set_var("COHORT_CACHE_ENABLED", "false");
    std::env::set_var("COHORT_OUTPUT_PATH", "elsewhere/cohort.csv");

    let temp_file = write_temp_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "warn");
    assert_eq!(config.windows.follow_up_hours, 24);
    assert!(!config.cache.enabled);
    assert_eq!(config.output.path, "elsewhere/cohort.csv");

    cleanup_env_vars();
}

#[test]
fn test_env_override_must_still_validate() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[input]
encounters_path = "encounters.csv"
deaths_path = "deaths.csv"

[output]
path = "cohort.csv"
"#;

    std::env::set_var("COHORT_APPLICATION_LOG_LEVEL", "loud");

    let temp_file = write_temp_config(toml_content);
    let result = load_config(temp_file.path());
    assert!(result.is_err());

    cleanup_env_vars();
}

#[test]
fn test_missing_required_input_section() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[output]
path = "cohort.csv"
"#;

    let temp_file = write_temp_config(toml_content);
    let result = load_config(temp_file.path());
    assert!(result.is_err());
}
