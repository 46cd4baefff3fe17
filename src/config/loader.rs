//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::CohortConfig;
use crate::domain::errors::CohortError;
use crate::domain::result::Result;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Parses it into [`CohortConfig`]
/// 3. Applies environment variable overrides (`COHORT_*` prefix)
/// 4. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, the TOML does not parse,
/// or validation fails.
pub fn load_config(path: impl AsRef<Path>) -> Result<CohortConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CohortError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CohortError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let mut config: CohortConfig = toml::from_str(&contents)
        .map_err(|e| CohortError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        CohortError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Applies environment variable overrides using the COHORT_* prefix
///
/// Variables follow the pattern `COHORT_<SECTION>_<KEY>`, for example
/// `COHORT_INPUT_ENCOUNTERS_PATH` or `COHORT_WINDOWS_FOLLOW_UP_HOURS`.
fn apply_env_overrides(config: &mut CohortConfig) {
    if let Ok(val) = std::env::var("COHORT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("COHORT_INPUT_ENCOUNTERS_PATH") {
        config.input.encounters_path = val;
    }
    if let Ok(val) = std::env::var("COHORT_INPUT_DEATHS_PATH") {
        config.input.deaths_path = val;
    }

    if let Ok(val) = std::env::var("COHORT_WINDOWS_FOLLOW_UP_HOURS") {
        if let Ok(hours) = val.parse() {
            config.windows.follow_up_hours = hours;
        }
    }
    if let Ok(val) = std::env::var("COHORT_WINDOWS_TRAILING_DAYS") {
        if let Ok(days) = val.parse() {
            config.windows.trailing_days = days;
        }
    }

    if let Ok(val) = std::env::var("COHORT_CACHE_ENABLED") {
        config.cache.enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("COHORT_CACHE_PATH") {
        config.cache.path = val;
    }

    if let Ok(val) = std::env::var("COHORT_OUTPUT_PATH") {
        config.output.path = val;
    }

    if let Ok(val) = std::env::var("COHORT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("COHORT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
