//! Configuration schema types
//!
//! This module defines the configuration structure for the cohort builder.

use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortConfig {
    /// Application-wide settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Source table paths
    pub input: InputConfig,

    /// Follow-up and trailing window lengths
    #[serde(default)]
    pub windows: WindowConfig,

    /// Utilization cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Output table settings
    pub output: OutputConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Application-wide settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name used in logs
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Source table paths
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// CSV of encounters: patient_id, encounter_id, admit_time,
    /// discharge_time, disposition
    pub encounters_path: String,

    /// CSV of death records: patient_id, death_time (nullable)
    pub deaths_path: String,
}

/// Window lengths for labeling and utilization features
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Follow-up window for revisit/death labeling, in hours
    #[serde(default = "default_follow_up_hours")]
    pub follow_up_hours: i64,

    /// Trailing look-back window for utilization counts, in days
    #[serde(default = "default_trailing_days")]
    pub trailing_days: i64,
}

/// Utilization cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether to load/store the persisted utilization table
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Path of the cache CSV (a fingerprint sidecar is written next to it)
    #[serde(default = "default_cache_path")]
    pub path: String,
}

/// Output table settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Path of the augmented cohort CSV
    pub path: String,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether to also write JSON logs to a rolling file
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for rolling log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Rotation policy: "daily" or "hourly"
    #[serde(default = "default_rotation")]
    pub local_rotation: String,
}

fn default_app_name() -> String {
    "cohort".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_follow_up_hours() -> i64 {
    72
}

fn default_trailing_days() -> i64 {
    365
}

fn default_true() -> bool {
    true
}

fn default_cache_path() -> String {
    "utilization_cache.csv".to_string()
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            follow_up_hours: default_follow_up_hours(),
            trailing_days: default_trailing_days(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            path: default_cache_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_rotation(),
        }
    }
}

impl CohortConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns a description of the first problem found: empty paths,
    /// non-positive window lengths, or an unknown log level.
    pub fn validate(&self) -> Result<(), String> {
        if self.input.encounters_path.trim().is_empty() {
            return Err("input.encounters_path must not be empty".to_string());
        }
        if self.input.deaths_path.trim().is_empty() {
            return Err("input.deaths_path must not be empty".to_string());
        }
        if self.output.path.trim().is_empty() {
            return Err("output.path must not be empty".to_string());
        }
        if self.windows.follow_up_hours <= 0 {
            return Err(format!(
                "windows.follow_up_hours must be positive, got {}",
                self.windows.follow_up_hours
            ));
        }
        if self.windows.trailing_days <= 0 {
            return Err(format!(
                "windows.trailing_days must be positive, got {}",
                self.windows.trailing_days
            ));
        }
        if self.cache.enabled && self.cache.path.trim().is_empty() {
            return Err("cache.path must not be empty when the cache is enabled".to_string());
        }
        match self.application.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(format!(
                    "application.log_level must be one of trace, debug, info, warn, error; got {other}"
                ))
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_config() -> CohortConfig {
        toml::from_str(
            r#"
            [input]
            encounters_path = "encounters.csv"
            deaths_path = "deaths.csv"

            [output]
            path = "cohort.csv"
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let config = minimal_config();
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.windows.follow_up_hours, 72);
        assert_eq!(config.windows.trailing_days, 365);
        assert!(config.cache.enabled);
        assert!(!config.logging.local_enabled);
    }

    #[test]
    fn test_minimal_config_is_valid() {
        assert!(minimal_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_positive_window() {
        let mut config = minimal_config();
        config.windows.follow_up_hours = 0;
        assert!(config.validate().is_err());

        let mut config = minimal_config();
        config.windows.trailing_days = -1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_paths() {
        let mut config = minimal_config();
        config.input.encounters_path = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_log_level() {
        let mut config = minimal_config();
        config.application.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_required_section_fails_parse() {
        let result: Result<CohortConfig, _> = toml::from_str(
            r#"
            [output]
            path = "cohort.csv"
            "#,
        );
        assert!(result.is_err());
    }
}
