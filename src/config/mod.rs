//! Configuration management
//!
//! TOML-based configuration with `COHORT_*` environment variable overrides
//! and validation before anything runs.

pub mod loader;
pub mod schema;

pub use loader::load_config;
pub use schema::{
    ApplicationConfig, CacheConfig, CohortConfig, InputConfig, LoggingConfig, OutputConfig,
    WindowConfig,
};
