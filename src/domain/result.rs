//! Result type alias for cohort operations

use super::errors::CohortError;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, CohortError>;
