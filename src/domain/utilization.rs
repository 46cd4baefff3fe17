//! Historical utilization features
//!
//! Per-encounter counts of the patient's prior ED use inside the trailing
//! look-back window, computed only from encounters that happened earlier.

use serde::{Deserialize, Serialize};

/// Counts of a patient's prior ED use within the trailing window
///
/// Both counts exclude the current encounter itself; a patient's first-ever
/// encounter always carries `{0, 0}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtilizationFeature {
    /// Number of prior ED visits (any disposition) inside the window
    pub prior_visit_count: u32,

    /// Number of prior ED visits that ended in admission inside the window
    pub prior_admission_count: u32,
}

impl UtilizationFeature {
    /// Creates a new utilization feature pair
    pub fn new(prior_visit_count: u32, prior_admission_count: u32) -> Self {
        Self {
            prior_visit_count,
            prior_admission_count,
        }
    }

    /// The feature pair for an encounter with no qualifying history
    pub fn zero() -> Self {
        Self::default()
    }
}
