//! Rolling-window utilization aggregation
//!
//! For each encounter, counts the patient's qualifying prior encounters
//! inside a trailing look-back window ending at the current admit time:
//!
//! - `prior_visit_count`: all prior encounters with
//!   `admit_time ∈ [current - window, current)` - the lower bound is
//!   inclusive (a visit exactly one window-length earlier counts), the
//!   current encounter is always excluded;
//! - `prior_admission_count`: the same window restricted to encounters
//!   whose disposition is admitted.
//!
//! The walk keeps two monotone pointers over the sorted timeline and an
//! incrementally maintained admission count, so each encounter is examined
//! a constant number of times regardless of timeline length.

use crate::core::timeline::PatientTimeline;
use crate::domain::{EncounterId, UtilizationFeature};
use chrono::Duration;

/// Computes the utilization feature pair for every encounter of a timeline
///
/// Returns one `(encounter_id, feature)` pair per encounter, in timeline
/// order. Deterministic and idempotent: repeated runs over the same
/// timeline produce identical output, which is what lets a persisted cache
/// substitute for recomputation.
pub fn utilization_for_timeline(
    timeline: &PatientTimeline,
    trailing: Duration,
) -> Vec<(EncounterId, UtilizationFeature)> {
    let encounters = timeline.encounters();
    let mut features = Vec::with_capacity(encounters.len());

    // window_start: first index still inside the trailing window
    // window_end: first index at or past the current admit time
    let mut window_start = 0usize;
    let mut window_end = 0usize;
    let mut admissions_in_window = 0u32;

    for current in encounters {
        let lower_bound = current.admit_time - trailing;

        // Grow the window up to (but not including) the current admit time.
        // Encounters sharing the current admit time are not "prior".
        while window_end < encounters.len()
            && encounters[window_end].admit_time < current.admit_time
        {
            if encounters[window_end].disposition.is_admission() {
                admissions_in_window += 1;
            }
            window_end += 1;
        }

        // Evict encounters older than the inclusive lower bound
        while window_start < window_end && encounters[window_start].admit_time < lower_bound {
            if encounters[window_start].disposition.is_admission() {
                admissions_in_window -= 1;
            }
            window_start += 1;
        }

        features.push((
            current.encounter_id.clone(),
            UtilizationFeature::new((window_end - window_start) as u32, admissions_in_window),
        ));
    }

    features
}
