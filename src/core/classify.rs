//! Outcome classification
//!
//! Walks one patient timeline and labels every encounter with exactly one
//! [`OutcomeLabel`], using a fixed follow-up window measured from the
//! encounter's discharge time. The walk is a pure function of the timeline;
//! it never inspects encounters of other patients and never fails - the
//! timeline builder has already rejected structural violations.
//!
//! Rules, per encounter at index `i`:
//!
//! - a next encounter exists: the gap is `admit(i+1) - discharge(i)`; a gap
//!   inside `[0, window]` labels `i` as revisited, anything else (including
//!   a negative gap from a next stay that starts before this one ends) as
//!   not revisited;
//! - last encounter with a recorded death: the gap is
//!   `death - discharge(i)`; a gap inside `[0, window]` labels it as died
//!   within window, anything else as not revisited;
//! - last encounter, no death: not revisited.
//!
//! Both window boundaries are inclusive: a gap of exactly zero or exactly
//! the window length qualifies.

use crate::core::timeline::PatientTimeline;
use crate::domain::{EncounterId, OutcomeLabel};
use chrono::Duration;

/// Labels every encounter of one timeline
///
/// Returns one `(encounter_id, label)` pair per encounter, in timeline
/// order. The chronologically last encounter can never be labeled
/// [`OutcomeLabel::RevisitedWithinWindow`] and is the only one that may be
/// labeled [`OutcomeLabel::DiedWithinWindow`].
pub fn classify_timeline(
    timeline: &PatientTimeline,
    follow_up: Duration,
) -> Vec<(EncounterId, OutcomeLabel)> {
    let encounters = timeline.encounters();
    let mut labels = Vec::with_capacity(encounters.len());

    for (i, current) in encounters.iter().enumerate() {
        let label = match encounters.get(i + 1) {
            Some(next) => {
                let gap = next
                    .admit_time
                    .signed_duration_since(current.discharge_time);
                if gap >= Duration::zero() && gap <= follow_up {
                    OutcomeLabel::RevisitedWithinWindow
                } else {
                    OutcomeLabel::NotRevisited
                }
            }
            None => match timeline.death_time() {
                Some(death_time) => {
                    let gap = death_time.signed_duration_since(current.discharge_time);
                    if gap >= Duration::zero() && gap <= follow_up {
                        OutcomeLabel::DiedWithinWindow
                    } else {
                        // Includes a death recorded before discharge; an
                        // unusual ordering is a defined outcome, not an error
                        OutcomeLabel::NotRevisited
                    }
                }
                None => OutcomeLabel::NotRevisited,
            },
        };
        labels.push((current.encounter_id.clone(), label));
    }

    labels
}
