//! Per-patient event timelines
//!
//! A timeline is a read-only projection of the encounter table: all
//! encounters of one patient in stable ascending admit-time order, plus the
//! patient's death time when one is recorded. Timelines own no independent
//! state and are rebuilt whenever the source table changes.
//!
//! Structural invariants of the data model are enforced here, not in the
//! classifier: downstream consumers may rely on ordering and uniqueness as
//! an explicit precondition.

use crate::domain::{Encounter, PatientId, TimelineError};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashSet};

/// All encounters for one patient, ordered by admit time ascending
///
/// Ties on admit time keep their original input order (stable sort); this
/// ordering directly affects classification and must be deterministic.
#[derive(Debug, Clone)]
pub struct PatientTimeline {
    patient_id: PatientId,
    encounters: Vec<Encounter>,
    death_time: Option<DateTime<Utc>>,
}

impl PatientTimeline {
    /// Builds a validated timeline from one patient's encounters
    ///
    /// Sorts the encounters by admit time (stable, so equal admit times
    /// preserve input order) and rejects structural violations.
    ///
    /// # Errors
    ///
    /// - [`TimelineError::DuplicateEncounter`] when the same encounter ID
    ///   appears more than once for the patient
    /// - [`TimelineError::NegativeStay`] when an encounter discharges
    ///   before it admits
    pub fn build(
        patient_id: PatientId,
        mut encounters: Vec<Encounter>,
        death_time: Option<DateTime<Utc>>,
    ) -> Result<Self, TimelineError> {
        let mut seen = HashSet::with_capacity(encounters.len());
        for encounter in &encounters {
            debug_assert_eq!(encounter.patient_id, patient_id);
            if encounter.discharge_time < encounter.admit_time {
                return Err(TimelineError::NegativeStay {
                    patient_id: patient_id.to_string(),
                    encounter_id: encounter.encounter_id.to_string(),
                });
            }
            if !seen.insert(encounter.encounter_id.clone()) {
                return Err(TimelineError::DuplicateEncounter {
                    patient_id: patient_id.to_string(),
                    encounter_id: encounter.encounter_id.to_string(),
                });
            }
        }

        // Vec::sort_by_key is stable: equal admit times keep input order
        encounters.sort_by_key(|e| e.admit_time);

        Ok(Self {
            patient_id,
            encounters,
            death_time,
        })
    }

    /// The patient this timeline belongs to
    pub fn patient_id(&self) -> &PatientId {
        &self.patient_id
    }

    /// The encounters in ascending admit-time order
    pub fn encounters(&self) -> &[Encounter] {
        &self.encounters
    }

    /// The patient's recorded death time, if any
    pub fn death_time(&self) -> Option<DateTime<Utc>> {
        self.death_time
    }

    /// Number of encounters on the timeline
    pub fn len(&self) -> usize {
        self.encounters.len()
    }

    /// True when the timeline holds no encounters
    pub fn is_empty(&self) -> bool {
        self.encounters.is_empty()
    }
}

/// Groups a flat encounter table by patient
///
/// Purely a grouping view: no encounter is duplicated or dropped, and
/// within each group the input order is preserved. Validation and sorting
/// happen later in [`PatientTimeline::build`], per patient, so one
/// patient's malformed rows cannot abort another patient's partition.
pub fn group_by_patient(encounters: Vec<Encounter>) -> BTreeMap<PatientId, Vec<Encounter>> {
    let mut groups: BTreeMap<PatientId, Vec<Encounter>> = BTreeMap::new();
    for encounter in encounters {
        groups
            .entry(encounter.patient_id.clone())
            .or_default()
            .push(encounter);
    }
    groups
}
