//! Merging computed labels and features back onto the encounter table
//!
//! The join is keyed by `(patient_id, encounter_id)` and behaves like a
//! strict left join: every encounter row passed in survives exactly once
//! and in its original order, and a row whose label or feature pair is
//! missing fails the merge with the offending identifiers rather than
//! silently continuing - a miss here is an upstream grouping bug.

use crate::domain::{
    Encounter, EncounterKey, MergeError, OutcomeLabel, UtilizationFeature,
};
use std::collections::HashMap;

/// One encounter row with its computed label and features attached
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledEncounter {
    /// The original encounter row, unchanged
    pub encounter: Encounter,

    /// The outcome label assigned by the classifier
    pub outcome: OutcomeLabel,

    /// Prior utilization counts from the rolling-window aggregator
    pub utilization: UtilizationFeature,
}

/// Attaches labels and features to encounter rows
///
/// # Errors
///
/// - [`MergeError::MissingLabel`] / [`MergeError::MissingFeature`] when an
///   encounter row has no computed counterpart
/// - [`MergeError::OrphanRecord`] when a computed record references an
///   encounter absent from the rows being merged
pub fn attach_labels_and_features(
    encounters: Vec<Encounter>,
    labels: &HashMap<EncounterKey, OutcomeLabel>,
    features: &HashMap<EncounterKey, UtilizationFeature>,
) -> Result<Vec<LabeledEncounter>, MergeError> {
    let mut rows = Vec::with_capacity(encounters.len());
    let mut seen: std::collections::HashSet<EncounterKey> =
        std::collections::HashSet::with_capacity(encounters.len());

    for encounter in encounters {
        let key = encounter.key();

        let outcome = *labels.get(&key).ok_or_else(|| MergeError::MissingLabel {
            patient_id: key.0.to_string(),
            encounter_id: key.1.to_string(),
        })?;

        let utilization = *features
            .get(&key)
            .ok_or_else(|| MergeError::MissingFeature {
                patient_id: key.0.to_string(),
                encounter_id: key.1.to_string(),
            })?;

        seen.insert(key);
        rows.push(LabeledEncounter {
            encounter,
            outcome,
            utilization,
        });
    }

    // The reverse direction: every computed record must have found a row
    for key in labels.keys().chain(features.keys()) {
        if !seen.contains(key) {
            return Err(MergeError::OrphanRecord {
                patient_id: key.0.to_string(),
                encounter_id: key.1.to_string(),
            });
        }
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DispositionClass, EncounterId, PatientId};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn ts(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, day, 0, 0, 0).unwrap()
    }

    fn encounter(patient: &str, id: &str, day: u32) -> Encounter {
        Encounter::new(
            PatientId::new(patient).unwrap(),
            EncounterId::new(id).unwrap(),
            ts(day),
            ts(day) + Duration::hours(4),
            DispositionClass::Discharged,
        )
    }

    fn key(patient: &str, id: &str) -> EncounterKey {
        (
            PatientId::new(patient).unwrap(),
            EncounterId::new(id).unwrap(),
        )
    }

    #[test]
    fn test_attach_preserves_row_order() {
        let encounters = vec![
            encounter("p2", "b", 3),
            encounter("p1", "a", 1),
        ];
        let labels = HashMap::from([
            (key("p1", "a"), OutcomeLabel::NotRevisited),
            (key("p2", "b"), OutcomeLabel::RevisitedWithinWindow),
        ]);
        let features = HashMap::from([
            (key("p1", "a"), UtilizationFeature::zero()),
            (key("p2", "b"), UtilizationFeature::new(2, 1)),
        ]);

        let rows = attach_labels_and_features(encounters, &labels, &features).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].encounter.encounter_id.as_str(), "b");
        assert_eq!(rows[0].outcome, OutcomeLabel::RevisitedWithinWindow);
        assert_eq!(rows[0].utilization, UtilizationFeature::new(2, 1));
        assert_eq!(rows[1].encounter.encounter_id.as_str(), "a");
    }

    #[test]
    fn test_missing_label_fails_with_identifier() {
        let encounters = vec![encounter("p1", "a", 1)];
        let labels = HashMap::new();
        let features = HashMap::from([(key("p1", "a"), UtilizationFeature::zero())]);

        let err = attach_labels_and_features(encounters, &labels, &features).unwrap_err();
        match err {
            MergeError::MissingLabel {
                patient_id,
                encounter_id,
            } => {
                assert_eq!(patient_id, "p1");
                assert_eq!(encounter_id, "a");
            }
            other => panic!("expected MissingLabel, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_feature_fails() {
        let encounters = vec![encounter("p1", "a", 1)];
        let labels = HashMap::from([(key("p1", "a"), OutcomeLabel::NotRevisited)]);
        let features = HashMap::new();

        let err = attach_labels_and_features(encounters, &labels, &features).unwrap_err();
        assert!(matches!(err, MergeError::MissingFeature { .. }));
    }

    #[test]
    fn test_orphan_record_fails() {
        let encounters = vec![encounter("p1", "a", 1)];
        let labels = HashMap::from([
            (key("p1", "a"), OutcomeLabel::NotRevisited),
            (key("p1", "ghost"), OutcomeLabel::NotRevisited),
        ]);
        let features = HashMap::from([
            (key("p1", "a"), UtilizationFeature::zero()),
            (key("p1", "ghost"), UtilizationFeature::zero()),
        ]);

        let err = attach_labels_and_features(encounters, &labels, &features).unwrap_err();
        assert!(matches!(err, MergeError::OrphanRecord { .. }));
    }
}
