//! Encounter domain model
//!
//! An encounter is one ED stay for one patient, bounded by admit and
//! discharge timestamps and carrying the disposition the patient left with.

use super::ids::{EncounterId, PatientId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Disposition of an ED stay, bucketed into a small closed set
///
/// Raw disposition strings from the source system are collapsed into these
/// four buckets. Only [`DispositionClass::Admitted`] participates in the
/// prior-admission utilization count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispositionClass {
    /// Admitted to hospital (or transferred to another facility)
    Admitted,
    /// Discharged home
    Discharged,
    /// Left without being seen, eloped, or left against medical advice
    LeftWithoutBeingSeen,
    /// Expired during the stay, or any other disposition
    ExpiredOther,
}

impl DispositionClass {
    /// Buckets a raw source disposition string into the closed set
    ///
    /// Matching is case-insensitive on the known source values:
    ///
    /// - `ADMITTED`, `TRANSFER` → [`Admitted`](Self::Admitted)
    /// - `HOME` → [`Discharged`](Self::Discharged)
    /// - `LEFT WITHOUT BEING SEEN` / `LWBS`, `LEFT AGAINST MEDICAL ADVICE`
    ///   / `LAMA`, `ELOPED` → [`LeftWithoutBeingSeen`](Self::LeftWithoutBeingSeen)
    /// - everything else → [`ExpiredOther`](Self::ExpiredOther)
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "ADMITTED" | "TRANSFER" => Self::Admitted,
            "HOME" => Self::Discharged,
            "LEFT WITHOUT BEING SEEN" | "LWBS" | "LEFT AGAINST MEDICAL ADVICE" | "LAMA"
            | "ELOPED" => Self::LeftWithoutBeingSeen,
            _ => Self::ExpiredOther,
        }
    }

    /// Returns the bucketed disposition as a stable string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admitted => "admitted",
            Self::Discharged => "discharged",
            Self::LeftWithoutBeingSeen => "left without being seen",
            Self::ExpiredOther => "expired/other",
        }
    }

    /// True when the stay ended in a hospital admission
    pub fn is_admission(&self) -> bool {
        matches!(self, Self::Admitted)
    }
}

impl std::fmt::Display for DispositionClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents one ED stay
///
/// # Examples
///
/// ```
/// use cohort::domain::encounter::{DispositionClass, Encounter};
/// use cohort::domain::ids::{EncounterId, PatientId};
/// use chrono::{TimeZone, Utc};
///
/// let encounter = Encounter::new(
///     PatientId::new("p1").unwrap(),
///     EncounterId::new("e1").unwrap(),
///     Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2024, 3, 1, 14, 0, 0).unwrap(),
///     DispositionClass::Discharged,
/// );
/// assert_eq!(encounter.length_of_stay_hours(), 6.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    /// Patient this stay belongs to
    pub patient_id: PatientId,

    /// Identifier of this stay, unique within the patient
    pub encounter_id: EncounterId,

    /// When the patient presented to the ED
    pub admit_time: DateTime<Utc>,

    /// When the patient left the ED
    pub discharge_time: DateTime<Utc>,

    /// Bucketed disposition of the stay
    pub disposition: DispositionClass,
}

impl Encounter {
    /// Creates a new encounter
    pub fn new(
        patient_id: PatientId,
        encounter_id: EncounterId,
        admit_time: DateTime<Utc>,
        discharge_time: DateTime<Utc>,
        disposition: DispositionClass,
    ) -> Self {
        Self {
            patient_id,
            encounter_id,
            admit_time,
            discharge_time,
            disposition,
        }
    }

    /// Length of stay in hours
    ///
    /// Upstream ingestion drops stays where this is not strictly positive,
    /// so callers inside the core can rely on it being `> 0`.
    pub fn length_of_stay_hours(&self) -> f64 {
        (self.discharge_time - self.admit_time).num_seconds() as f64 / 3600.0
    }

    /// The composite key identifying this encounter across the table
    pub fn key(&self) -> (PatientId, EncounterId) {
        (self.patient_id.clone(), self.encounter_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, h, m, 0).unwrap()
    }

    #[test]
    fn test_disposition_bucketing() {
        assert_eq!(
            DispositionClass::from_raw("ADMITTED"),
            DispositionClass::Admitted
        );
        assert_eq!(
            DispositionClass::from_raw("TRANSFER"),
            DispositionClass::Admitted
        );
        assert_eq!(
            DispositionClass::from_raw("HOME"),
            DispositionClass::Discharged
        );
        assert_eq!(
            DispositionClass::from_raw("LEFT WITHOUT BEING SEEN"),
            DispositionClass::LeftWithoutBeingSeen
        );
        assert_eq!(
            DispositionClass::from_raw("ELOPED"),
            DispositionClass::LeftWithoutBeingSeen
        );
        assert_eq!(
            DispositionClass::from_raw("LWBS"),
            DispositionClass::LeftWithoutBeingSeen
        );
        assert_eq!(
            DispositionClass::from_raw("LAMA"),
            DispositionClass::LeftWithoutBeingSeen
        );
        assert_eq!(
            DispositionClass::from_raw("EXPIRED"),
            DispositionClass::ExpiredOther
        );
        assert_eq!(
            DispositionClass::from_raw("OTHER"),
            DispositionClass::ExpiredOther
        );
    }

    #[test]
    fn test_disposition_bucketing_case_insensitive() {
        assert_eq!(
            DispositionClass::from_raw("admitted"),
            DispositionClass::Admitted
        );
        assert_eq!(
            DispositionClass::from_raw(" Home "),
            DispositionClass::Discharged
        );
    }

    #[test]
    fn test_is_admission() {
        assert!(DispositionClass::Admitted.is_admission());
        assert!(!DispositionClass::Discharged.is_admission());
        assert!(!DispositionClass::LeftWithoutBeingSeen.is_admission());
        assert!(!DispositionClass::ExpiredOther.is_admission());
    }

    #[test]
    fn test_length_of_stay_hours() {
        let encounter = Encounter::new(
            PatientId::new("p1").unwrap(),
            EncounterId::new("e1").unwrap(),
            ts(8, 0),
            ts(11, 30),
            DispositionClass::Discharged,
        );
        assert_eq!(encounter.length_of_stay_hours(), 3.5);
    }

    #[test]
    fn test_encounter_key() {
        let encounter = Encounter::new(
            PatientId::new("p1").unwrap(),
            EncounterId::new("e1").unwrap(),
            ts(8, 0),
            ts(9, 0),
            DispositionClass::Admitted,
        );
        let (patient_id, encounter_id) = encounter.key();
        assert_eq!(patient_id.as_str(), "p1");
        assert_eq!(encounter_id.as_str(), "e1");
    }
}
