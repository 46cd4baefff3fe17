//! Domain identifier types with validation
//!
//! This module provides newtype wrappers for the identifiers that key the
//! encounter table. Each type ensures IDs cannot be mixed up and rejects
//! empty values at construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Patient identifier newtype wrapper
///
/// Opaque identifier for one patient. A patient may have many encounters,
/// so this type is the grouping key for timelines.
///
/// # Examples
///
/// ```
/// use cohort::domain::ids::PatientId;
/// use std::str::FromStr;
///
/// let patient_id = PatientId::from_str("10000032").unwrap();
/// assert_eq!(patient_id.as_str(), "10000032");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PatientId(String);

impl PatientId {
    /// Creates a new PatientId from a string
    ///
    /// # Errors
    ///
    /// Returns an error if the ID is empty or whitespace-only.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Patient ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the patient ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PatientId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for PatientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Encounter identifier newtype wrapper
///
/// Identifies a single ED stay. Unique within a patient; the pair
/// `(PatientId, EncounterId)` is unique across the whole table.
///
/// # Examples
///
/// ```
/// use cohort::domain::ids::EncounterId;
/// use std::str::FromStr;
///
/// let encounter_id = EncounterId::from_str("33258284").unwrap();
/// assert_eq!(encounter_id.as_str(), "33258284");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EncounterId(String);

impl EncounterId {
    /// Creates a new EncounterId from a string
    ///
    /// # Errors
    ///
    /// Returns an error if the ID is empty or whitespace-only.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Encounter ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the encounter ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EncounterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EncounterId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for EncounterId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Composite key identifying one encounter across the whole table
pub type EncounterKey = (PatientId, EncounterId);
