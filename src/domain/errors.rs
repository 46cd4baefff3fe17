//! Domain error types
//!
//! This module defines the error hierarchy for the cohort builder. All
//! errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main cohort error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum CohortError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Table ingestion errors (unreadable file, unparseable row)
    #[error("Ingest error: {0}")]
    Ingest(String),

    /// Structural violations of the timeline data model
    #[error("Malformed timeline: {0}")]
    Timeline(#[from] TimelineError),

    /// Join failures when attaching labels/features to encounters
    #[error("Unjoinable record: {0}")]
    Merge(#[from] MergeError),

    /// Utilization cache read/write errors
    #[error("Cache error: {0}")]
    Cache(String),

    /// Output export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Structural timeline violations
///
/// These reject malformed input before classification. They are never
/// raised for merely unusual timestamp orderings - a next encounter that
/// starts before the current one's discharge is a defined classification
/// outcome, not an error.
#[derive(Debug, Error)]
pub enum TimelineError {
    /// The same (patient, encounter) pair appeared more than once
    #[error("duplicate encounter {encounter_id} for patient {patient_id}")]
    DuplicateEncounter {
        patient_id: String,
        encounter_id: String,
    },

    /// An encounter discharges before it admits
    #[error("encounter {encounter_id} for patient {patient_id} has discharge_time before admit_time")]
    NegativeStay {
        patient_id: String,
        encounter_id: String,
    },
}

/// Join failures between the encounter table and computed labels/features
///
/// Any of these signals an upstream grouping bug and aborts the affected
/// partition rather than silently continuing.
#[derive(Debug, Error)]
pub enum MergeError {
    /// An encounter row has no computed outcome label
    #[error("no outcome label for encounter {encounter_id} of patient {patient_id}")]
    MissingLabel {
        patient_id: String,
        encounter_id: String,
    },

    /// An encounter row has no computed utilization feature pair
    #[error("no utilization feature for encounter {encounter_id} of patient {patient_id}")]
    MissingFeature {
        patient_id: String,
        encounter_id: String,
    },

    /// A computed record references an encounter absent from the merge target
    #[error("computed record for encounter {encounter_id} of patient {patient_id} has no matching encounter row")]
    OrphanRecord {
        patient_id: String,
        encounter_id: String,
    },
}

// Conversion from std::io::Error
impl From<std::io::Error> for CohortError {
    fn from(err: std::io::Error) -> Self {
        CohortError::Io(err.to_string())
    }
}

// Conversion from csv::Error
impl From<csv::Error> for CohortError {
    fn from(err: csv::Error) -> Self {
        CohortError::Ingest(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for CohortError {
    fn from(err: serde_json::Error) -> Self {
        CohortError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for CohortError {
    fn from(err: toml::de::Error) -> Self {
        CohortError::Configuration(format!("TOML parse error: {err}"))
    }
}
