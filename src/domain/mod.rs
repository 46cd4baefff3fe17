//! Domain models and types for the cohort builder.
//!
//! This module contains the core domain models, types, and business rules:
//!
//! - **Strongly-typed identifiers** ([`PatientId`], [`EncounterId`])
//! - **Domain records** ([`Encounter`], [`DispositionClass`])
//! - **Computed attributes** ([`OutcomeLabel`], [`UtilizationFeature`])
//! - **Error types** ([`CohortError`], [`TimelineError`], [`MergeError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Identifiers use the newtype pattern so patient and encounter IDs cannot
//! be swapped at a call site:
//!
//! ```rust
//! use cohort::domain::{EncounterId, PatientId};
//!
//! # fn example() -> Result<(), String> {
//! let patient_id = PatientId::new("patient-123")?;
//! let encounter_id = EncounterId::new("stay-456")?;
//!
//! // This won't compile - type safety prevents mixing IDs
//! // let wrong: PatientId = encounter_id;  // Compile error!
//! # Ok(())
//! # }
//! ```

pub mod encounter;
pub mod errors;
pub mod ids;
pub mod outcome;
pub mod result;
pub mod utilization;

// Re-export commonly used types for convenience
pub use encounter::{DispositionClass, Encounter};
pub use errors::{CohortError, MergeError, TimelineError};
pub use ids::{EncounterId, EncounterKey, PatientId};
pub use outcome::OutcomeLabel;
pub use result::Result;
pub use utilization::UtilizationFeature;
