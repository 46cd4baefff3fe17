//! Cohort build orchestration

pub mod coordinator;
pub mod summary;

pub use coordinator::CohortCoordinator;
pub use summary::{PartitionFailure, RunSummary};
