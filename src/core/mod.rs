//! Core business logic
//!
//! The temporal cohort-labeling and rolling-window feature engine:
//!
//! - [`timeline`] - per-patient ordered event timelines
//! - [`classify`] - outcome labeling over a follow-up window
//! - [`rolling`] - trailing-window utilization counts
//! - [`merge`] - joining computed attributes back onto encounter rows
//! - [`cohort`] - the pipeline coordinator and its run summary

pub mod classify;
pub mod cohort;
pub mod merge;
pub mod rolling;
pub mod timeline;

pub use cohort::{CohortCoordinator, PartitionFailure, RunSummary};
