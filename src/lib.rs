// Cohort - ED Revisit Cohort Builder
// Copyright (c) 2025 Cohort Contributors
// Licensed under the MIT License

//! # Cohort - ED Revisit Cohort Builder
//!
//! Cohort is a batch feature-engineering tool built in Rust that labels
//! emergency department encounters with short-term revisit outcomes and
//! attaches trailing-window utilization features, producing an augmented
//! cohort table for downstream risk modeling.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Ordering** encounters into per-patient timelines sorted by arrival time
//! - **Labeling** each encounter as revisited, not revisited, or died within a
//!   follow-up window (72 hours by default)
//! - **Counting** prior visits and prior admissions over a trailing window
//!   (365 days by default) with an amortized two-pointer sweep
//! - **Merging** labels and features back onto the encounter rows with a
//!   strict one-to-one join
//!
//! ## Architecture
//!
//! Cohort follows a layered architecture:
//!
//! - [`core`] - Business logic (timelines, classification, rolling windows, merge)
//! - [`adapters`] - External integrations (CSV tables, utilization cache)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cohort::config::load_config;
//! use cohort::core::CohortCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load configuration
//!     let config = load_config("cohort.toml")?;
//!
//!     // Create the pipeline coordinator
//!     let coordinator = CohortCoordinator::new(config);
//!
//!     // Execute the run
//!     let summary = coordinator.run().await?;
//!
//!     println!("Labeled {} encounters", summary.total_encounters);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Cohort uses the [`domain::CohortError`] type for all errors:
//!
//! ```rust,no_run
//! use cohort::domain::CohortError;
//!
//! fn example() -> Result<(), CohortError> {
//!     // Errors are automatically converted using the ? operator
//!     let config = cohort::config::load_config("cohort.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Cohort uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn, error};
//!
//! info!("Starting run");
//! warn!(patient_id = "p-042", "Timeline validation failed");
//! error!(error = ?std::io::Error::other("boom"), "Run failed");
//! ```

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
