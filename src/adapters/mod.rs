//! External table adapters
//!
//! Ingestion, export, and the persisted utilization cache. Everything here
//! sits at the boundary of the core: the core consumes and produces typed
//! domain records and never touches files itself.

pub mod cache;
pub mod csv;

pub use self::cache::{fingerprint_encounters, UtilizationCache};
