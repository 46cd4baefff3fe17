//! Run summary for a cohort build
//!
//! Collects counts and failures across the whole pipeline run and knows how
//! to log itself at the end.

use crate::domain::OutcomeLabel;
use serde::Serialize;
use std::time::Duration;

/// One failed per-patient partition
///
/// A structural violation aborts only the affected patient's partition;
/// the rest of the batch completes and the failure is reported here.
#[derive(Debug, Clone, Serialize)]
pub struct PartitionFailure {
    /// Patient whose partition was aborted
    pub patient_id: String,
    /// What went wrong
    pub message: String,
}

/// Summary of one cohort build run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// Patients seen in the input table
    pub total_patients: usize,
    /// Encounter rows in the exported table
    pub total_encounters: usize,
    /// Encounters labeled revisited-within-window
    pub revisited: usize,
    /// Encounters labeled not-revisited
    pub not_revisited: usize,
    /// Encounters labeled died-within-window
    pub died: usize,
    /// Encounters whose features came from the persisted cache
    pub cache_hits: usize,
    /// Per-patient partitions that failed validation
    pub failed_partitions: Vec<PartitionFailure>,
    /// Wall-clock duration of the run
    pub duration: Duration,
}

impl RunSummary {
    /// Creates an empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one assigned outcome label
    pub fn record_label(&mut self, label: OutcomeLabel) {
        match label {
            OutcomeLabel::RevisitedWithinWindow => self.revisited += 1,
            OutcomeLabel::NotRevisited => self.not_revisited += 1,
            OutcomeLabel::DiedWithinWindow => self.died += 1,
        }
    }

    /// Records a failed patient partition
    pub fn add_failure(&mut self, patient_id: impl Into<String>, message: impl Into<String>) {
        self.failed_partitions.push(PartitionFailure {
            patient_id: patient_id.into(),
            message: message.into(),
        });
    }

    /// Sets the run duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// True when every patient partition completed
    pub fn is_success(&self) -> bool {
        self.failed_partitions.is_empty()
    }

    /// Total labeled encounters across all outcome classes
    pub fn labeled_encounters(&self) -> usize {
        self.revisited + self.not_revisited + self.died
    }

    /// Logs the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_patients = self.total_patients,
            total_encounters = self.total_encounters,
            revisited = self.revisited,
            not_revisited = self.not_revisited,
            died = self.died,
            cache_hits = self.cache_hits,
            failed_partitions = self.failed_partitions.len(),
            duration_ms = self.duration.as_millis() as u64,
            "Cohort build completed"
        );

        for failure in &self.failed_partitions {
            tracing::error!(
                patient_id = %failure.patient_id,
                message = %failure.message,
                "Patient partition failed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_label_counts() {
        let mut summary = RunSummary::new();
        summary.record_label(OutcomeLabel::RevisitedWithinWindow);
        summary.record_label(OutcomeLabel::NotRevisited);
        summary.record_label(OutcomeLabel::NotRevisited);
        summary.record_label(OutcomeLabel::DiedWithinWindow);

        assert_eq!(summary.revisited, 1);
        assert_eq!(summary.not_revisited, 2);
        assert_eq!(summary.died, 1);
        assert_eq!(summary.labeled_encounters(), 4);
    }

    #[test]
    fn test_is_success() {
        let mut summary = RunSummary::new();
        assert!(summary.is_success());
        summary.add_failure("p1", "duplicate encounter");
        assert!(!summary.is_success());
        assert_eq!(summary.failed_partitions.len(), 1);
    }

    #[test]
    fn test_with_duration() {
        let summary = RunSummary::new().with_duration(Duration::from_secs(2));
        assert_eq!(summary.duration, Duration::from_secs(2));
    }
}
