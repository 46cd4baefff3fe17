//! Cohort coordinator - main orchestrator for the build process
//!
//! Sequences the pipeline phases: load the source tables and the optional
//! utilization cache, group encounters into per-patient timelines, fan the
//! timelines out as independent tasks (classification and rolling-window
//! aggregation never look across patients), then fan the results back in,
//! merge them onto the encounter rows, and export.
//!
//! Failure isolation is per patient: a structural violation in one
//! patient's rows aborts that partition and is reported in the summary
//! while every other partition completes.

use crate::adapters::csv as tables;
use crate::adapters::{fingerprint_encounters, UtilizationCache};
use crate::config::CohortConfig;
use crate::core::classify::classify_timeline;
use crate::core::cohort::summary::RunSummary;
use crate::core::merge::attach_labels_and_features;
use crate::core::rolling::utilization_for_timeline;
use crate::core::timeline::{group_by_patient, PatientTimeline};
use crate::domain::{
    CohortError, Encounter, EncounterId, EncounterKey, OutcomeLabel, PatientId, Result,
    UtilizationFeature,
};
use chrono::{DateTime, Duration, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;

/// Cohort build coordinator
pub struct CohortCoordinator {
    config: CohortConfig,
}

/// Labels and features computed for one patient partition
struct PartitionOutput {
    labels: Vec<(EncounterId, OutcomeLabel)>,
    features: Vec<(EncounterId, UtilizationFeature)>,
    cache_hits: usize,
}

impl CohortCoordinator {
    /// Creates a new coordinator from a validated configuration
    pub fn new(config: CohortConfig) -> Self {
        Self { config }
    }

    /// Executes the cohort build
    ///
    /// Phases:
    /// 1. Load encounters, death records, and (if enabled) the cache
    /// 2. Group encounters by patient
    /// 3. Per patient: validate timeline, classify outcomes, compute or
    ///    look up utilization features
    /// 4. Merge labels/features onto the encounter rows
    /// 5. Persist the cache (when freshly computed) and export the table
    pub async fn run(&self) -> Result<RunSummary> {
        let started = Instant::now();
        let follow_up = Duration::hours(self.config.windows.follow_up_hours);
        let trailing = Duration::days(self.config.windows.trailing_days);

        // Load phase: all file acquisition happens before computation
        let encounters = tables::read_encounters(&self.config.input.encounters_path)?;
        let deaths = tables::read_deaths(&self.config.input.deaths_path)?;
        let fingerprint = fingerprint_encounters(&encounters);
        let cache: Option<Arc<UtilizationCache>> = if self.config.cache.enabled {
            UtilizationCache::load(&self.config.cache.path, &fingerprint)?.map(Arc::new)
        } else {
            None
        };
        let cache_was_loaded = cache.is_some();

        let groups = group_by_patient(encounters.clone());
        let mut summary = RunSummary::new();
        summary.total_patients = groups.len();

        tracing::info!(
            patients = groups.len(),
            encounters = encounters.len(),
            cache_loaded = cache_was_loaded,
            "Starting cohort build"
        );

        // Fan out: one task per patient, no shared mutable state
        let mut tasks: JoinSet<(PatientId, Result<PartitionOutput>)> = JoinSet::new();
        for (patient_id, rows) in groups {
            let death_time = deaths.get(&patient_id).copied();
            let cache = cache.clone();
            tasks.spawn(async move {
                let output =
                    process_patient(&patient_id, rows, death_time, follow_up, trailing, cache);
                (patient_id, output)
            });
        }

        // Fan in
        let mut labels: HashMap<EncounterKey, OutcomeLabel> = HashMap::new();
        let mut features: HashMap<EncounterKey, UtilizationFeature> = HashMap::new();
        let mut failed: HashSet<PatientId> = HashSet::new();

        while let Some(joined) = tasks.join_next().await {
            let (patient_id, output) =
                joined.map_err(|e| CohortError::Other(format!("patient task panicked: {e}")))?;
            match output {
                Ok(partition) => {
                    summary.cache_hits += partition.cache_hits;
                    for (encounter_id, label) in partition.labels {
                        summary.record_label(label);
                        labels.insert((patient_id.clone(), encounter_id), label);
                    }
                    for (encounter_id, feature) in partition.features {
                        features.insert((patient_id.clone(), encounter_id), feature);
                    }
                }
                Err(e) => {
                    tracing::error!(
                        patient_id = %patient_id,
                        error = %e,
                        "Aborting patient partition"
                    );
                    summary.add_failure(patient_id.to_string(), e.to_string());
                    failed.insert(patient_id);
                }
            }
        }

        // Merge phase: original row order, failed partitions excluded
        let merge_rows: Vec<Encounter> = encounters
            .into_iter()
            .filter(|e| !failed.contains(&e.patient_id))
            .collect();
        summary.total_encounters = merge_rows.len();
        let labeled = attach_labels_and_features(merge_rows, &labels, &features)?;

        // Persist the cache only when this run computed features fresh
        if self.config.cache.enabled && !cache_was_loaded {
            UtilizationCache::store(&self.config.cache.path, &fingerprint, &features)?;
        }

        tables::write_cohort(&self.config.output.path, &labeled)?;

        let summary = summary.with_duration(started.elapsed());
        summary.log_summary();
        Ok(summary)
    }
}

/// Processes one patient partition
///
/// Builds and validates the timeline, classifies every encounter, and
/// computes utilization features - or takes them from the cache when every
/// encounter of the patient is covered. A partial cache hit recomputes the
/// whole patient so cached and fresh values can never mix.
fn process_patient(
    patient_id: &PatientId,
    rows: Vec<Encounter>,
    death_time: Option<DateTime<Utc>>,
    follow_up: Duration,
    trailing: Duration,
    cache: Option<Arc<UtilizationCache>>,
) -> Result<PartitionOutput> {
    let timeline = PatientTimeline::build(patient_id.clone(), rows, death_time)?;
    let labels = classify_timeline(&timeline, follow_up);

    let cached_features = cache.as_deref().and_then(|cache| {
        timeline
            .encounters()
            .iter()
            .map(|e| cache.get(&e.key()).map(|f| (e.encounter_id.clone(), f)))
            .collect::<Option<Vec<_>>>()
    });

    let (features, cache_hits) = match cached_features {
        Some(features) => {
            let hits = features.len();
            (features, hits)
        }
        None => (utilization_for_timeline(&timeline, trailing), 0),
    };

    Ok(PartitionOutput {
        labels,
        features,
        cache_hits,
    })
}
