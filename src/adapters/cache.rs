//! Persisted utilization feature cache
//!
//! Rolling-window counts are a pure function of the encounter table, so a
//! previously computed table keyed by `(patient_id, encounter_id)` may be
//! reused verbatim instead of recomputing. The cache must never be a source
//! of divergent output: a SHA-256 fingerprint of the source encounter rows
//! is stored in a sidecar file, and any mismatch makes the cache a miss, so
//! a stale cache is recomputed rather than trusted.

use crate::domain::{
    CohortError, Encounter, EncounterId, EncounterKey, PatientId, Result, UtilizationFeature,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Sidecar metadata stored next to the cache table
#[derive(Debug, Serialize, Deserialize)]
struct CacheMeta {
    /// Fingerprint of the encounter rows the cache was computed from
    fingerprint: String,
}

/// One persisted cache row
#[derive(Debug, Serialize, Deserialize)]
struct CacheRow {
    patient_id: String,
    encounter_id: String,
    prior_visit_count: u32,
    prior_admission_count: u32,
}

/// Computes the fingerprint of the source encounter rows
///
/// Hashes every field that feeds the rolling-window computation, in input
/// order, so any change to the source table invalidates the cache.
pub fn fingerprint_encounters(encounters: &[Encounter]) -> String {
    let mut hasher = Sha256::new();
    for encounter in encounters {
        hasher.update(encounter.patient_id.as_str().as_bytes());
        hasher.update(b"\x1f");
        hasher.update(encounter.encounter_id.as_str().as_bytes());
        hasher.update(b"\x1f");
        hasher.update(encounter.admit_time.timestamp().to_le_bytes());
        hasher.update(encounter.discharge_time.timestamp().to_le_bytes());
        hasher.update(encounter.disposition.as_str().as_bytes());
        hasher.update(b"\x1e");
    }
    let digest = hasher.finalize();
    format!("{digest:x}")
}

/// In-memory view of a loaded utilization cache
#[derive(Debug, Default)]
pub struct UtilizationCache {
    entries: HashMap<EncounterKey, UtilizationFeature>,
}

impl UtilizationCache {
    /// Loads a cache table if present and still valid
    ///
    /// Returns `Ok(None)` when the table or its sidecar is missing (cold
    /// start) or when the stored fingerprint doesn't match
    /// `expected_fingerprint` (stale cache). Both are normal, not errors.
    pub fn load(path: impl AsRef<Path>, expected_fingerprint: &str) -> Result<Option<Self>> {
        let path = path.as_ref();
        let sidecar = sidecar_path(path);
        if !path.exists() || !sidecar.exists() {
            tracing::debug!(path = %path.display(), "No utilization cache found");
            return Ok(None);
        }

        let meta: CacheMeta = serde_json::from_str(&std::fs::read_to_string(&sidecar)?)?;
        if meta.fingerprint != expected_fingerprint {
            tracing::info!(
                path = %path.display(),
                "Utilization cache is stale, recomputing"
            );
            return Ok(None);
        }

        let mut reader = csv::Reader::from_path(path).map_err(|e| {
            CohortError::Cache(format!("cannot open cache table {}: {e}", path.display()))
        })?;

        let mut entries = HashMap::new();
        for row in reader.deserialize() {
            let row: CacheRow = row.map_err(|e| CohortError::Cache(e.to_string()))?;
            entries.insert(
                (
                    PatientId::new(row.patient_id).map_err(CohortError::Cache)?,
                    EncounterId::new(row.encounter_id).map_err(CohortError::Cache)?,
                ),
                UtilizationFeature::new(row.prior_visit_count, row.prior_admission_count),
            );
        }

        tracing::info!(
            path = %path.display(),
            entries = entries.len(),
            "Loaded utilization cache"
        );
        Ok(Some(Self { entries }))
    }

    /// Persists a computed utilization table with its fingerprint sidecar
    ///
    /// Rows are written in key order so repeated stores of the same data
    /// produce byte-identical files.
    pub fn store(
        path: impl AsRef<Path>,
        fingerprint: &str,
        entries: &HashMap<EncounterKey, UtilizationFeature>,
    ) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let ordered: BTreeMap<&EncounterKey, &UtilizationFeature> = entries.iter().collect();

        let mut writer = csv::Writer::from_path(path).map_err(|e| {
            CohortError::Cache(format!("cannot create cache table {}: {e}", path.display()))
        })?;
        for ((patient_id, encounter_id), feature) in ordered {
            writer
                .serialize(CacheRow {
                    patient_id: patient_id.to_string(),
                    encounter_id: encounter_id.to_string(),
                    prior_visit_count: feature.prior_visit_count,
                    prior_admission_count: feature.prior_admission_count,
                })
                .map_err(|e| CohortError::Cache(e.to_string()))?;
        }
        writer.flush().map_err(|e| CohortError::Cache(e.to_string()))?;

        let meta = CacheMeta {
            fingerprint: fingerprint.to_string(),
        };
        std::fs::write(sidecar_path(path), serde_json::to_string_pretty(&meta)?)?;

        tracing::info!(
            path = %path.display(),
            entries = entries.len(),
            "Stored utilization cache"
        );
        Ok(())
    }

    /// Looks up the cached feature pair for one encounter
    pub fn get(&self, key: &EncounterKey) -> Option<UtilizationFeature> {
        self.entries.get(key).copied()
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn sidecar_path(path: &Path) -> PathBuf {
    path.with_extension("meta.json")
}
