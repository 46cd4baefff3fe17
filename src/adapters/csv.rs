//! CSV table ingestion and export
//!
//! The ingestion side turns raw CSV rows into typed domain records: string
//! timestamps become `chrono` UTC datetimes, raw disposition strings are
//! bucketed into [`DispositionClass`], and stays with a non-positive length
//! of stay are dropped (with a warning) before they can reach the core.
//! The export side writes the original encounter rows back out augmented
//! with the outcome label and utilization counts.

use crate::core::merge::LabeledEncounter;
use crate::domain::{
    CohortError, DispositionClass, Encounter, EncounterId, PatientId, Result,
};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::Path;

/// Raw encounter row as it appears in the source CSV
#[derive(Debug, Deserialize)]
struct EncounterRow {
    patient_id: String,
    encounter_id: String,
    admit_time: String,
    discharge_time: String,
    disposition: String,
}

/// Raw death-record row; `death_time` is nullable in the source table
#[derive(Debug, Deserialize)]
struct DeathRow {
    patient_id: String,
    death_time: Option<String>,
}

/// Augmented output row: the original encounter plus computed columns
#[derive(Debug, Serialize)]
struct CohortRow<'a> {
    patient_id: &'a str,
    encounter_id: &'a str,
    admit_time: String,
    discharge_time: String,
    disposition: &'a str,
    length_of_stay_hours: f64,
    outcome_label: &'a str,
    prior_visit_count: u32,
    prior_admission_count: u32,
}

/// Parses a source timestamp
///
/// Accepts RFC 3339 (`2024-03-01T08:00:00Z`) and the space-separated form
/// common in clinical extracts (`2024-03-01 08:00:00`, assumed UTC).
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .map_err(|e| CohortError::Ingest(format!("invalid timestamp {raw:?}: {e}")))?;
    Ok(Utc.from_utc_datetime(&naive))
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Reads the encounter table from CSV
///
/// Expected columns: `patient_id, encounter_id, admit_time, discharge_time,
/// disposition`. Rows whose length of stay is not strictly positive are
/// dropped here, before the core ever sees them.
pub fn read_encounters(path: impl AsRef<Path>) -> Result<Vec<Encounter>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        CohortError::Ingest(format!("cannot open encounter table {}: {e}", path.display()))
    })?;

    let mut encounters = Vec::new();
    let mut dropped_non_positive_los = 0usize;

    for row in reader.deserialize() {
        let row: EncounterRow = row?;
        let encounter = Encounter::new(
            PatientId::new(row.patient_id).map_err(CohortError::Ingest)?,
            EncounterId::new(row.encounter_id).map_err(CohortError::Ingest)?,
            parse_timestamp(&row.admit_time)?,
            parse_timestamp(&row.discharge_time)?,
            DispositionClass::from_raw(&row.disposition),
        );

        if encounter.discharge_time <= encounter.admit_time {
            tracing::warn!(
                patient_id = %encounter.patient_id,
                encounter_id = %encounter.encounter_id,
                "Dropping encounter with non-positive length of stay"
            );
            dropped_non_positive_los += 1;
            continue;
        }

        encounters.push(encounter);
    }

    tracing::info!(
        path = %path.display(),
        rows = encounters.len(),
        dropped_non_positive_los,
        "Loaded encounter table"
    );

    Ok(encounters)
}

/// Reads the death-record table from CSV
///
/// Expected columns: `patient_id, death_time`. Rows with an empty
/// `death_time` are skipped - a missing death record is a normal case. A
/// duplicate death record for the same patient keeps the earliest time and
/// logs a warning.
pub fn read_deaths(path: impl AsRef<Path>) -> Result<BTreeMap<PatientId, DateTime<Utc>>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        CohortError::Ingest(format!("cannot open death table {}: {e}", path.display()))
    })?;

    let mut deaths = BTreeMap::new();

    for row in reader.deserialize() {
        let row: DeathRow = row?;
        let Some(raw) = row.death_time.filter(|s| !s.trim().is_empty()) else {
            continue;
        };
        let patient_id = PatientId::new(row.patient_id).map_err(CohortError::Ingest)?;
        let death_time = parse_timestamp(&raw)?;

        match deaths.entry(patient_id) {
            Entry::Occupied(mut entry) => {
                tracing::warn!(
                    patient_id = %entry.key(),
                    "Duplicate death record, keeping the earliest"
                );
                if death_time < *entry.get() {
                    entry.insert(death_time);
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(death_time);
            }
        }
    }

    tracing::info!(
        path = %path.display(),
        patients = deaths.len(),
        "Loaded death records"
    );

    Ok(deaths)
}

/// Writes the augmented cohort table to CSV
///
/// One output row per input row, in input order, with `outcome_label`,
/// `prior_visit_count`, and `prior_admission_count` attached.
pub fn write_cohort(path: impl AsRef<Path>, rows: &[LabeledEncounter]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        CohortError::Export(format!("cannot create output table {}: {e}", path.display()))
    })?;

    for row in rows {
        let encounter = &row.encounter;
        writer
            .serialize(CohortRow {
                patient_id: encounter.patient_id.as_str(),
                encounter_id: encounter.encounter_id.as_str(),
                admit_time: format_timestamp(encounter.admit_time),
                discharge_time: format_timestamp(encounter.discharge_time),
                disposition: encounter.disposition.as_str(),
                length_of_stay_hours: encounter.length_of_stay_hours(),
                outcome_label: row.outcome.as_str(),
                prior_visit_count: row.utilization.prior_visit_count,
                prior_admission_count: row.utilization.prior_admission_count,
            })
            .map_err(|e| CohortError::Export(e.to_string()))?;
    }

    writer
        .flush()
        .map_err(|e| CohortError::Export(e.to_string()))?;

    tracing::info!(path = %path.display(), rows = rows.len(), "Wrote cohort table");
    Ok(())
}
