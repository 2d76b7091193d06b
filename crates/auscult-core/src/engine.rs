//! Two-pass ingestion and enrichment engine.
//!
//! Pass 1 materializes one canonical record per tabular row, with column
//! synonyms resolved per table and filename-derived values filling gaps.
//! Pass 2 walks the WAV files: a file whose basename matches existing
//! records enriches them in place through a basename index; an orphan
//! file becomes a new record built from the probe and its filename.
//!
//! Structured metadata is the higher-trust source; audio is ground truth
//! for acoustic parameters and the identity source for orphans. Existing
//! non-missing values are never overwritten.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use tracing::{debug, info};

use auscult_ingest::{
    CanonicalField, ColumnMap, DiscoveredFile, SourceKind, WavProbe, discover_sources, file_mtime,
    probe_wav, read_tables,
};
use auscult_model::CanonicalAudioRecord;

use crate::filename::{FilenameMeta, infer_patient_from_path, parse_from_filename};
use crate::identity::recording_id;
use crate::normalize::{
    blank_to_missing, norm_gender, parse_date_any, parse_integer, parse_number, parse_sample_rate,
};

/// Counters describing one ingestion run.
#[derive(Debug, Clone, Copy, Default)]
pub struct IngestSummary {
    pub tabular_files: usize,
    pub tabular_rows: usize,
    pub audio_files: usize,
    pub enriched_records: usize,
    pub orphan_records: usize,
}

/// The staging record set plus run counters.
#[derive(Debug)]
pub struct IngestOutcome {
    pub records: Vec<CanonicalAudioRecord>,
    pub summary: IngestSummary,
}

/// Ingest every recognized source under the input root.
///
/// The only fatal failure is a missing or unreadable root; individual
/// files degrade locally. The returned staging set still contains
/// vacuous rows and duplicates; see the cleanup stage.
pub fn ingest_all(input_dir: &Path) -> Result<IngestOutcome> {
    let sources = discover_sources(input_dir)?;
    let mut records: Vec<CanonicalAudioRecord> = Vec::new();
    let mut summary = IngestSummary::default();

    // Pass 1: tabular sources.
    for file in &sources {
        let SourceKind::Tabular(format) = file.kind else {
            continue;
        };
        let tables = read_tables(&file.path, format);
        if tables.is_empty() {
            continue;
        }
        summary.tabular_files += 1;
        let mut file_rows = 0usize;
        for table in &tables {
            let columns = ColumnMap::resolve(&table.headers);
            for row in &table.rows {
                records.push(build_tabular_record(file, &columns, row));
                file_rows += 1;
            }
        }
        summary.tabular_rows += file_rows;
        debug!(path = %file.path.display(), rows = file_rows, "ingested tabular source");
    }

    // Basename index over the staging arena; the audio pass patches
    // records through it instead of rebuilding the collection.
    let mut index: HashMap<String, Vec<usize>> = HashMap::new();
    for (position, record) in records.iter().enumerate() {
        if let Some(base) = &record.file_path {
            index.entry(base.clone()).or_default().push(position);
        }
    }

    // Pass 2: audio files enrich or synthesize.
    for file in &sources {
        if file.kind != SourceKind::Audio {
            continue;
        }
        summary.audio_files += 1;
        let base = basename(&file.path);
        let probe = probe_wav(&file.path);
        let meta = parse_from_filename(&base);

        if let Some(positions) = index.get(&base) {
            for &position in positions {
                enrich_record(&mut records[position], &probe, &meta);
                summary.enriched_records += 1;
            }
            continue;
        }

        let record = build_audio_record(file, base.clone(), &probe, &meta);
        index.entry(base).or_default().push(records.len());
        records.push(record);
        summary.orphan_records += 1;
    }

    info!(
        tabular_files = summary.tabular_files,
        tabular_rows = summary.tabular_rows,
        audio_files = summary.audio_files,
        enriched = summary.enriched_records,
        orphans = summary.orphan_records,
        "ingestion complete"
    );
    Ok(IngestOutcome { records, summary })
}

/// One canonical record from one tabular row.
fn build_tabular_record(
    file: &DiscoveredFile,
    columns: &ColumnMap,
    row: &[String],
) -> CanonicalAudioRecord {
    let cell = |field| {
        columns
            .cell(row, field)
            .and_then(|value| blank_to_missing(value))
    };

    let file_name = cell(CanonicalField::Filename).map(|name| basename(Path::new(&name)));
    let mut patient_id = cell(CanonicalField::PatientId);
    let mut location = cell(CanonicalField::Location);
    let mut filter_mode = cell(CanonicalField::FilterMode);
    let mut timestamp = cell(CanonicalField::Date)
        .as_deref()
        .and_then(parse_date_any);

    // Filename extraction runs only when the row itself lacks a patient
    // id; its outputs fill whatever the row left missing.
    if patient_id.is_none()
        && let Some(name) = &file_name
    {
        let meta = parse_from_filename(name);
        patient_id = meta.patient_id;
        location = location.or(meta.location);
        timestamp = timestamp.or(meta.date);
        filter_mode = meta.filter_mode.or(filter_mode);
    }

    // Last-ditch timestamp: modification time of the tabular file.
    if timestamp.is_none() {
        timestamp = file_mtime(&file.path);
    }

    // Last-ditch patient id: the full path, directories included.
    if patient_id.is_none() {
        patient_id = infer_patient_from_path(&file.path.to_string_lossy());
    }

    let hospital_site = cell(CanonicalField::Hospital).or_else(|| Some(file.source_name.clone()));

    CanonicalAudioRecord {
        recording_id: recording_id(&file.source_name, file_name.as_deref(), timestamp),
        patient_id,
        timestamp,
        duration_seconds: cell(CanonicalField::Duration)
            .as_deref()
            .and_then(parse_number),
        sample_rate: cell(CanonicalField::SampleRate)
            .as_deref()
            .and_then(parse_sample_rate),
        bit_depth: cell(CanonicalField::BitDepth)
            .as_deref()
            .and_then(parse_integer),
        filter_mode,
        recording_location: location,
        file_path: file_name,
        diagnosis: cell(CanonicalField::Diagnosis),
        age: cell(CanonicalField::Age).as_deref().and_then(parse_number),
        gender: norm_gender(cell(CanonicalField::Gender).as_deref()),
        hospital_site,
        source_name: file.source_name.clone(),
        origin: file.path.display().to_string(),
    }
}

/// Fill missing fields on an existing record from a probe and the file's
/// name; probe results first, filename values as residual fallback.
/// Present values are never overwritten.
fn enrich_record(record: &mut CanonicalAudioRecord, probe: &WavProbe, meta: &FilenameMeta) {
    if record.sample_rate.is_none() {
        record.sample_rate = probe.sample_rate;
    }
    if record.duration_seconds.is_none() {
        record.duration_seconds = probe.duration_seconds;
    }
    if record.bit_depth.is_none() {
        record.bit_depth = probe.bit_depth;
    }
    if record.timestamp.is_none() {
        record.timestamp = probe.timestamp.or(meta.date);
    }
    if record.patient_id.is_none() {
        record.patient_id = meta.patient_id.clone();
    }
    if record.recording_location.is_none() {
        record.recording_location = meta.location.clone();
    }
    if record.filter_mode.is_none() {
        record.filter_mode = meta.filter_mode.clone();
    }
}

/// A record synthesized for an orphan WAV file.
fn build_audio_record(
    file: &DiscoveredFile,
    base: String,
    probe: &WavProbe,
    meta: &FilenameMeta,
) -> CanonicalAudioRecord {
    let timestamp = probe.timestamp.or(meta.date);
    CanonicalAudioRecord {
        recording_id: recording_id(&file.source_name, Some(&base), timestamp),
        patient_id: meta.patient_id.clone(),
        timestamp,
        duration_seconds: probe.duration_seconds,
        sample_rate: probe.sample_rate,
        bit_depth: probe.bit_depth,
        filter_mode: meta.filter_mode.clone(),
        recording_location: meta.location.clone(),
        file_path: Some(base),
        diagnosis: None,
        age: None,
        gender: None,
        hospital_site: Some(file.source_name.clone()),
        source_name: file.source_name.clone(),
        origin: file.path.display().to_string(),
    }
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
