//! Output-table serialization.
//!
//! Consumes the core's tables unchanged: every column keeps the
//! semantics defined by the data model, timestamps render in the
//! canonical ISO form, and missing values become empty cells. The
//! provenance column (`origin`) is never exported.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::Writer;
use tracing::info;

use auscult_model::{
    CanonicalAudioRecord, DataQualityIssue, PatientDemographic, TIMESTAMP_FORMAT,
};

/// Paths of the three written tables.
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub audio: PathBuf,
    pub patients: PathBuf,
    pub issues: PathBuf,
}

const AUDIO_HEADERS: &[&str] = &[
    "recording_id",
    "patient_id",
    "timestamp",
    "duration_seconds",
    "sample_rate",
    "bit_depth",
    "filter_mode",
    "recording_location",
    "file_path",
    "diagnosis",
    "age",
    "gender",
    "hospital_site",
    "source_name",
];

/// Write the three output tables under `outdir`, creating it as needed.
pub fn save_outputs(
    audio: &[CanonicalAudioRecord],
    patients: &[PatientDemographic],
    issues: &[DataQualityIssue],
    outdir: &Path,
) -> Result<OutputPaths> {
    std::fs::create_dir_all(outdir)
        .with_context(|| format!("creating output directory {}", outdir.display()))?;

    let paths = OutputPaths {
        audio: outdir.join("audio_recordings.csv"),
        patients: outdir.join("patient_demographics.csv"),
        issues: outdir.join("data_quality_report.csv"),
    };

    write_audio_table(audio, &paths.audio)?;
    write_patient_table(patients, &paths.patients)?;
    write_issue_table(issues, &paths.issues)?;

    info!(
        audio = audio.len(),
        patients = patients.len(),
        issues = issues.len(),
        outdir = %outdir.display(),
        "outputs written"
    );
    Ok(paths)
}

/// Write the audio table split by the date part of `timestamp` into
/// `date=<YYYY-MM-DD>` chunks; records without a timestamp land in
/// `date=unknown`.
pub fn write_partitions(audio: &[CanonicalAudioRecord], outdir: &Path) -> Result<Vec<PathBuf>> {
    let mut by_date: BTreeMap<String, Vec<&CanonicalAudioRecord>> = BTreeMap::new();
    for record in audio {
        let date = record
            .timestamp
            .map_or_else(|| "unknown".to_string(), |ts| ts.date().to_string());
        by_date.entry(date).or_default().push(record);
    }

    let mut written = Vec::new();
    for (date, chunk) in by_date {
        let dir = outdir.join(format!("date={date}"));
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("creating partition directory {}", dir.display()))?;
        let path = dir.join("audio_recordings.csv");
        let mut writer = open_writer(&path)?;
        writer.write_record(AUDIO_HEADERS)?;
        for record in chunk {
            writer.write_record(audio_row(record))?;
        }
        writer.flush()?;
        written.push(path);
    }
    info!(partitions = written.len(), "date partitions written");
    Ok(written)
}

fn write_audio_table(audio: &[CanonicalAudioRecord], path: &Path) -> Result<()> {
    let mut writer = open_writer(path)?;
    writer.write_record(AUDIO_HEADERS)?;
    for record in audio {
        writer.write_record(audio_row(record))?;
    }
    writer.flush().context("flushing audio table")
}

fn audio_row(record: &CanonicalAudioRecord) -> Vec<String> {
    vec![
        record.recording_id.clone(),
        text(record.patient_id.as_deref()),
        timestamp(record),
        float(record.duration_seconds),
        integer(record.sample_rate),
        integer(record.bit_depth),
        text(record.filter_mode.as_deref()),
        text(record.recording_location.as_deref()),
        text(record.file_path.as_deref()),
        text(record.diagnosis.as_deref()),
        float(record.age),
        record.gender.map(|g| g.as_str()).unwrap_or("").to_string(),
        text(record.hospital_site.as_deref()),
        record.source_name.clone(),
    ]
}

fn write_patient_table(patients: &[PatientDemographic], path: &Path) -> Result<()> {
    let mut writer = open_writer(path)?;
    writer.write_record(["patient_id", "age", "gender", "hospital_site"])?;
    for patient in patients {
        writer.write_record([
            patient.patient_id.clone(),
            float(patient.age),
            patient.gender.map(|g| g.as_str()).unwrap_or("").to_string(),
            text(patient.hospital_site.as_deref()),
        ])?;
    }
    writer.flush().context("flushing patient table")
}

fn write_issue_table(issues: &[DataQualityIssue], path: &Path) -> Result<()> {
    let mut writer = open_writer(path)?;
    writer.write_record(["recording_id", "issue_type", "detail", "severity"])?;
    for issue in issues {
        writer.write_record([
            issue.recording_id.as_str(),
            issue.issue_type.as_str(),
            issue.detail.as_str(),
            issue.severity.label(),
        ])?;
    }
    writer.flush().context("flushing issue table")
}

fn open_writer(path: &Path) -> Result<Writer<std::fs::File>> {
    Writer::from_path(path).with_context(|| format!("creating {}", path.display()))
}

fn text(value: Option<&str>) -> String {
    value.unwrap_or("").to_string()
}

fn float(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn integer(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn timestamp(record: &CanonicalAudioRecord) -> String {
    record
        .timestamp
        .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}
