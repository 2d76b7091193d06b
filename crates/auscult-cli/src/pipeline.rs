//! Pipeline orchestration: ingest, dedupe, split, score, write.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::info;

use auscult_core::{cleanup_and_dedupe, ingest_all, patient_demographics};
use auscult_model::Severity;
use auscult_report::{save_outputs, write_partitions};
use auscult_validate::run_dq;

use crate::types::{IssueCounts, PipelineResult, SourceCount};

/// Run-shaping flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    /// Also write the audio table partitioned by recording date.
    pub partitions: bool,
    /// Skip all output writing.
    pub dry_run: bool,
}

/// Drive the full pipeline over one input directory.
///
/// A missing input directory is the single fatal error; everything else
/// degrades locally inside the stages.
pub fn run_pipeline(
    input_dir: &Path,
    output_dir: &Path,
    options: PipelineOptions,
) -> Result<PipelineResult> {
    if !input_dir.is_dir() {
        bail!("input directory does not exist: {}", input_dir.display());
    }

    let outcome = ingest_all(input_dir).context("ingestion failed")?;
    let records = cleanup_and_dedupe(outcome.records);
    let patients = patient_demographics(&records);
    let issues = run_dq(&records);
    info!(
        recordings = records.len(),
        patients = patients.len(),
        issues = issues.len(),
        "pipeline stages complete"
    );

    let outputs = if options.dry_run {
        None
    } else {
        Some(save_outputs(&records, &patients, &issues, output_dir)?)
    };
    let partitions = if options.partitions && !options.dry_run {
        let written = write_partitions(&records, &output_dir.join("partitions"))?;
        Some(written.len())
    } else {
        None
    };

    let mut by_source: BTreeMap<String, usize> = BTreeMap::new();
    for record in &records {
        *by_source.entry(record.source_name.clone()).or_insert(0) += 1;
    }

    let mut counts = IssueCounts::default();
    for issue in &issues {
        match issue.severity {
            Severity::Error => counts.errors += 1,
            Severity::Warning => counts.warnings += 1,
            Severity::Note => counts.notes += 1,
        }
    }

    Ok(PipelineResult {
        ingest: outcome.summary,
        recordings: records.len(),
        patients: patients.len(),
        sources: by_source
            .into_iter()
            .map(|(source, records)| SourceCount { source, records })
            .collect(),
        issues: counts,
        outputs,
        partitions,
    })
}
