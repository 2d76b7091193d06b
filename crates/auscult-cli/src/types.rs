//! Result types reported by a pipeline run.

use auscult_core::IngestSummary;
use auscult_report::OutputPaths;

/// Deduplicated record count for one input partition.
#[derive(Debug, Clone)]
pub struct SourceCount {
    pub source: String,
    pub records: usize,
}

/// Issue totals by severity.
#[derive(Debug, Clone, Copy, Default)]
pub struct IssueCounts {
    pub errors: usize,
    pub warnings: usize,
    pub notes: usize,
}

/// Everything a finished run reports back to the user.
#[derive(Debug)]
pub struct PipelineResult {
    pub ingest: IngestSummary,
    /// Canonical recordings after cleanup and dedup.
    pub recordings: usize,
    pub patients: usize,
    pub sources: Vec<SourceCount>,
    pub issues: IssueCounts,
    /// Written table paths; absent on a dry run.
    pub outputs: Option<OutputPaths>,
    /// Number of date partitions written, when requested.
    pub partitions: Option<usize>,
}
