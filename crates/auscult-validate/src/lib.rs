//! Data-quality rule engine.
//!
//! Not a state machine: a pure per-record (plus one whole-set) rule
//! evaluation producing a flat issue list. The engine only reads
//! canonical records; issues are a disjoint collection and severities
//! grade how actionable a finding is.

pub mod checks;

use tracing::info;

use auscult_model::{CanonicalAudioRecord, DataQualityIssue, Severity};

/// Evaluate every rule over the canonical set.
///
/// Per-record rules run first, in record order; the set-level duplicate
/// rule appends its findings afterwards.
pub fn run_dq(records: &[CanonicalAudioRecord]) -> Vec<DataQualityIssue> {
    let mut issues = Vec::new();
    for record in records {
        issues.extend(checks::run_record_checks(record));
    }
    issues.extend(checks::duplicates::check(records));

    let count_of = |severity: Severity| issues.iter().filter(|i| i.severity == severity).count();
    info!(
        records = records.len(),
        errors = count_of(Severity::Error),
        warnings = count_of(Severity::Warning),
        notes = count_of(Severity::Note),
        "data-quality evaluation complete"
    );
    issues
}
