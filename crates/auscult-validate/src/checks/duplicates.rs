//! Set-level possible-duplicate detection.
//!
//! A softer, cross-field signal than the cleanup stage's exact-key
//! dedup: records that survived dedup but plausibly describe the same
//! physical recording under slightly different metadata. The composite
//! key falls back from patient id to the date part of the timestamp,
//! which can under-detect (sub-day timestamp differences) or over-detect
//! (distinct patients sharing a date and file name); that behavior is
//! inherited and kept as-is.

use std::collections::HashMap;

use auscult_model::{CanonicalAudioRecord, DataQualityIssue, IssueType, Severity};

const DETAIL: &str = "same (source,file + patient_id|date)";

/// Composite key for one record, when it qualifies for the check.
fn duplicate_key(record: &CanonicalAudioRecord) -> Option<(String, String, String)> {
    let file_path = record.file_path.as_ref()?;
    let discriminant = match &record.patient_id {
        Some(patient_id) => patient_id.clone(),
        None => record.timestamp?.date().to_string(),
    };
    Some((
        record.source_name.clone(),
        file_path.clone(),
        discriminant,
    ))
}

pub fn check(records: &[CanonicalAudioRecord]) -> Vec<DataQualityIssue> {
    let mut group_sizes: HashMap<(String, String, String), usize> = HashMap::new();
    for record in records {
        if let Some(key) = duplicate_key(record) {
            *group_sizes.entry(key).or_insert(0) += 1;
        }
    }

    records
        .iter()
        .filter(|record| {
            duplicate_key(record)
                .and_then(|key| group_sizes.get(&key))
                .is_some_and(|&size| size >= 2)
        })
        .map(|record| DataQualityIssue {
            recording_id: record.recording_id.clone(),
            issue_type: IssueType::PossibleDuplicate,
            detail: DETAIL.to_string(),
            severity: Severity::Warning,
        })
        .collect()
}
