//! Missing-field checks.
//!
//! A record without a file path or sample rate cannot be trusted at all;
//! a missing patient id or timestamp is tolerable but notable.

use auscult_model::{CanonicalAudioRecord, DataQualityIssue, IssueType, Severity};

/// Critical fields reported as errors when absent.
fn critical(record: &CanonicalAudioRecord) -> [(&'static str, bool); 2] {
    [
        ("file_path", record.file_path.is_none()),
        ("sample_rate", record.sample_rate.is_none()),
    ]
}

/// Tolerable fields reported as warnings when absent.
fn tolerable(record: &CanonicalAudioRecord) -> [(&'static str, bool); 2] {
    [
        ("patient_id", record.patient_id.is_none()),
        ("timestamp", record.timestamp.is_none()),
    ]
}

pub fn check(record: &CanonicalAudioRecord) -> Vec<DataQualityIssue> {
    let mut issues = Vec::new();
    for (field, is_missing) in critical(record) {
        if is_missing {
            issues.push(DataQualityIssue {
                recording_id: record.recording_id.clone(),
                issue_type: IssueType::MissingField,
                detail: field.to_string(),
                severity: Severity::Error,
            });
        }
    }
    for (field, is_missing) in tolerable(record) {
        if is_missing {
            issues.push(DataQualityIssue {
                recording_id: record.recording_id.clone(),
                issue_type: IssueType::MissingField,
                detail: field.to_string(),
                severity: Severity::Warning,
            });
        }
    }
    issues
}
