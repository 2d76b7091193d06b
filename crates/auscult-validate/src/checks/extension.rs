//! File-extension check.
//!
//! A present path with an unexpected extension is tolerable (warning).
//! An absent path is the missing-field error and is not re-reported
//! here.

use auscult_model::{CanonicalAudioRecord, DataQualityIssue, IssueType, Severity};

const EXPECTED_EXTENSIONS: &[&str] = &["wav", "flac", "mp3"];

pub fn check(record: &CanonicalAudioRecord) -> Vec<DataQualityIssue> {
    let Some(file_path) = &record.file_path else {
        return Vec::new();
    };
    // A dotless name yields itself as the extension, which then fails
    // the membership test.
    let extension = file_path
        .rsplit('.')
        .next()
        .unwrap_or(file_path)
        .to_lowercase();
    if EXPECTED_EXTENSIONS.contains(&extension.as_str()) {
        return Vec::new();
    }
    vec![DataQualityIssue {
        recording_id: record.recording_id.clone(),
        issue_type: IssueType::UnexpectedExtension,
        detail: extension,
        severity: Severity::Warning,
    }]
}
