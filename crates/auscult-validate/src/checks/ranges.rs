//! Range and value rules: age, duration, sample rate.

use auscult_model::{CanonicalAudioRecord, DataQualityIssue, IssueType, Severity};

const AGE_RANGE: (f64, f64) = (0.0, 120.0);
const DURATION_RANGE_SECONDS: (f64, f64) = (2.0, 60.0);

pub fn check(record: &CanonicalAudioRecord) -> Vec<DataQualityIssue> {
    let mut issues = Vec::new();

    if let Some(age) = record.age
        && (age < AGE_RANGE.0 || age > AGE_RANGE.1)
    {
        issues.push(DataQualityIssue {
            recording_id: record.recording_id.clone(),
            issue_type: IssueType::InvalidAge,
            detail: age.to_string(),
            severity: Severity::Warning,
        });
    }

    if let Some(duration) = record.duration_seconds
        && !(duration.is_finite()
            && duration >= DURATION_RANGE_SECONDS.0
            && duration <= DURATION_RANGE_SECONDS.1)
    {
        issues.push(DataQualityIssue {
            recording_id: record.recording_id.clone(),
            issue_type: IssueType::DurationOutOfRange,
            detail: duration.to_string(),
            severity: Severity::Warning,
        });
    }

    // Fires only when the sample rate is present; a missing one is the
    // missing-field error and is not double-reported.
    if let Some(sample_rate) = record.sample_rate
        && sample_rate <= 0
    {
        issues.push(DataQualityIssue {
            recording_id: record.recording_id.clone(),
            issue_type: IssueType::InvalidSampleRate,
            detail: sample_rate.to_string(),
            severity: Severity::Error,
        });
    }

    issues
}
