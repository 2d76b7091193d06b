//! Gender presence check, informational only.

use auscult_model::{CanonicalAudioRecord, DataQualityIssue, IssueType, Severity};

pub fn check(record: &CanonicalAudioRecord) -> Vec<DataQualityIssue> {
    if record.gender.is_some() {
        return Vec::new();
    }
    vec![DataQualityIssue {
        recording_id: record.recording_id.clone(),
        issue_type: IssueType::MissingGender,
        detail: "gender null or unrecognized".to_string(),
        severity: Severity::Note,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record_with;
    use auscult_model::Gender;

    #[test]
    fn missing_gender_is_a_note_never_more() {
        let issues = check(&record_with(|_| {}));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Note);
    }

    #[test]
    fn known_gender_raises_nothing() {
        assert!(check(&record_with(|r| r.gender = Some(Gender::F))).is_empty());
    }
}
