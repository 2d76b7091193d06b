pub mod issue;
pub mod record;

pub use issue::{DataQualityIssue, IssueType, Severity};
pub use record::{
    CanonicalAudioRecord, Gender, PatientDemographic, TIMESTAMP_FORMAT, timestamp_token,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_serializes() {
        let issue = DataQualityIssue {
            recording_id: "abc123".to_string(),
            issue_type: IssueType::MissingField,
            detail: "sample_rate".to_string(),
            severity: Severity::Error,
        };
        let json = serde_json::to_string(&issue).expect("serialize issue");
        let round: DataQualityIssue = serde_json::from_str(&json).expect("deserialize issue");
        assert_eq!(round.issue_type, IssueType::MissingField);
        assert_eq!(round.severity, Severity::Error);
    }

    #[test]
    fn timestamp_token_for_missing() {
        assert_eq!(timestamp_token(None), "none");
    }
}
