//! Data-quality issue types.
//!
//! Issues are append-only observations produced by the rule engine; a
//! record may have zero, one, or many.

use serde::{Deserialize, Serialize};

/// Graded importance of a data-quality finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks trust in the record.
    Error,
    /// Tolerable but notable.
    Warning,
    /// Informational only.
    Note,
}

impl Severity {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Note => "note",
        }
    }
}

/// Closed enumeration of rule findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    MissingField,
    InvalidAge,
    DurationOutOfRange,
    InvalidSampleRate,
    MissingGender,
    UnexpectedExtension,
    PossibleDuplicate,
}

impl IssueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidAge => "invalid_age",
            Self::DurationOutOfRange => "duration_out_of_range",
            Self::InvalidSampleRate => "invalid_sample_rate",
            Self::MissingGender => "missing_gender",
            Self::UnexpectedExtension => "unexpected_extension",
            Self::PossibleDuplicate => "possible_duplicate",
        }
    }
}

/// One data-quality finding against one canonical record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataQualityIssue {
    pub recording_id: String,
    pub issue_type: IssueType,
    /// Free-form context value (field name, offending value, group key).
    pub detail: String,
    pub severity: Severity,
}
