//! Canonical record types produced by the ingestion pipeline.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Rendering used wherever a timestamp participates in identity or export.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Canonical string form of an optional timestamp.
///
/// Missing timestamps render as the fixed token `none` so that identity
/// hashing stays a total function of the record triple.
pub fn timestamp_token(timestamp: Option<NaiveDateTime>) -> String {
    match timestamp {
        Some(ts) => ts.format(TIMESTAMP_FORMAT).to_string(),
        None => "none".to_string(),
    }
}

/// Normalized gender, closed set. Absence means unknown/unrecognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    M,
    F,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::M => "M",
            Self::F => "F",
        }
    }
}

/// The single merged representation of one physical recording after
/// tabular and audio evidence are reconciled.
///
/// `recording_id` is a pure function of (`source_name`, `file_path`,
/// `timestamp`); identical triples always collapse to the same id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalAudioRecord {
    pub recording_id: String,
    pub patient_id: Option<String>,
    /// Best available estimate of the recording time.
    pub timestamp: Option<NaiveDateTime>,
    pub duration_seconds: Option<f64>,
    pub sample_rate: Option<i64>,
    pub bit_depth: Option<i64>,
    pub filter_mode: Option<String>,
    pub recording_location: Option<String>,
    /// Basename of the audio file, never a full path.
    pub file_path: Option<String>,
    pub diagnosis: Option<String>,
    pub age: Option<f64>,
    pub gender: Option<Gender>,
    pub hospital_site: Option<String>,
    /// Top-level partition under the input root.
    pub source_name: String,
    /// Full originating path. Provenance only, not exported downstream.
    pub origin: String,
}

impl CanonicalAudioRecord {
    /// Count of populated fields, used to rank duplicate rows by
    /// informational completeness. Counts every exported column the way
    /// the dedupe stage compares them; `recording_id`, `source_name` and
    /// `origin` are always present and counted uniformly.
    pub fn non_missing_fields(&self) -> usize {
        let mut count = 3; // recording_id, source_name, origin
        count += usize::from(self.patient_id.is_some());
        count += usize::from(self.timestamp.is_some());
        count += usize::from(self.duration_seconds.is_some());
        count += usize::from(self.sample_rate.is_some());
        count += usize::from(self.bit_depth.is_some());
        count += usize::from(self.filter_mode.is_some());
        count += usize::from(self.recording_location.is_some());
        count += usize::from(self.file_path.is_some());
        count += usize::from(self.diagnosis.is_some());
        count += usize::from(self.age.is_some());
        count += usize::from(self.gender.is_some());
        count += usize::from(self.hospital_site.is_some());
        count
    }

    /// A record with no file path, no sample rate and no timestamp carries
    /// no usable information and is dropped by the cleanup stage.
    pub fn is_vacuous(&self) -> bool {
        self.file_path.is_none() && self.sample_rate.is_none() && self.timestamp.is_none()
    }
}

/// One row per distinct patient observed in the canonical set.
///
/// Derived, not separately persisted as identity; recomputed each run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientDemographic {
    pub patient_id: String,
    /// Maximum observed age across the patient's recordings.
    pub age: Option<f64>,
    /// First non-missing value when records are ordered by timestamp.
    pub gender: Option<Gender>,
    /// First non-missing value when records are ordered by timestamp.
    pub hospital_site: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn empty_record() -> CanonicalAudioRecord {
        CanonicalAudioRecord {
            recording_id: "id".to_string(),
            patient_id: None,
            timestamp: None,
            duration_seconds: None,
            sample_rate: None,
            bit_depth: None,
            filter_mode: None,
            recording_location: None,
            file_path: None,
            diagnosis: None,
            age: None,
            gender: None,
            hospital_site: None,
            source_name: "root".to_string(),
            origin: "/tmp/x.csv".to_string(),
        }
    }

    #[test]
    fn vacuous_record_detected() {
        let mut record = empty_record();
        assert!(record.is_vacuous());
        record.sample_rate = Some(44_100);
        assert!(!record.is_vacuous());
    }

    #[test]
    fn non_missing_fields_ranks_completeness() {
        let sparse = empty_record();
        let mut full = empty_record();
        full.patient_id = Some("P123".to_string());
        full.sample_rate = Some(48_000);
        assert!(full.non_missing_fields() > sparse.non_missing_fields());
    }

    #[test]
    fn timestamp_token_is_iso() {
        let ts = NaiveDate::from_ymd_opt(2023, 5, 17)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(timestamp_token(Some(ts)), "2023-05-17T10:30:00");
    }
}
