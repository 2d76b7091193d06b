//! Normalization/split stage: per-patient demographic aggregation.
//!
//! The audio export is the canonical set itself (minus the provenance
//! column, which the report writer omits); demographics are recomputed
//! from it on every run.

use std::collections::BTreeMap;

use tracing::info;

use auscult_model::{CanonicalAudioRecord, PatientDemographic};

/// Aggregate one demographic row per distinct non-missing patient id.
///
/// Records are ordered by timestamp ascending (missing timestamps last);
/// age is the maximum observed, gender and hospital site the first
/// non-missing values in that order. Output is sorted by patient id.
pub fn patient_demographics(records: &[CanonicalAudioRecord]) -> Vec<PatientDemographic> {
    let mut by_patient: BTreeMap<String, Vec<&CanonicalAudioRecord>> = BTreeMap::new();
    for record in records {
        if let Some(patient_id) = &record.patient_id {
            by_patient.entry(patient_id.clone()).or_default().push(record);
        }
    }

    let demographics: Vec<PatientDemographic> = by_patient
        .into_iter()
        .map(|(patient_id, mut group)| {
            // Stable sort keeps ingestion order among equal timestamps.
            group.sort_by_key(|record| (record.timestamp.is_none(), record.timestamp));
            PatientDemographic {
                patient_id,
                age: group
                    .iter()
                    .filter_map(|record| record.age)
                    .fold(None, |max: Option<f64>, age| {
                        Some(max.map_or(age, |m| m.max(age)))
                    }),
                gender: group.iter().find_map(|record| record.gender),
                hospital_site: group
                    .iter()
                    .find_map(|record| record.hospital_site.clone()),
            }
        })
        .collect();

    info!(patients = demographics.len(), "aggregated demographics");
    demographics
}

#[cfg(test)]
mod tests {
    use super::*;
    use auscult_model::Gender;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(2023, 1, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
    }

    fn record(patient: Option<&str>, day: Option<u32>) -> CanonicalAudioRecord {
        CanonicalAudioRecord {
            recording_id: "id".to_string(),
            patient_id: patient.map(String::from),
            timestamp: day.and_then(at),
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
            source_name: "a".to_string(),
            origin: String::new(),
        }
    }

    #[test]
    fn age_is_the_maximum_observed() {
        let mut older = record(Some("P1"), Some(2));
        older.age = Some(34.0);
        let mut younger = record(Some("P1"), Some(1));
        younger.age = Some(29.0);

        // Insertion order deliberately newest-first.
        let rows = patient_demographics(&[older, younger]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].age, Some(34.0));
    }

    #[test]
    fn gender_and_site_come_from_earliest_non_missing() {
        let mut late = record(Some("P1"), Some(5));
        late.gender = Some(Gender::M);
        late.hospital_site = Some("late_site".to_string());
        let mut early_blank = record(Some("P1"), Some(1));
        early_blank.hospital_site = None;
        let mut middle = record(Some("P1"), Some(3));
        middle.gender = Some(Gender::F);
        middle.hospital_site = Some("middle_site".to_string());

        let rows = patient_demographics(&[late, early_blank, middle]);
        assert_eq!(rows[0].gender, Some(Gender::F));
        assert_eq!(rows[0].hospital_site, Some("middle_site".to_string()));
    }

    #[test]
    fn missing_timestamps_sort_last() {
        let mut untimed = record(Some("P1"), None);
        untimed.gender = Some(Gender::M);
        let mut timed = record(Some("P1"), Some(1));
        timed.gender = Some(Gender::F);

        let rows = patient_demographics(&[untimed, timed]);
        assert_eq!(rows[0].gender, Some(Gender::F));
    }

    #[test]
    fn anonymous_records_contribute_no_row() {
        let rows = patient_demographics(&[record(None, Some(1))]);
        assert!(rows.is_empty());
    }

    #[test]
    fn output_is_sorted_by_patient_id() {
        let rows = patient_demographics(&[
            record(Some("P2"), Some(1)),
            record(Some("P1"), Some(1)),
        ]);
        let ids: Vec<&str> = rows.iter().map(|r| r.patient_id.as_str()).collect();
        assert_eq!(ids, vec!["P1", "P2"]);
    }
}
