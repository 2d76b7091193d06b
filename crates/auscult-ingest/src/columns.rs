//! Column-synonym resolution.
//!
//! Source files name the same field many ways (and in two languages).
//! Each canonical field carries an ordered list of accepted header
//! synonyms; resolution happens once per table into a fixed field→column
//! index, which is then treated as a static schema for that table's scan.

use std::collections::HashMap;

/// Canonical fields a tabular source can supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    PatientId,
    Age,
    Gender,
    Duration,
    SampleRate,
    BitDepth,
    FilterMode,
    Location,
    Filename,
    Diagnosis,
    Date,
    Hospital,
}

/// Accepted header synonyms per canonical field, in priority order.
/// Matching is case-insensitive; the first synonym present in the table
/// wins.
const SYNONYMS: &[(CanonicalField, &[&str])] = &[
    (
        CanonicalField::Age,
        &["age", "edad"],
    ),
    (
        CanonicalField::Duration,
        &["duration", "duration_s", "length", "seconds", "duracion", "duración"],
    ),
    (
        CanonicalField::Gender,
        &["gender", "sex", "genero", "género"],
    ),
    (
        CanonicalField::PatientId,
        &["patient_id", "patient", "pid", "id_paciente", "paciente"],
    ),
    (
        CanonicalField::Diagnosis,
        &["diagnosis", "label", "condition", "diagnostico", "diagnóstico"],
    ),
    (
        CanonicalField::Filename,
        &["filename", "file", "wav", "name", "archivo"],
    ),
    (
        CanonicalField::Location,
        &["location", "body_location", "auscultation_site", "site", "ubicacion", "ubicación"],
    ),
    (
        CanonicalField::Date,
        &["recording_date", "date", "datetime", "timestamp", "fecha"],
    ),
    (
        CanonicalField::SampleRate,
        &["sample_rate", "samplerate", "fs", "sample_rate_hz"],
    ),
    (
        CanonicalField::BitDepth,
        &["bit_depth", "bits"],
    ),
    (
        CanonicalField::FilterMode,
        &["filter_mode", "filter"],
    ),
    (
        CanonicalField::Hospital,
        &["site", "hospital", "clinic", "center", "centro", "sede"],
    ),
];

/// Field→column-index map resolved once for one table.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    indices: HashMap<CanonicalField, usize>,
}

impl ColumnMap {
    /// Resolve a table's headers against the synonym lists.
    pub fn resolve(headers: &[String]) -> Self {
        let mut by_lower: HashMap<String, usize> = HashMap::new();
        for (index, header) in headers.iter().enumerate() {
            by_lower
                .entry(header.trim().to_lowercase())
                .or_insert(index);
        }

        let mut indices = HashMap::new();
        for (field, synonyms) in SYNONYMS {
            if let Some(index) = synonyms.iter().find_map(|name| by_lower.get(*name)) {
                indices.insert(*field, *index);
            }
        }
        Self { indices }
    }

    /// Whether the table supplies this field at all.
    pub fn has(&self, field: CanonicalField) -> bool {
        self.indices.contains_key(&field)
    }

    /// Raw cell value for a field in one row, if the column resolved and
    /// the row is long enough.
    pub fn cell<'a>(&self, row: &'a [String], field: CanonicalField) -> Option<&'a str> {
        let index = self.indices.get(&field)?;
        row.get(*index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn resolves_english_headers_case_insensitively() {
        let map = ColumnMap::resolve(&headers(&["Patient_ID", "AGE", "Gender"]));
        let row = vec!["P123".to_string(), "34".to_string(), "m".to_string()];
        assert_eq!(map.cell(&row, CanonicalField::PatientId), Some("P123"));
        assert_eq!(map.cell(&row, CanonicalField::Age), Some("34"));
        assert_eq!(map.cell(&row, CanonicalField::Gender), Some("m"));
    }

    #[test]
    fn resolves_spanish_synonyms() {
        let map = ColumnMap::resolve(&headers(&["paciente", "edad", "genero", "fecha", "sede"]));
        assert!(map.has(CanonicalField::PatientId));
        assert!(map.has(CanonicalField::Age));
        assert!(map.has(CanonicalField::Gender));
        assert!(map.has(CanonicalField::Date));
        assert!(map.has(CanonicalField::Hospital));
    }

    #[test]
    fn earlier_synonyms_win() {
        // Both "recording_date" and "date" present; "recording_date" is
        // the higher-priority synonym.
        let map = ColumnMap::resolve(&headers(&["date", "recording_date"]));
        let row = vec!["wrong".to_string(), "2023-01-01".to_string()];
        assert_eq!(map.cell(&row, CanonicalField::Date), Some("2023-01-01"));
    }

    #[test]
    fn site_column_serves_both_location_and_hospital() {
        let map = ColumnMap::resolve(&headers(&["site"]));
        assert!(map.has(CanonicalField::Location));
        assert!(map.has(CanonicalField::Hospital));
    }

    #[test]
    fn short_rows_yield_no_cell() {
        let map = ColumnMap::resolve(&headers(&["patient_id", "age"]));
        let row = vec!["P123".to_string()];
        assert_eq!(map.cell(&row, CanonicalField::Age), None);
    }

    #[test]
    fn unresolved_fields_are_absent() {
        let map = ColumnMap::resolve(&headers(&["unrelated", "columns"]));
        assert!(!map.has(CanonicalField::PatientId));
        assert_eq!(map.cell(&["x".to_string()], CanonicalField::Gender), None);
    }
}
