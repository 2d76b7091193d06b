//! Filename and path metadata extraction.
//!
//! Recording filenames routinely encode a patient id, auscultation site,
//! date and stethoscope filter mode. Four independent regex scans pull
//! these out; absence of one never blocks the others. Used only when
//! structured metadata is absent.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

/// Patient-id patterns in fixed priority order; the first match wins and
/// later patterns are not tried.
static PATIENT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)(?:^|[_-])(P\d{3,6})(?:[_-]|$)",
        r"(?i)(?:^|[_-])(ID\d{3,6})(?:[_-]|$)",
        r"(?i)(?:^|[_-])(PAT\d{3,6})(?:[_-]|$)",
        r"(?i)(?:^|[_-])([A-Za-z]{0,2}\d{6,})(?:[_-]|$)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

static LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(Anterior|Posterior)[ _-]?(Left|Right)?[ _-]?(Upper|Middle|Lower)?").unwrap()
});

static EIGHT_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d{8})").unwrap());

static FILTER_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(Bell|Diaphragm|Extended)").unwrap());

static PATH_PATIENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[\\/._-])(P\d{3,6}|ID\d{3,6}|PAT\d{3,6}|[A-Za-z]{0,2}\d{6,})(?:[\\/._-]|$)")
        .unwrap()
});

/// Metadata recovered from a file's base name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilenameMeta {
    pub patient_id: Option<String>,
    pub location: Option<String>,
    pub date: Option<NaiveDateTime>,
    pub filter_mode: Option<String>,
}

/// Run all four extractions over a file base name.
pub fn parse_from_filename(name: &str) -> FilenameMeta {
    let base = name.rsplit('/').next().unwrap_or(name);

    let patient_id = PATIENT_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(base))
        .map(|captures| captures[1].to_uppercase());

    let location = LOCATION.captures(base).and_then(|captures| {
        let parts: Vec<String> = captures
            .iter()
            .skip(1)
            .flatten()
            .map(|group| capitalize(group.as_str()))
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("_"))
        }
    });

    let date = EIGHT_DIGITS
        .captures(base)
        .and_then(|captures| NaiveDate::parse_from_str(&captures[1], "%Y%m%d").ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0));

    let filter_mode = FILTER_KEYWORD
        .captures(base)
        .map(|captures| capitalize(&captures[1]));

    FilenameMeta {
        patient_id,
        location,
        date,
        filter_mode,
    }
}

/// Apply the patient-id patterns to a full path (directories included),
/// used only when the filename alone yields nothing.
pub fn infer_patient_from_path(path: &str) -> Option<String> {
    PATH_PATIENT
        .captures(path)
        .map(|captures| captures[1].to_uppercase())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_prefixed_patient_ids_in_priority_order() {
        assert_eq!(
            parse_from_filename("P1234_Anterior_Left.wav").patient_id,
            Some("P1234".to_string())
        );
        assert_eq!(
            parse_from_filename("rec_ID4567.wav").patient_id,
            Some("ID4567".to_string())
        );
        assert_eq!(
            parse_from_filename("PAT001_Bell.wav").patient_id,
            Some("PAT001".to_string())
        );
    }

    #[test]
    fn generic_pattern_is_the_last_resort() {
        assert_eq!(
            parse_from_filename("AB123456_posterior.wav").patient_id,
            Some("AB123456".to_string())
        );
        // A P-prefixed id matches the first pattern, not the generic one.
        assert_eq!(
            parse_from_filename("p123_20230517.wav").patient_id,
            Some("P123".to_string())
        );
    }

    #[test]
    fn location_joins_only_present_parts() {
        assert_eq!(
            parse_from_filename("P123_Anterior_Left_Upper.wav").location,
            Some("Anterior_Left_Upper".to_string())
        );
        assert_eq!(
            parse_from_filename("P123_posterior-right.wav").location,
            Some("Posterior_Right".to_string())
        );
        assert_eq!(
            parse_from_filename("P123_ANTERIOR.wav").location,
            Some("Anterior".to_string())
        );
        assert_eq!(parse_from_filename("P123.wav").location, None);
    }

    #[test]
    fn eight_digit_runs_parse_as_dates_when_valid() {
        let meta = parse_from_filename("P123_20230517_Bell.wav");
        assert_eq!(
            meta.date.unwrap().format("%Y-%m-%d").to_string(),
            "2023-05-17"
        );
        // 99999999 is not a calendar date.
        assert_eq!(parse_from_filename("P123_99999999.wav").date, None);
    }

    #[test]
    fn filter_keywords_are_capitalized() {
        assert_eq!(
            parse_from_filename("P123_bell.wav").filter_mode,
            Some("Bell".to_string())
        );
        assert_eq!(
            parse_from_filename("P123_DIAPHRAGM.wav").filter_mode,
            Some("Diaphragm".to_string())
        );
        assert_eq!(parse_from_filename("P123.wav").filter_mode, None);
    }

    #[test]
    fn extractions_are_independent() {
        let meta = parse_from_filename("Anterior_Left_20230517_Extended.wav");
        assert_eq!(meta.patient_id, Some("20230517".to_string()));
        assert_eq!(meta.location, Some("Anterior_Left".to_string()));
        assert!(meta.date.is_some());
        assert_eq!(meta.filter_mode, Some("Extended".to_string()));
    }

    #[test]
    fn path_fallback_scans_directories() {
        assert_eq!(
            infer_patient_from_path("/data/hospital_a/P9876/session1.wav"),
            Some("P9876".to_string())
        );
        assert_eq!(infer_patient_from_path("/data/hospital_a/notes.csv"), None);
    }
}
