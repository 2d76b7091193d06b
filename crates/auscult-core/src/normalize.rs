//! Field normalizers.
//!
//! Pure functions converting messy scalar values into canonical typed
//! values or an explicit missing marker. Unparseable input is a value
//! (`None`), never an error; fallbacks are ordered attempts.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;

use auscult_model::Gender;

/// Collapse blanks and the usual null spellings to an explicit missing
/// marker. Applied to every optional text field before any rule sees it.
pub fn blank_to_missing(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.to_lowercase().as_str() {
        "nan" | "none" | "null" => None,
        _ => Some(trimmed.to_string()),
    }
}

/// Normalize a gender string against a fixed bilingual vocabulary.
/// Anything unmatched, including missing input, is unknown.
pub fn norm_gender(value: Option<&str>) -> Option<Gender> {
    let value = value?;
    match value.trim().to_lowercase().as_str() {
        "m" | "male" | "masculino" | "h" | "man" | "masc" => Some(Gender::M),
        "f" | "female" | "femenino" | "w" | "woman" | "fem" => Some(Gender::F),
        _ => None,
    }
}

/// Explicit date formats tried in order before the free-form fallback.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%Y%m%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y", "%m-%d-%Y", "%Y/%m/%d", "%d.%m.%Y",
];

/// Datetime renderings accepted by the best-effort fallback.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Parse a date from any of the accepted renderings.
///
/// Tries the explicit date formats first, then common datetime forms,
/// then RFC 3339. Unparseable or missing input yields no timestamp.
pub fn parse_date_any(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(datetime);
        }
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.naive_utc())
}

static KILOHERTZ: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+(?:\.[0-9]+)?)\s*k(?:hz)?$").unwrap());

/// Parse a sample-rate token: plain integers plus `k`/`kHz`/`Hz` suffixed
/// strings (`48k` → 48000, `44.1kHz` → 44100, `44100Hz` → 44100).
/// Fractional kilohertz values truncate after multiplication.
pub fn parse_sample_rate(value: &str) -> Option<i64> {
    let lowered = value.trim().to_lowercase();
    if lowered.is_empty() {
        return None;
    }

    if let Some(captures) = KILOHERTZ.captures(&lowered) {
        let kilohertz: f64 = captures[1].parse().ok()?;
        return Some((kilohertz * 1000.0) as i64);
    }

    let substituted = lowered.replace("khz", "000").replace('k', "000").replace("hz", "");
    let digits: String = substituted.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Parse a numeric cell (age, duration). Unparseable input is missing.
pub fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse().ok()
}

/// Parse an integer cell (bit depth), tolerating a float rendering like
/// `16.0`.
pub fn parse_integer(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if let Ok(int) = trimmed.parse::<i64>() {
        return Some(int);
    }
    trimmed.parse::<f64>().ok().map(|float| float as i64)
}
