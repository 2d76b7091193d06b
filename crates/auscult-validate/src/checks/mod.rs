//! Rule check modules.
//!
//! Each module covers one rule family; rules are independent and a
//! record can trigger many. Evaluation order is fixed so the issue list
//! is reproducible across runs.

pub mod duplicates;
mod extension;
mod gender;
mod missing;
mod ranges;

use auscult_model::{CanonicalAudioRecord, DataQualityIssue};

/// Run every per-record rule in order.
pub fn run_record_checks(record: &CanonicalAudioRecord) -> Vec<DataQualityIssue> {
    let mut issues = Vec::new();

    // 1+2. Missing critical and tolerable fields.
    issues.extend(missing::check(record));

    // 3–5. Range and value rules.
    issues.extend(ranges::check(record));

    // 6. Gender presence (informational).
    issues.extend(gender::check(record));

    // 7. File extension.
    issues.extend(extension::check(record));

    issues
}
