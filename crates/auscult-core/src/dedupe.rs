//! Cleanup and deduplication of the staging record set.
//!
//! Vacuous rows (no file path, no sample rate, no timestamp) are dropped
//! first. Within each `(source_name, file_path)` group exactly one record
//! survives: the one with the greatest count of populated fields, ties
//! broken by first occurrence. Records with no file path group per
//! source under the missing key.

use std::collections::HashMap;

use tracing::info;

use auscult_model::CanonicalAudioRecord;

/// Drop vacuous records, then collapse each `(source_name, file_path)`
/// group to its most informationally complete row. Output preserves the
/// relative order of the surviving records, so repeated runs produce the
/// same sequence.
pub fn cleanup_and_dedupe(records: Vec<CanonicalAudioRecord>) -> Vec<CanonicalAudioRecord> {
    let before = records.len();
    let records: Vec<CanonicalAudioRecord> =
        records.into_iter().filter(|r| !r.is_vacuous()).collect();
    let dropped = before - records.len();

    // Winner per group: highest non-missing count, earliest on ties.
    let mut winners: HashMap<(String, Option<String>), usize> = HashMap::new();
    for (position, record) in records.iter().enumerate() {
        let key = (record.source_name.clone(), record.file_path.clone());
        match winners.get(&key) {
            Some(&current)
                if records[current].non_missing_fields() >= record.non_missing_fields() => {}
            _ => {
                winners.insert(key, position);
            }
        }
    }

    let mut keep: Vec<usize> = winners.into_values().collect();
    keep.sort_unstable();
    let deduped: Vec<CanonicalAudioRecord> = keep
        .into_iter()
        .map(|position| records[position].clone())
        .collect();

    info!(
        dropped_vacuous = dropped,
        collapsed = before - dropped - deduped.len(),
        kept = deduped.len(),
        "cleanup and dedup complete"
    );
    deduped
}
