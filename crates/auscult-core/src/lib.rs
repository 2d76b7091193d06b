//! Core pipeline stages: normalization, filename extraction, identity,
//! the two-pass ingestion/enrichment engine, deduplication, and the
//! table split.

pub mod dedupe;
pub mod engine;
pub mod filename;
pub mod identity;
pub mod normalize;
pub mod split;

pub use dedupe::cleanup_and_dedupe;
pub use engine::{IngestOutcome, IngestSummary, ingest_all};
pub use filename::{FilenameMeta, infer_patient_from_path, parse_from_filename};
pub use identity::recording_id;
pub use normalize::{
    blank_to_missing, norm_gender, parse_date_any, parse_integer, parse_number, parse_sample_rate,
};
pub use split::patient_demographics;
