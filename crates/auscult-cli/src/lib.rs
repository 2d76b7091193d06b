//! Library surface of the auscult CLI.
//!
//! Exposes the logging setup and the pipeline runner so integration
//! tests can drive a full run without spawning the binary.

pub mod logging;
pub mod pipeline;
pub mod types;
