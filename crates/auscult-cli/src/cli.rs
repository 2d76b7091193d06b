//! CLI argument definitions for the auscult pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "auscult",
    version,
    about = "Auscultation data pipeline - ingest, deduplicate and score clinical recordings",
    long_about = "Turn an unstructured directory of clinical audio recordings and loosely\n\
                  related metadata files into a canonical recording table, a derived\n\
                  patient-demographics table, and a graded data-quality report."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full pipeline over an input directory.
    Pipeline(PipelineArgs),

    /// List the data-quality rules and their severities.
    Rules,
}

#[derive(Parser)]
pub struct PipelineArgs {
    /// Input directory containing metadata tables and WAV recordings.
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Output directory for the generated tables (default: ./cleaned_data).
    #[arg(long = "output-dir", value_name = "DIR", default_value = "./cleaned_data")]
    pub output_dir: PathBuf,

    /// Also write the audio table partitioned by recording date.
    #[arg(long = "partitions")]
    pub partitions: bool,

    /// Ingest and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
