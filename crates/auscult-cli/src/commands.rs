//! Subcommand entry points.

use anyhow::Result;

use auscult_cli::pipeline::{PipelineOptions, run_pipeline};
use auscult_cli::types::PipelineResult;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};

use crate::cli::PipelineArgs;

pub fn run_pipeline_command(args: &PipelineArgs) -> Result<PipelineResult> {
    run_pipeline(
        &args.input_dir,
        &args.output_dir,
        PipelineOptions {
            partitions: args.partitions,
            dry_run: args.dry_run,
        },
    )
}

/// Fixed rule listing, in evaluation order.
const RULES: &[(&str, &str, &str)] = &[
    ("missing_field", "error", "file_path or sample_rate absent"),
    ("missing_field", "warning", "patient_id or timestamp absent"),
    ("invalid_age", "warning", "age present and outside [0, 120]"),
    (
        "duration_out_of_range",
        "warning",
        "duration present and outside [2, 60] seconds",
    ),
    (
        "invalid_sample_rate",
        "error",
        "sample rate present but not a positive integer",
    ),
    ("missing_gender", "note", "gender null or unrecognized"),
    (
        "unexpected_extension",
        "warning",
        "file extension not one of wav, flac, mp3",
    ),
    (
        "possible_duplicate",
        "warning",
        "same (source, file) plus patient id or recording date",
    ),
];

pub fn run_rules() {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Rule").add_attribute(Attribute::Bold),
        Cell::new("Severity").add_attribute(Attribute::Bold),
        Cell::new("Fires when").add_attribute(Attribute::Bold),
    ]);
    for (rule, severity, condition) in RULES {
        table.add_row(vec![
            Cell::new(rule),
            Cell::new(severity),
            Cell::new(condition),
        ]);
    }
    println!("{table}");
}
