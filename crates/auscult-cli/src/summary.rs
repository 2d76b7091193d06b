//! End-of-run summary tables.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use auscult_cli::types::PipelineResult;

pub fn print_summary(result: &PipelineResult) {
    if let Some(outputs) = &result.outputs {
        println!("Audio table: {}", outputs.audio.display());
        println!("Patient table: {}", outputs.patients.display());
        println!("Quality report: {}", outputs.issues.display());
    } else {
        println!("Dry run: no outputs written");
    }
    if let Some(partitions) = result.partitions {
        println!("Date partitions: {partitions}");
    }

    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Records"),
    ]);
    align_column(&mut table, 1, CellAlignment::Right);
    for source in &result.sources {
        table.add_row(vec![
            Cell::new(&source.source),
            Cell::new(source.records),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(result.recordings).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    let mut counts = Table::new();
    apply_table_style(&mut counts);
    counts.set_header(vec![
        header_cell("Recordings"),
        header_cell("Patients"),
        header_cell("Errors"),
        header_cell("Warnings"),
        header_cell("Notes"),
    ]);
    for column in 0..5 {
        align_column(&mut counts, column, CellAlignment::Right);
    }
    counts.add_row(vec![
        Cell::new(result.recordings),
        Cell::new(result.patients),
        count_cell(result.issues.errors, Color::Red),
        count_cell(result.issues.warnings, Color::Yellow),
        count_cell(result.issues.notes, Color::Blue),
    ]);
    println!("{counts}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count == 0 {
        Cell::new(count)
    } else {
        Cell::new(count).fg(color)
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
