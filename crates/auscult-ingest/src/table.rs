//! Format-dispatch layer reading table-like files into a uniform
//! row-oriented structure.
//!
//! Every reader is salvage-oriented: a malformed row, sheet, or line is
//! skipped (or kept as a raw-text cell) without aborting the file, and a
//! file that cannot be read at all yields no tables rather than an error.

use std::path::Path;

use calamine::{Data, Reader, Xlsx, open_workbook};
use csv::ReaderBuilder;
use serde_json::Value;
use tracing::{debug, warn};

use crate::discovery::TabularFormat;
use crate::error::{IngestError, Result};

/// One table materialized from a source file. An `.xlsx` workbook yields
/// one table per readable sheet; every other format yields at most one.
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SourceTable {
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() || self.rows.is_empty()
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Read every table a source file yields, salvaging what can be salvaged.
///
/// Unreadable or unparseable files degrade to an empty result with a
/// warning; they never abort the run.
pub fn read_tables(path: &Path, format: TabularFormat) -> Vec<SourceTable> {
    let result = match format {
        TabularFormat::Csv => read_delimited(path, b',').map(into_single),
        TabularFormat::Tsv => read_delimited(path, b'\t').map(into_single),
        TabularFormat::Txt => read_txt(path).map(into_single),
        TabularFormat::Xlsx => read_xlsx(path),
        TabularFormat::Json => read_json(path).map(into_single),
        TabularFormat::Jsonl => read_jsonl(path).map(into_single),
    };
    match result {
        Ok(tables) => {
            let tables: Vec<SourceTable> =
                tables.into_iter().filter(|t| !t.is_empty()).collect();
            debug!(path = %path.display(), tables = tables.len(), "read tabular source");
            tables
        }
        Err(error) => {
            warn!(path = %path.display(), %error, "skipping unreadable tabular source");
            Vec::new()
        }
    }
}

fn into_single(table: SourceTable) -> Vec<SourceTable> {
    vec![table]
}

fn read_delimited(path: &Path, delimiter: u8) -> Result<SourceTable> {
    let text = read_text(path)?;
    Ok(parse_delimited(&text, delimiter))
}

fn parse_delimited(text: &str, delimiter: u8) -> SourceTable {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = match reader.headers() {
        Ok(headers) => headers.iter().map(normalize_header).collect(),
        Err(_) => Vec::new(),
    };

    let mut rows = Vec::new();
    for record in reader.records() {
        match record {
            Ok(record) => rows.push(record.iter().map(normalize_cell).collect()),
            // A malformed row is dropped, not fatal for the file.
            Err(error) => debug!(%error, "skipping malformed row"),
        }
    }
    SourceTable { headers, rows }
}

/// `.txt` sources: comma-delimited when commas are present, tab-delimited
/// when tabs are, whitespace-tokenized otherwise. A file that never splits
/// into columns is kept as a single `raw_text` column so downstream code
/// still sees the content.
fn read_txt(path: &Path) -> Result<SourceTable> {
    let text = read_text(path)?;
    let first_line = text.lines().find(|line| !line.trim().is_empty());
    let Some(first_line) = first_line else {
        return Ok(SourceTable {
            headers: Vec::new(),
            rows: Vec::new(),
        });
    };

    if first_line.contains(',') {
        return Ok(parse_delimited(&text, b','));
    }
    if first_line.contains('\t') {
        return Ok(parse_delimited(&text, b'\t'));
    }

    let headers: Vec<String> = first_line.split_whitespace().map(String::from).collect();
    if headers.len() > 1 {
        let rows = text
            .lines()
            .skip(1)
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.split_whitespace().map(String::from).collect())
            .collect();
        return Ok(SourceTable { headers, rows });
    }

    Ok(SourceTable {
        headers: vec!["raw_text".to_string()],
        rows: text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| vec![line.to_string()])
            .collect(),
    })
}

fn read_xlsx(path: &Path) -> Result<Vec<SourceTable>> {
    let mut workbook: Xlsx<_> =
        open_workbook(path).map_err(|error: calamine::XlsxError| IngestError::TableParse {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;

    let mut tables = Vec::new();
    for sheet in workbook.sheet_names() {
        let range = match workbook.worksheet_range(&sheet) {
            Ok(range) => range,
            Err(error) => {
                warn!(path = %path.display(), sheet, %error, "skipping unreadable sheet");
                continue;
            }
        };
        let mut rows = range.rows();
        let Some(header_row) = rows.next() else {
            continue;
        };
        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| normalize_header(&excel_cell_string(cell)))
            .collect();
        let data: Vec<Vec<String>> = rows
            .map(|row| row.iter().map(excel_cell_string).collect())
            .collect();
        tables.push(SourceTable {
            headers,
            rows: data,
        });
    }
    Ok(tables)
}

fn excel_cell_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(value) => value.trim().to_string(),
        Data::Float(value) => value.to_string(),
        Data::Int(value) => value.to_string(),
        Data::Bool(value) => value.to_string(),
        Data::DateTime(value) => value
            .as_datetime()
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default(),
        Data::DateTimeIso(value) | Data::DurationIso(value) => value.clone(),
    }
}

fn read_json(path: &Path) -> Result<SourceTable> {
    let text = read_text(path)?;
    let value: Value = match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(error) => {
            return Err(IngestError::TableParse {
                path: path.to_path_buf(),
                message: error.to_string(),
            });
        }
    };

    let objects: Vec<serde_json::Map<String, Value>> = match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect(),
        Value::Object(map) => vec![flatten_object(map)],
        _ => Vec::new(),
    };
    Ok(objects_to_table(&objects))
}

/// One-level flattening of nested objects (`{"a": {"b": 1}}` becomes
/// column `a.b`), matching how single-document JSON metadata is laid out.
fn flatten_object(map: serde_json::Map<String, Value>) -> serde_json::Map<String, Value> {
    let mut flat = serde_json::Map::new();
    for (key, value) in map {
        match value {
            Value::Object(nested) => {
                for (nested_key, nested_value) in nested {
                    flat.insert(format!("{key}.{nested_key}"), nested_value);
                }
            }
            other => {
                flat.insert(key, other);
            }
        }
    }
    flat
}

fn read_jsonl(path: &Path) -> Result<SourceTable> {
    let text = read_text(path)?;
    let mut objects = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(line) {
            Ok(Value::Object(map)) => objects.push(map),
            // Unparseable lines survive as raw text rather than vanishing.
            _ => {
                let mut raw = serde_json::Map::new();
                raw.insert("__raw__".to_string(), Value::String(line.to_string()));
                objects.push(raw);
            }
        }
    }
    Ok(objects_to_table(&objects))
}

fn objects_to_table(objects: &[serde_json::Map<String, Value>]) -> SourceTable {
    let mut headers: Vec<String> = Vec::new();
    for object in objects {
        for key in object.keys() {
            if !headers.iter().any(|existing| existing == key) {
                headers.push(key.clone());
            }
        }
    }
    let rows = objects
        .iter()
        .map(|object| {
            headers
                .iter()
                .map(|key| object.get(key).map(json_value_string).unwrap_or_default())
                .collect()
        })
        .collect();
    SourceTable { headers, rows }
}

fn json_value_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

fn read_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    // Tolerate bad encodings; lossy conversion salvages whatever is valid.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
