//! Input-tree discovery and source classification.
//!
//! Walks the input root once, classifying every file by extension into a
//! tabular format or the audio kind. The first path component under the
//! root becomes the file's partition (`source_name`), the provenance and
//! grouping key used throughout the pipeline.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::warn;

use crate::error::{IngestError, Result};

/// Recognized table-like formats, dispatched by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabularFormat {
    Csv,
    Tsv,
    Txt,
    Xlsx,
    Json,
    Jsonl,
}

impl TabularFormat {
    /// Match a file extension (case-insensitive) to a tabular format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "tsv" => Some(Self::Tsv),
            "txt" => Some(Self::Txt),
            "xlsx" => Some(Self::Xlsx),
            "json" => Some(Self::Json),
            "jsonl" => Some(Self::Jsonl),
            _ => None,
        }
    }
}

/// What a discovered file contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Tabular(TabularFormat),
    Audio,
}

/// One classified file under the input root.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub kind: SourceKind,
    /// Top-level partition under the input root (`root` when the file
    /// sits directly under it).
    pub source_name: String,
}

/// Walk the input root and classify every recognized file.
///
/// Entries are visited in sorted order so repeated runs over the same
/// tree discover files in the same sequence. Unreadable subdirectories
/// are skipped with a warning; only a missing or unreadable root is an
/// error.
pub fn discover_sources(root: &Path) -> Result<Vec<DiscoveredFile>> {
    if !root.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut discovered = Vec::new();
    walk_dir(root, root, &mut discovered, true)?;
    Ok(discovered)
}

fn walk_dir(
    root: &Path,
    dir: &Path,
    out: &mut Vec<DiscoveredFile>,
    is_root: bool,
) -> Result<()> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(source) if is_root => {
            return Err(IngestError::DirectoryRead {
                path: dir.to_path_buf(),
                source,
            });
        }
        Err(error) => {
            warn!(dir = %dir.display(), %error, "skipping unreadable directory");
            return Ok(());
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(error) => {
                warn!(dir = %dir.display(), %error, "skipping unreadable entry");
                None
            }
        })
        .collect();
    paths.sort();

    for path in paths {
        if path.is_dir() {
            walk_dir(root, &path, out, false)?;
            continue;
        }
        let Some(kind) = classify(&path) else {
            continue;
        };
        out.push(DiscoveredFile {
            source_name: source_name(root, &path),
            path,
            kind,
        });
    }
    Ok(())
}

fn classify(path: &Path) -> Option<SourceKind> {
    let ext = path.extension().and_then(|ext| ext.to_str())?;
    if ext.eq_ignore_ascii_case("wav") {
        return Some(SourceKind::Audio);
    }
    TabularFormat::from_extension(ext).map(SourceKind::Tabular)
}

/// First path component of `path` relative to `root`, or `root` for files
/// directly under the input root.
pub fn source_name(root: &Path, path: &Path) -> String {
    let Ok(relative) = path.strip_prefix(root) else {
        return "root".to_string();
    };
    let mut components = relative.components();
    let first = components.next();
    // A lone file name means the file sits directly under the root.
    if components.next().is_none() {
        return "root".to_string();
    }
    first
        .and_then(|part| part.as_os_str().to_str())
        .map_or_else(|| "root".to_string(), ToString::to_string)
}

/// Last-modified time of a file, as a naive UTC timestamp.
///
/// Used as the fallback recording time for both tabular rows without a
/// parseable date and probed audio files.
pub fn file_mtime(path: &Path) -> Option<NaiveDateTime> {
    let metadata = std::fs::metadata(path).ok()?;
    let modified = metadata.modified().ok()?;
    Some(DateTime::<Utc>::from(modified).naive_utc())
}
