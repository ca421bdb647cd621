//! Flat-file persistence layer.
//!
//! Every file holds a list of [`Record`]s in one of two interchangeable
//! formats, chosen by file extension. Loading a malformed file never fails:
//! it decodes to [`Decoded::Corrupted`] and callers see an empty list.

mod csv;
mod json;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Record;

/// Store errors. Only real I/O and serialization failures end up here;
/// missing records and conflicts are reported through return values.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV serialization error: {0}")]
    Csv(#[from] ::csv::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A storage format name other than `json` or `csv`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported storage format: {0}")]
pub struct UnknownFormat(pub String);

/// On-disk representation of a record list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Json,
    Csv,
}

impl Format {
    /// Pick the format for a path: `.json` is JSON, anything else is CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Csv,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Csv => "csv",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "csv" => Ok(Format::Csv),
            other => Err(UnknownFormat(other.to_string())),
        }
    }
}

/// Outcome of decoding a file's contents.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Records(Vec<Record>),
    /// Unparseable content, wrong top-level shape, or invalid UTF-8
    Corrupted { reason: String },
}

impl Decoded {
    /// Records, treating corrupted content as an empty dataset.
    pub fn into_records(self) -> Vec<Record> {
        match self {
            Decoded::Records(records) => records,
            Decoded::Corrupted { .. } => Vec::new(),
        }
    }

    pub fn is_corrupted(&self) -> bool {
        matches!(self, Decoded::Corrupted { .. })
    }
}

/// Decode raw file contents in the given format.
pub fn decode_bytes(format: Format, bytes: &[u8]) -> Decoded {
    match format {
        Format::Json => json::decode(bytes),
        Format::Csv => csv::decode(bytes),
    }
}

/// Encode records in the given format. Internal fields are stripped;
/// `fields` come first, in order, followed by any extra fields.
pub fn encode(format: Format, records: &[Record], fields: &[&str]) -> StoreResult<Vec<u8>> {
    match format {
        Format::Json => Ok(json::encode(records, fields)?),
        Format::Csv => csv::encode(records, fields),
    }
}

/// Read and decode an existing file without creating it.
pub fn decode_file(path: &Path) -> StoreResult<Decoded> {
    let bytes = fs::read(path)?;
    Ok(decode_bytes(Format::from_path(path), &bytes))
}

/// Create `path` (and its parent directory) with empty content if it does
/// not exist: a header row for CSV, `[]` for JSON.
pub fn initialize(path: &Path, fields: &[&str]) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    if !path.exists() {
        let empty = encode(Format::from_path(path), &[], fields)?;
        fs::write(path, empty)?;
        tracing::debug!(path = %path.display(), "Initialized empty data file");
    }
    Ok(())
}

/// Load all records, creating the file first if needed.
pub fn load(path: &Path, fields: &[&str]) -> StoreResult<Vec<Record>> {
    initialize(path, fields)?;
    let decoded = decode_file(path)?;
    if let Decoded::Corrupted { reason } = &decoded {
        tracing::debug!(path = %path.display(), %reason, "Treating malformed data file as empty");
    }
    Ok(decoded.into_records())
}

/// Overwrite `path` with `records`.
pub fn save(path: &Path, records: &[Record], fields: &[&str]) -> StoreResult<()> {
    let bytes = encode(Format::from_path(path), records, fields)?;
    fs::write(path, bytes)?;
    Ok(())
}

/// A single data file with a fixed column layout.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
    fields: &'static [&'static str],
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>, fields: &'static [&'static str]) -> Self {
        Self {
            path: path.into(),
            fields,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> Format {
        Format::from_path(&self.path)
    }

    pub fn fields(&self) -> &'static [&'static str] {
        self.fields
    }

    /// Create the file with empty content if it is missing.
    pub fn ensure_exists(&self) -> StoreResult<()> {
        initialize(&self.path, self.fields)
    }

    /// Load every record; malformed content reads as empty.
    pub fn load_all(&self) -> StoreResult<Vec<Record>> {
        load(&self.path, self.fields)
    }

    /// Load with the typed decode outcome (creates the file if missing).
    pub fn load_checked(&self) -> StoreResult<Decoded> {
        self.ensure_exists()?;
        decode_file(&self.path)
    }

    /// Rewrite the whole file.
    pub fn save_all(&self, records: &[Record]) -> StoreResult<()> {
        save(&self.path, records, self.fields)
    }
}
