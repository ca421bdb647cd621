//! Combined appointment view over sibling `.json` and `.csv` files.
//!
//! The same logical dataset may live in both formats at once. Fusion loads
//! both, tags every record with its origin and normalizes its date. Records
//! are concatenated as-is: an appointment present in both files shows up
//! twice, once per origin.

mod dates;

pub use dates::*;

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::models::{Record, APPOINTMENT_FIELDS};
use crate::store::{self, Decoded, Format, StoreResult};

/// Internal field naming the file a fused record came from.
pub const SOURCE_FIELD: &str = "_source";

/// Internal field keeping `fecha` as it was before normalization.
pub const ORIGINAL_DATE_FIELD: &str = "_original_fecha";

/// Which sibling file a fused record was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Json,
    Csv,
}

impl Origin {
    /// Load order: JSON first, then CSV.
    pub const ALL: [Origin; 2] = [Origin::Json, Origin::Csv];

    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Json => "json",
            Origin::Csv => "csv",
        }
    }

    pub fn format(&self) -> Format {
        match self {
            Origin::Json => Format::Json,
            Origin::Csv => Format::Csv,
        }
    }

    /// Origin tag of a fused record, if any.
    pub fn of(record: &Record) -> Option<Origin> {
        match record.get(SOURCE_FIELD) {
            "json" => Some(Origin::Json),
            "csv" => Some(Origin::Csv),
            _ => None,
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `base` plus the format's extension (`data/citas` → `data/citas.csv`).
pub fn sibling_path(base: &Path, format: Format) -> PathBuf {
    let mut path = OsString::from(base.as_os_str());
    path.push(".");
    path.push(format.extension());
    PathBuf::from(path)
}

/// Load `base.json` and `base.csv` into one tagged, date-normalized list.
///
/// Missing files are skipped and never created. A malformed file
/// contributes nothing.
pub fn load_combined(base: &Path) -> StoreResult<Vec<Record>> {
    let mut combined = Vec::new();

    for origin in Origin::ALL {
        let path = sibling_path(base, origin.format());
        if !path.exists() {
            continue;
        }

        match store::decode_file(&path)? {
            Decoded::Records(records) => {
                combined.extend(records.into_iter().map(|record| tag(record, origin)));
            }
            Decoded::Corrupted { reason } => {
                tracing::debug!(path = %path.display(), %reason, "Skipping malformed appointment file");
            }
        }
    }

    Ok(combined)
}

fn tag(mut record: Record, origin: Origin) -> Record {
    let raw = record.get("fecha").to_string();
    record.set("fecha", normalize_date(&raw));
    record.set(ORIGINAL_DATE_FIELD, raw);
    record.set(SOURCE_FIELD, origin.as_str());
    record
}

/// Per-format result of deleting an appointment from both files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionReport {
    pub json: bool,
    pub csv: bool,
}

impl DeletionReport {
    /// Whether anything was removed from either file.
    pub fn any(&self) -> bool {
        self.json || self.csv
    }

    pub fn removed_from(&self, origin: Origin) -> bool {
        match origin {
            Origin::Json => self.json,
            Origin::Csv => self.csv,
        }
    }

    fn mark(&mut self, origin: Origin) {
        match origin {
            Origin::Json => self.json = true,
            Origin::Csv => self.csv = true,
        }
    }
}

/// Delete appointment `id` from both sibling files.
///
/// Every record with that id is removed from each existing file. Files with
/// no match, and malformed files, are left untouched.
pub fn delete_everywhere(base: &Path, id: &str) -> StoreResult<DeletionReport> {
    let mut report = DeletionReport::default();

    for origin in Origin::ALL {
        let path = sibling_path(base, origin.format());
        if !path.exists() {
            continue;
        }

        let mut records = match store::decode_file(&path)? {
            Decoded::Records(records) => records,
            Decoded::Corrupted { reason } => {
                tracing::debug!(path = %path.display(), %reason, "Not deleting from malformed appointment file");
                continue;
            }
        };
        let before = records.len();
        records.retain(|record| record.id() != id);

        if records.len() != before {
            store::save(&path, &records, APPOINTMENT_FIELDS)?;
            report.mark(origin);
        }
    }

    Ok(report)
}

/// Fused appointments on a normalized date.
pub fn appointments_on<'a>(records: &'a [Record], fecha: &str) -> Vec<&'a Record> {
    let wanted = normalize_date(fecha);
    records.iter().filter(|r| r.get("fecha") == wanted).collect()
}

/// Days of a month that have at least one appointment.
pub fn days_with_appointments(records: &[Record], year: i32, month: u32) -> BTreeSet<u32> {
    records
        .iter()
        .filter_map(|r| parse_date(r.get("fecha")))
        .filter(|date| date.year() == year && date.month() == month)
        .map(|date| date.day())
        .collect()
}

/// Origins present in a fused list.
pub fn origins(records: &[Record]) -> BTreeSet<Origin> {
    records.iter().filter_map(Origin::of).collect()
}
