//! Entity repositories: CRUD over a single data file.
//!
//! Every operation is a full read-modify-write cycle against the file. There
//! is no cache and no locking, so concurrent writers race (last write wins).

mod appointments;
mod doctors;
mod patients;

use std::collections::BTreeSet;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use crate::models::{Record, ID_FIELD};
use crate::store::{Decoded, RecordStore, StoreResult};

/// Per-entity conventions layered over untyped records.
pub trait Entity {
    /// Canonical column order for CSV files.
    const FIELDS: &'static [&'static str];

    /// Field matched by `find_by_key`, `update` and `delete`.
    const KEY_FIELD: &'static str;

    /// Whether `candidate` may not be created alongside `existing`.
    fn conflicts(existing: &Record, candidate: &Record) -> bool;
}

/// Next id: one past the largest numeric id, or 1 for an empty list.
///
/// Ids that are missing or not unsigned integers are ignored. When the
/// largest id is `u64::MAX` the lowest unused positive id is taken instead.
pub fn generate_id(records: &[Record]) -> u64 {
    let ids: BTreeSet<u64> = records
        .iter()
        .filter_map(|record| record.id().trim().parse().ok())
        .collect();

    match ids.last() {
        None => 1,
        Some(max) => max.checked_add(1).unwrap_or_else(|| lowest_unused_id(&ids)),
    }
}

fn lowest_unused_id(ids: &BTreeSet<u64>) -> u64 {
    // A file cannot hold u64::MAX records, so a gap always exists
    (1..u64::MAX).find(|id| !ids.contains(id)).unwrap_or(u64::MAX)
}

/// Repository for one entity kind stored in one file.
#[derive(Debug, Clone)]
pub struct Repository<E> {
    store: RecordStore,
    _entity: PhantomData<E>,
}

impl<E: Entity> Repository<E> {
    /// Open a repository over `path`. The file is created lazily.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            store: RecordStore::new(path, E::FIELDS),
            _entity: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }

    /// Create the backing file if it does not exist.
    pub fn initialize(&self) -> StoreResult<()> {
        self.store.ensure_exists()
    }

    /// Insert a new record with a fresh id.
    ///
    /// Returns `None` without writing when the record conflicts with an
    /// existing one.
    pub fn create(&self, fields: impl Into<Record>) -> StoreResult<Option<Record>> {
        let mut records = self.store.load_all()?;
        let mut candidate = fields.into();

        if records.iter().any(|existing| E::conflicts(existing, &candidate)) {
            tracing::debug!(path = %self.path().display(), "Create rejected by conflict rule");
            return Ok(None);
        }

        candidate.set(ID_FIELD, generate_id(&records).to_string());
        records.push(candidate.clone());
        self.store.save_all(&records)?;
        Ok(Some(candidate))
    }

    /// All records, verbatim.
    pub fn read_all(&self) -> StoreResult<Vec<Record>> {
        self.store.load_all()
    }

    /// All records with the typed decode outcome.
    pub fn read_checked(&self) -> StoreResult<Decoded> {
        self.store.load_checked()
    }

    /// First record whose key field equals `key`.
    pub fn find_by_key(&self, key: &str) -> StoreResult<Option<Record>> {
        let records = self.store.load_all()?;
        Ok(records.into_iter().find(|r| r.get(E::KEY_FIELD) == key))
    }

    /// Shallow-merge `changes` into the first record matching `key`.
    ///
    /// Values are stored as strings and `id` is never changed. Returns the
    /// updated record, or `None` (without writing) when nothing matches.
    pub fn update<I, K, V>(&self, key: &str, changes: I) -> StoreResult<Option<Record>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        let mut records = self.store.load_all()?;
        let Some(index) = Self::position(&records, key) else {
            return Ok(None);
        };

        records[index].merge(changes);
        let updated = records[index].clone();
        self.store.save_all(&records)?;
        Ok(Some(updated))
    }

    /// Remove the first record matching `key`.
    pub fn delete(&self, key: &str) -> StoreResult<bool> {
        let mut records = self.store.load_all()?;
        let Some(index) = Self::position(&records, key) else {
            tracing::debug!(path = %self.path().display(), key, "Nothing to delete");
            return Ok(false);
        };

        records.remove(index);
        self.store.save_all(&records)?;
        Ok(true)
    }

    fn position(records: &[Record], key: &str) -> Option<usize> {
        records.iter().position(|r| r.get(E::KEY_FIELD) == key)
    }
}
