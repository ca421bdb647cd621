//! Untyped record: the unit every file format stores.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Prefix marking fields that live only in memory and are never persisted.
pub const INTERNAL_PREFIX: &str = "_";

/// Field holding the store-assigned identifier.
pub const ID_FIELD: &str = "id";

/// Whether a field name is internal (stripped before writing to disk).
pub fn is_internal_field(name: &str) -> bool {
    name.starts_with(INTERNAL_PREFIX)
}

/// A flat mapping from field name to string value.
///
/// The storage layer enforces no schema: entity field sets are a convention
/// carried by [`crate::repo::Entity`], not a constraint on the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, String>);

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `field`, or `""` when the field is absent.
    pub fn get(&self, field: &str) -> &str {
        self.0.get(field).map(String::as_str).unwrap_or("")
    }

    /// Value of `field`, distinguishing absent from empty.
    pub fn get_opt(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Set a field, returning the previous value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(field.into(), value.into())
    }

    /// Remove a field.
    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.0.remove(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// The store-assigned id (`""` if none).
    pub fn id(&self) -> &str {
        self.get(ID_FIELD)
    }

    /// Shallow merge: every change overwrites, everything else is kept.
    /// The `id` field is never overwritten.
    pub fn merge<I, K, V>(&mut self, changes: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        for (field, value) in changes {
            let field = field.into();
            if field == ID_FIELD {
                continue;
            }
            self.0.insert(field, value.to_string());
        }
    }

    /// Copy of this record without internal fields.
    pub fn without_internal(&self) -> Record {
        self.0
            .iter()
            .filter(|(name, _)| !is_internal_field(name))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    /// Iterate over `(field, value)` pairs in field-name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate over field names in field-name order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Record {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
