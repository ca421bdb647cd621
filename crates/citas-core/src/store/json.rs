//! JSON codec: a top-level array of flat objects.

use serde::ser::SerializeMap;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Serializer, Value};

use super::Decoded;
use crate::models::{is_internal_field, Record};

pub(super) fn decode(bytes: &[u8]) -> Decoded {
    let value: Value = match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(e) => {
            return Decoded::Corrupted {
                reason: e.to_string(),
            }
        }
    };

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Decoded::Corrupted {
                reason: format!("expected a JSON array, found {}", kind_of(&other)),
            }
        }
    };

    let records = items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(map) => Some(object_to_record(map)),
            other => {
                tracing::debug!(kind = kind_of(&other), "Skipping non-object array element");
                None
            }
        })
        .collect();

    Decoded::Records(records)
}

/// Pretty-print with 4-space indentation, keys in `fields` order first.
pub(super) fn encode(records: &[Record], fields: &[&str]) -> Result<Vec<u8>, serde_json::Error> {
    let ordered: Vec<Ordered<'_>> = records
        .iter()
        .map(|record| Ordered { record, fields })
        .collect();

    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    ordered.serialize(&mut ser)?;
    Ok(buf)
}

/// A record serialized with its known fields in canonical order, then the
/// remaining non-internal fields.
struct Ordered<'a> {
    record: &'a Record,
    fields: &'a [&'a str],
}

impl Serialize for Ordered<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for field in self.fields {
            if let Some(value) = self.record.get_opt(field) {
                map.serialize_entry(field, value)?;
            }
        }
        for (name, value) in self.record.fields() {
            if !is_internal_field(name) && !self.fields.contains(&name) {
                map.serialize_entry(name, value)?;
            }
        }
        map.end()
    }
}

fn object_to_record(map: Map<String, Value>) -> Record {
    map.into_iter()
        .map(|(field, value)| (field, value_to_string(value)))
        .collect()
}

/// Numbers and booleans keep their JSON text; null becomes empty.
fn value_to_string(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
