//! JSON ingestion implementation.
//!
//! Supported inputs:
//! - A JSON array of objects: `[{"a":1}, {"a":2}]` (one row per element)
//! - A single JSON object: `{"a":1}` (one row)
//!
//! Nested objects are flattened into column names joined by a separator, `.` by default:
//! `{"user": {"name": "Ada"}}` becomes column `user.name`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::Map;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{Table, Value};

use super::IngestionFormat;
use super::records::{FlatRecord, table_from_records};

/// Default separator used to join nested object keys.
pub const DEFAULT_SEPARATOR: &str = ".";

/// Ingest a JSON file into an in-memory [`Table`].
pub fn ingest_json_from_path(path: impl AsRef<Path>, separator: &str) -> IngestionResult<Table> {
    let reader = BufReader::new(File::open(path)?);
    let value: serde_json::Value = serde_json::from_reader(reader)?;
    ingest_json_value(value, separator)
}

/// Ingest JSON from an in-memory string into a [`Table`].
pub fn ingest_json_from_str(input: &str, separator: &str) -> IngestionResult<Table> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    ingest_json_value(value, separator)
}

/// Turn an already-parsed JSON document into a [`Table`].
pub fn ingest_json_value(value: serde_json::Value, separator: &str) -> IngestionResult<Table> {
    let records = match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(idx0, item)| match item {
                serde_json::Value::Object(obj) => Ok(flatten_object(obj, separator)),
                other => Err(IngestionError::malformed(
                    IngestionFormat::Json,
                    format!("record {} is not a json object (found {})", idx0 + 1, kind_of(&other)),
                )),
            })
            .collect::<IngestionResult<Vec<_>>>()?,
        serde_json::Value::Object(obj) => vec![flatten_object(obj, separator)],
        other => {
            return Err(IngestionError::malformed(
                IngestionFormat::Json,
                format!(
                    "top-level value must be an object or an array of objects (found {})",
                    kind_of(&other)
                ),
            ));
        }
    };

    Ok(table_from_records(records))
}

/// Flatten one JSON object into a [`FlatRecord`].
///
/// - Nested object keys are joined to their parent path with `separator`.
/// - Empty nested objects produce no column.
/// - Arrays are kept whole, as their compact JSON text.
/// - When two paths flatten to the same name, the one later in document order wins.
pub fn flatten_object(obj: Map<String, serde_json::Value>, separator: &str) -> FlatRecord {
    let mut out = FlatRecord::with_capacity(obj.len());
    flatten_into(&mut out, None, obj, separator);
    out
}

fn flatten_into(
    out: &mut FlatRecord,
    prefix: Option<&str>,
    obj: Map<String, serde_json::Value>,
    separator: &str,
) {
    for (key, value) in obj {
        let path = match prefix {
            Some(p) => format!("{p}{separator}{key}"),
            None => key,
        };
        match value {
            serde_json::Value::Object(nested) => flatten_into(out, Some(path.as_str()), nested, separator),
            leaf => {
                out.insert(path, convert_json_value(leaf));
            }
        }
    }
}

fn convert_json_value(v: serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int64(i),
            None => n.as_f64().map_or(Value::Null, Value::Float64),
        },
        serde_json::Value::String(s) => Value::Utf8(s),
        arr @ serde_json::Value::Array(_) => Value::Utf8(arr.to_string()),
        // Objects are recursed into by the caller.
        obj @ serde_json::Value::Object(_) => Value::Utf8(obj.to_string()),
    }
}

fn kind_of(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
