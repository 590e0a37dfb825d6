//! Field extraction helpers shared by the response models.
//!
//! Raw documents are schemaless; every accessor here turns a dynamic value
//! into a typed one or fails with a located [`ShapeError`].

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::errors::ShapeError;
use crate::models::DocRef;

pub(crate) fn required_str(fields: &Map<String, Value>, name: &str) -> Result<String, ShapeError> {
    match fields.get(name) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ShapeError::string_type(name)),
        None => Err(ShapeError::missing(name)),
    }
}

pub(crate) fn optional_str(
    fields: &Map<String, Value>,
    name: &str,
) -> Result<Option<String>, ShapeError> {
    match fields.get(name) {
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Null) | None => Ok(None),
        Some(_) => Err(ShapeError::string_type(name)),
    }
}

pub(crate) fn optional_bool(
    fields: &Map<String, Value>,
    name: &str,
) -> Result<Option<bool>, ShapeError> {
    match fields.get(name) {
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(Value::Null) | None => Ok(None),
        Some(_) => Err(ShapeError::bool_type(name)),
    }
}

pub(crate) fn required_enum<T>(
    fields: &Map<String, Value>,
    name: &str,
    parse: fn(&str) -> Option<T>,
    allowed: &[&str],
) -> Result<T, ShapeError> {
    match fields.get(name) {
        Some(Value::String(s)) => parse(s).ok_or_else(|| ShapeError::invalid_enum(name, allowed)),
        Some(_) => Err(ShapeError::invalid_enum(name, allowed)),
        None => Err(ShapeError::missing(name)),
    }
}

pub(crate) fn optional_enum<T>(
    fields: &Map<String, Value>,
    name: &str,
    parse: fn(&str) -> Option<T>,
    allowed: &[&str],
) -> Result<Option<T>, ShapeError> {
    match fields.get(name) {
        Some(Value::String(s)) => parse(s)
            .map(Some)
            .ok_or_else(|| ShapeError::invalid_enum(name, allowed)),
        Some(Value::Null) | None => Ok(None),
        Some(_) => Err(ShapeError::invalid_enum(name, allowed)),
    }
}

pub(crate) fn optional_datetime(
    fields: &Map<String, Value>,
    name: &str,
) -> Result<Option<DateTime<Utc>>, ShapeError> {
    match fields.get(name) {
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|_| ShapeError::datetime_parsing(name)),
        Some(Value::Null) | None => Ok(None),
        Some(_) => Err(ShapeError::datetime_parsing(name)),
    }
}

/// A required list of document references, each element strictly normalized.
pub(crate) fn ref_list(fields: &Map<String, Value>, name: &str) -> Result<Vec<DocRef>, ShapeError> {
    match fields.get(name) {
        Some(Value::Array(values)) => values
            .iter()
            .enumerate()
            .map(|(i, v)| DocRef::normalize(v).map_err(|e| e.at(i.to_string()).at(name)))
            .collect(),
        Some(_) => Err(ShapeError::list_type(name)),
        None => Err(ShapeError::missing(name)),
    }
}

pub(crate) fn optional_ref(
    fields: &Map<String, Value>,
    name: &str,
) -> Result<Option<DocRef>, ShapeError> {
    match fields.get(name) {
        Some(Value::Null) | None => Ok(None),
        Some(v) => DocRef::normalize(v).map(Some).map_err(|e| e.at(name)),
    }
}

/// Best-effort normalization for filter membership lists. Unlike [`ref_list`]
/// an unrecognized element does not fail shaping; it falls back to the JSON
/// rendering of the value. Absent field means an empty list.
pub(crate) fn member_ids(
    fields: &Map<String, Value>,
    name: &str,
) -> Result<Vec<String>, ShapeError> {
    match fields.get(name) {
        Some(Value::Array(values)) => Ok(values.iter().map(member_id).collect()),
        Some(_) => Err(ShapeError::list_type(name)),
        None => Ok(Vec::new()),
    }
}

fn member_id(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => match map.get("id") {
            Some(Value::String(id)) => id.clone(),
            _ => value.to_string(),
        },
        other => other.to_string(),
    }
}
