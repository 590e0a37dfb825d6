//! Normalized document references.

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::errors::ShapeError;

/// A reference to another document, normalized to its bare identifier.
///
/// Raw documents carry references in two shapes: a plain identifier string,
/// or a mapping with an `"id"` key (the store adapter decodes native
/// reference values into the latter). Anything else is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocRef {
    id: String,
}

impl DocRef {
    /// Normalize a raw value into a reference. The error carries no location;
    /// callers prepend the field path they were shaping.
    pub fn normalize(value: &Value) -> Result<Self, ShapeError> {
        match value {
            Value::String(s) => Ok(Self { id: s.clone() }),
            Value::Object(map) => match map.get("id") {
                Some(Value::String(id)) => Ok(Self { id: id.clone() }),
                _ => Err(ShapeError::invalid_reference(value)),
            },
            _ => Err(ShapeError::invalid_reference(value)),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

// References serialize as the bare identifier string.
impl Serialize for DocRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.id)
    }
}
