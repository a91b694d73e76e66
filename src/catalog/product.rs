//! Simplified product record returned to clients.

use serde::Serialize;
use serde_json::{Map, Value};

/// One product in a search response.
///
/// Produced by [`ProductMapper`](crate::catalog::ProductMapper) from a single
/// upstream result item. Every key of
/// [`FIELD_MAP`](crate::catalog::mapping::FIELD_MAP) is always present, so the
/// serialized shape is identical for every item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Product(Map<String, Value>);

impl Product {
    pub(crate) fn from_fields(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Look up a field by dotted path, e.g. `"seller.nickname"`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.0.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Top-level output keys in serialization order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}
