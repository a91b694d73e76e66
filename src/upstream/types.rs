//! Upstream wire types.

use serde_json::Value;

/// The part of an upstream search response this service reads.
///
/// The marketplace wraps results in an envelope (`site_id`, `paging`,
/// `filters`, ...). Only `results` is kept; the envelope is never forwarded.
/// Items stay raw JSON so a single odd item cannot fail the whole page.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub results: Vec<Value>,
}

impl SearchPage {
    /// Extract the result list. `None` when the body has no `results` array.
    pub fn from_body(body: Value) -> Option<Self> {
        match body {
            Value::Object(mut envelope) => match envelope.remove("results") {
                Some(Value::Array(results)) => Some(Self { results }),
                _ => None,
            },
            _ => None,
        }
    }
}
