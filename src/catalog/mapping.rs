//! Upstream item → [`Product`] mapping.
//!
//! Every output field is described by one row of [`FIELD_MAP`]: where it
//! comes from, what replaces a missing or unusable value, and which rewrite
//! applies. Nothing outside this table decides a default, which keeps the
//! output shape constant no matter how sparse the upstream item is.

use serde_json::{Map, Value};

use crate::catalog::affiliate::AffiliateTagger;
use crate::catalog::product::Product;
use crate::catalog::thumbnail;

/// What an absent or unusable upstream value turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Passed through as is; absent becomes `null`.
    Null,
    /// Falsy values become `null`.
    NullIfFalsy,
    /// Falsy values become `0`.
    Zero,
    /// The value's truthiness as a boolean.
    Flag,
    /// Non-string values become `""`.
    Text,
}

/// Post-processing for text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rewrite {
    None,
    UpscaleThumbnail,
    TagAffiliate,
}

/// One output field of a [`Product`].
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    /// Output path; two segments place the field in a nested object.
    pub output: &'static [&'static str],
    /// Path into the upstream item.
    pub source: &'static [&'static str],
    pub fallback: Fallback,
    pub rewrite: Rewrite,
}

const fn field(
    output: &'static [&'static str],
    source: &'static [&'static str],
    fallback: Fallback,
) -> FieldRule {
    FieldRule {
        output,
        source,
        fallback,
        rewrite: Rewrite::None,
    }
}

const fn text(
    output: &'static [&'static str],
    source: &'static [&'static str],
    rewrite: Rewrite,
) -> FieldRule {
    FieldRule {
        output,
        source,
        fallback: Fallback::Text,
        rewrite,
    }
}

/// The product schema, in output order.
pub const FIELD_MAP: &[FieldRule] = &[
    field(&["id"], &["id"], Fallback::Null),
    field(&["title"], &["title"], Fallback::Null),
    field(&["price"], &["price"], Fallback::Null),
    field(&["original_price"], &["original_price"], Fallback::NullIfFalsy),
    field(&["currency_id"], &["currency_id"], Fallback::Null),
    text(&["thumbnail"], &["thumbnail"], Rewrite::UpscaleThumbnail),
    text(&["permalink"], &["permalink"], Rewrite::TagAffiliate),
    field(&["condition"], &["condition"], Fallback::Null),
    field(&["sold_quantity"], &["sold_quantity"], Fallback::Zero),
    field(&["available_quantity"], &["available_quantity"], Fallback::Zero),
    field(&["free_shipping"], &["shipping", "free_shipping"], Fallback::Flag),
    field(&["installments"], &["installments"], Fallback::NullIfFalsy),
    field(&["seller", "id"], &["seller", "id"], Fallback::Null),
    field(&["seller", "nickname"], &["seller", "nickname"], Fallback::Null),
    field(&["address", "state_name"], &["address", "state_name"], Fallback::Null),
    field(&["address", "city_name"], &["address", "city_name"], Fallback::Null),
];

/// JSON truthiness: `null`, `false`, `0` and `""` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn lookup<'a>(item: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(item, |current, segment| current.as_object()?.get(*segment))
}

fn insert_at(fields: &mut Map<String, Value>, path: &[&str], value: Value) {
    match path {
        [] => {}
        [key] => {
            fields.insert((*key).to_string(), value);
        }
        [key, rest @ ..] => {
            let nested = fields
                .entry((*key).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(nested) = nested {
                insert_at(nested, rest, value);
            }
        }
    }
}

/// Applies [`FIELD_MAP`] to upstream items.
#[derive(Debug, Clone)]
pub struct ProductMapper {
    tagger: AffiliateTagger,
}

impl ProductMapper {
    pub fn new(tagger: AffiliateTagger) -> Self {
        Self { tagger }
    }

    /// Map one upstream result item. Never fails; unusable values degrade
    /// to the field's fallback.
    pub fn map(&self, item: &Value) -> Product {
        let mut fields = Map::new();
        for rule in FIELD_MAP {
            let value = self.resolve(rule, lookup(item, rule.source));
            insert_at(&mut fields, rule.output, value);
        }
        Product::from_fields(fields)
    }

    /// Map a whole result list, preserving order.
    pub fn map_all(&self, items: &[Value]) -> Vec<Product> {
        items.iter().map(|item| self.map(item)).collect()
    }

    fn resolve(&self, rule: &FieldRule, raw: Option<&Value>) -> Value {
        match rule.fallback {
            Fallback::Null => raw.cloned().unwrap_or(Value::Null),
            Fallback::NullIfFalsy => match raw {
                Some(v) if is_truthy(v) => v.clone(),
                _ => Value::Null,
            },
            Fallback::Zero => match raw {
                Some(v) if is_truthy(v) => v.clone(),
                _ => Value::from(0),
            },
            Fallback::Flag => Value::Bool(raw.is_some_and(is_truthy)),
            Fallback::Text => {
                let text = raw.and_then(Value::as_str).unwrap_or_default();
                Value::String(self.rewrite(rule.rewrite, text))
            }
        }
    }

    fn rewrite(&self, rewrite: Rewrite, text: &str) -> String {
        match rewrite {
            Rewrite::None => text.to_string(),
            Rewrite::UpscaleThumbnail => thumbnail::upscale(text),
            Rewrite::TagAffiliate => self.tagger.tag(text),
        }
    }
}
