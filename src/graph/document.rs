//! Conversion between SDK `Document` values and `serde_json::Value`.

use std::collections::HashMap;

use aws_smithy_types::{Document, Number};
use serde_json::Value as JsonValue;

use crate::graph::row::Params;

/// Converts an SDK document into JSON.
///
/// Non-finite floats have no JSON representation and become `null`.
/// Document objects are unordered, so their keys come out sorted.
pub fn to_json(doc: &Document) -> JsonValue {
    match doc {
        Document::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
            JsonValue::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.clone(), to_json(v)))
                    .collect(),
            )
        }
        Document::Array(items) => JsonValue::Array(items.iter().map(to_json).collect()),
        Document::Number(Number::PosInt(n)) => JsonValue::from(*n),
        Document::Number(Number::NegInt(n)) => JsonValue::from(*n),
        Document::Number(Number::Float(f)) => serde_json::Number::from_f64(*f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Document::String(s) => JsonValue::String(s.clone()),
        Document::Bool(b) => JsonValue::Bool(*b),
        Document::Null => JsonValue::Null,
    }
}

/// Converts JSON into an SDK document.
pub fn from_json(value: &JsonValue) -> Document {
    match value {
        JsonValue::Null => Document::Null,
        JsonValue::Bool(b) => Document::Bool(*b),
        JsonValue::Number(n) => {
            if let Some(u) = n.as_u64() {
                Document::Number(Number::PosInt(u))
            } else if let Some(i) = n.as_i64() {
                Document::Number(Number::NegInt(i))
            } else {
                Document::Number(Number::Float(n.as_f64().unwrap_or(f64::NAN)))
            }
        }
        JsonValue::String(s) => Document::String(s.clone()),
        JsonValue::Array(items) => Document::Array(items.iter().map(from_json).collect()),
        JsonValue::Object(map) => Document::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), from_json(v)))
                .collect(),
        ),
    }
}

/// Converts query parameters into the document map the SDK expects.
pub fn params_to_documents(params: &Params) -> HashMap<String, Document> {
    params
        .iter()
        .map(|(k, v)| (k.clone(), from_json(v)))
        .collect()
}
