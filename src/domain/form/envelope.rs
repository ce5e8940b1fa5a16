//! Response envelope returned by the generative backend.
//!
//! The backend decides the shape of its reply; the only thing this module
//! relies on is that the model's answer is a string stored under a known
//! key somewhere in the tree. The envelope is therefore modelled as a closed
//! tagged union and searched with exhaustive matches.
//!
//! # Search order
//!
//! Object members live in a `BTreeMap`, so siblings are always visited in
//! lexicographic key order. A string-valued match on the current object wins
//! over any match deeper in the tree. When several `text` members exist at
//! different depths, callers must not read meaning into which one is chosen
//! beyond that rule.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Number, Value};

/// Key under which Gemini places generated text.
pub const TEXT_KEY: &str = "text";

/// Closed representation of an arbitrary JSON reply.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum ResponseEnvelope {
    /// JSON `null`; the "absent" case.
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<ResponseEnvelope>),
    Object(BTreeMap<String, ResponseEnvelope>),
}

impl ResponseEnvelope {
    /// Finds the first string stored under `key`, searching depth-first.
    ///
    /// Returns `None` when no object in the tree carries a string-valued
    /// `key`. A present but empty string is returned as `Some("")`.
    pub fn find_text(&self, key: &str) -> Option<&str> {
        match self {
            ResponseEnvelope::Object(members) => find_in_object(members, key),
            ResponseEnvelope::Array(items) => find_in_items(items, key),
            ResponseEnvelope::Null
            | ResponseEnvelope::Bool(_)
            | ResponseEnvelope::Number(_)
            | ResponseEnvelope::String(_) => None,
        }
    }

    /// Returns true for the object variant.
    pub fn is_object(&self) -> bool {
        matches!(self, ResponseEnvelope::Object(_))
    }

    /// Human-readable name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ResponseEnvelope::Null => "null",
            ResponseEnvelope::Bool(_) => "boolean",
            ResponseEnvelope::Number(_) => "number",
            ResponseEnvelope::String(_) => "string",
            ResponseEnvelope::Array(_) => "array",
            ResponseEnvelope::Object(_) => "object",
        }
    }
}

impl From<Value> for ResponseEnvelope {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ResponseEnvelope::Null,
            Value::Bool(b) => ResponseEnvelope::Bool(b),
            Value::Number(n) => ResponseEnvelope::Number(n),
            Value::String(s) => ResponseEnvelope::String(s),
            Value::Array(items) => {
                ResponseEnvelope::Array(items.into_iter().map(ResponseEnvelope::from).collect())
            }
            Value::Object(members) => ResponseEnvelope::Object(
                members
                    .into_iter()
                    .map(|(k, v)| (k, ResponseEnvelope::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Searches `envelope` for `key` and returns an owned copy of the text.
pub fn extract_text(envelope: &ResponseEnvelope, key: &str) -> Option<String> {
    envelope.find_text(key).map(str::to_owned)
}

fn find_in_object<'a>(
    members: &'a BTreeMap<String, ResponseEnvelope>,
    key: &str,
) -> Option<&'a str> {
    if let Some(ResponseEnvelope::String(text)) = members.get(key) {
        return Some(text);
    }

    members.values().find_map(|member| match member {
        ResponseEnvelope::Object(nested) => find_in_object(nested, key),
        ResponseEnvelope::Array(items) => find_in_items(items, key),
        ResponseEnvelope::Null
        | ResponseEnvelope::Bool(_)
        | ResponseEnvelope::Number(_)
        | ResponseEnvelope::String(_) => None,
    })
}

// Only object elements are descended; arrays nested directly in arrays are not.
fn find_in_items<'a>(items: &'a [ResponseEnvelope], key: &str) -> Option<&'a str> {
    items.iter().find_map(|item| match item {
        ResponseEnvelope::Object(nested) => find_in_object(nested, key),
        ResponseEnvelope::Null
        | ResponseEnvelope::Bool(_)
        | ResponseEnvelope::Number(_)
        | ResponseEnvelope::String(_)
        | ResponseEnvelope::Array(_) => None,
    })
}
