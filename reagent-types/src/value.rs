//! The dynamic value type shared by tool inputs, judge expectations, and
//! exemplar rendering.
//!
//! Action inputs are untyped maps at the model boundary, but they
//! materialize to this sum type internally, so value coercion and equality
//! tolerance (used by the parser's value parser and the judge's tolerant
//! comparison) live in one place instead of being re-derived from
//! `serde_json::Value` at each call site.

use std::collections::BTreeMap;
use std::fmt;

/// A leaf or composite value extracted from model output or authored in a
/// test expectation.
///
/// `Map` uses a `BTreeMap` rather than a `HashMap` so that key order is
/// deterministic — the k=v exemplar renderer sorts by key, and deterministic
/// iteration means it doesn't need a separate sort step for anything already
/// stored as a `Value::Map`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A UTF-8 string.
    String(String),
    /// A numeric value. Both ints and floats coerce here.
    Number(f64),
    /// A boolean.
    Bool(bool),
    /// The absence of a value.
    Null,
    /// An ordered list of values.
    List(Vec<Value>),
    /// A string-keyed map of values, ordered by key.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// View this value as a string slice, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// View this value as a number, if it is (or tolerantly coerces to) one.
    ///
    /// Numeric strings coerce, matching the judge's tolerant-comparison rule
    /// that numeric strings coerce to float before comparison.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Render this value the way a `k=v` exemplar or fuzzy fallback would —
    /// bare for strings, Rust-literal for everything else.
    pub fn render_bare(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Number(n) => format_number(*n),
            Value::Bool(b) => b.to_string(),
            Value::Null => "null".to_string(),
            Value::List(_) | Value::Map(_) => {
                serde_json::to_string(&self.to_json()).unwrap_or_default()
            }
        }
    }

    /// Convert to a `serde_json::Value`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Null => serde_json::Value::Null,
            Value::List(items) => serde_json::Value::Array(items.iter().map(Value::to_json).collect()),
            Value::Map(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }

    /// Convert from a `serde_json::Value`.
    pub fn from_json(value: &serde_json::Value) -> Value {
        match value {
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(0.0)),
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Array(items) => {
                Value::List(items.iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), Value::from_json(v)))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render_bare())
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// A tool's decoded `Action Input`. Always a map — it may be empty, but
/// never a bare scalar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionInput(pub BTreeMap<String, Value>);

impl ActionInput {
    /// An empty action input.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from a map of values.
    pub fn new(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }

    /// Look up a key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether this action input carries no keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate key/value pairs in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Convert to a `serde_json::Value::Object`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(self.0.iter().map(|(k, v)| (k.clone(), v.to_json())).collect())
    }

    /// Build from a JSON object. A non-object input produces an empty map —
    /// callers that need to preserve a scalar wrap it under a synthetic
    /// `value` key before constructing an `ActionInput`.
    pub fn from_json_object(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(map) => {
                Self(map.iter().map(|(k, v)| (k.clone(), Value::from_json(v))).collect())
            }
            _ => Self::empty(),
        }
    }
}
