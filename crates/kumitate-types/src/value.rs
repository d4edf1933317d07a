//! Tagged content/style values.
//!
//! Block content and styles are key → [`Value`] maps whose keys come from a
//! schema defined at runtime (the block registry). Values carry their own
//! tag so the engine can check them against the declared field kind at write
//! time instead of accepting arbitrary JSON.
//!
//! On the wire a value is adjacently tagged, e.g.
//! `{"kind":"text","value":"Welcome"}` or `{"kind":"reference","value":"/img/hero.png"}`,
//! which keeps text and references distinct through a save/load cycle.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One row of a repeating group: sub-field key → value.
pub type Record = BTreeMap<String, Value>;

/// A content or style value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// Plain, long, or rich text; also select choices and most style values.
    Text(String),
    /// Numeric field or spacing style.
    Number(f64),
    /// Toggle.
    Bool(bool),
    /// Image, URL, or icon reference (opaque to the core).
    Reference(String),
    /// Rows of a repeating group.
    List(Vec<Record>),
}

impl Value {
    /// Create a text value.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Create a reference value.
    pub fn reference(s: impl Into<String>) -> Self {
        Self::Reference(s.into())
    }

    /// Tag name, matching the serialized `kind`.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Number(_) => "number",
            Value::Bool(_) => "bool",
            Value::Reference(_) => "reference",
            Value::List(_) => "list",
        }
    }

    /// Borrow as text, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow as a reference, if this is a reference value.
    pub fn as_reference(&self) -> Option<&str> {
        match self {
            Value::Reference(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Record]> {
        match self {
            Value::List(rows) => Some(rows),
            _ => None,
        }
    }

    /// False if this value, or any value nested in its rows, is NaN or infinite.
    ///
    /// JSON has no encoding for those, so they cannot survive a save.
    pub fn is_finite(&self) -> bool {
        match self {
            Value::Number(n) => n.is_finite(),
            Value::List(rows) => rows.iter().flat_map(|r| r.values()).all(Value::is_finite),
            _ => true,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Record>> for Value {
    fn from(rows: Vec<Record>) -> Self {
        Value::List(rows)
    }
}

/// Build a [`Record`] from `(key, value)` pairs.
pub fn record<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Record
where
    K: Into<String>,
    V: Into<Value>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
