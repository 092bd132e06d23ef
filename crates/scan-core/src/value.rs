//! Scalar values, composite parameter keys and assignments.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::ErrorInfo;

/// Scalar carried by templates and assignments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean flag (`T`/`F` in input decks).
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Anything else, kept verbatim.
    Str(String),
}

/// Hashable identity of a [`Value`], used to index axis positions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueKey {
    /// Boolean identity.
    Bool(bool),
    /// Integer identity.
    Int(i64),
    /// IEEE-754 bit pattern with `-0.0` folded onto `0.0`.
    Float(u64),
    /// String identity.
    Str(String),
}

impl Value {
    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Bool(_) | Value::Str(_) => None,
        }
    }

    /// Identity used to decide whether two values occupy the same axis slot.
    pub fn identity(&self) -> ValueKey {
        match self {
            Value::Bool(v) => ValueKey::Bool(*v),
            Value::Int(v) => ValueKey::Int(*v),
            Value::Float(v) => {
                let v = if *v == 0.0 { 0.0 } else { *v };
                ValueKey::Float(v.to_bits())
            }
            Value::Str(v) => ValueKey::Str(v.clone()),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(true) => write!(f, "T"),
            Value::Bool(false) => write!(f, "F"),
            Value::Int(v) => write!(f, "{v}"),
            // Debug keeps the shortest round-trip form and always marks floats.
            Value::Float(v) => write!(f, "{v:?}"),
            Value::Str(v) => write!(f, "{v}"),
        }
    }
}

/// Separator between block and parameter name in a composite key.
pub const KEY_SEPARATOR: char = ':';

/// Parsed composite key of the form `block:name`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParamKey {
    /// Logical grouping (a deck block).
    pub block: String,
    /// Parameter identifier within the block.
    pub name: String,
}

impl ParamKey {
    /// Creates a key from its two halves.
    pub fn new(block: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            block: block.into(),
            name: name.into(),
        }
    }

    /// Parses `block:name`. Both halves must be non-empty, trimmed and free
    /// of further separators.
    pub fn parse(raw: &str) -> Result<Self, ErrorInfo> {
        let malformed = |reason: &str| {
            ErrorInfo::new("malformed-key", reason.to_string())
                .with_context("key", raw)
                .with_hint("expected `block:name`")
        };
        let Some((block, name)) = raw.split_once(KEY_SEPARATOR) else {
            return Err(malformed("composite key is missing the block separator"));
        };
        if name.contains(KEY_SEPARATOR) {
            return Err(malformed("composite key has more than one separator"));
        }
        for part in [block, name] {
            if part.is_empty() {
                return Err(malformed("composite key has an empty component"));
            }
            if part.chars().any(char::is_whitespace) {
                return Err(malformed("composite key components may not contain whitespace"));
            }
        }
        Ok(Self::new(block, name))
    }
}

impl Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.block, KEY_SEPARATOR, self.name)
    }
}

/// One concrete point in a parameter space: composite key to value, in
/// parameter-space order.
///
/// Assignments are built once and then only read; the builder methods take
/// `self` by value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment {
    values: IndexMap<String, Value>,
}

impl Assignment {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the assignment extended with `key = value`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Looks up a value by composite key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Iterates `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Iterates keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.keys().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the assignment holds no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_zero_shares_identity() {
        assert_eq!(Value::Float(-0.0).identity(), Value::Float(0.0).identity());
        assert_ne!(Value::Float(1.0).identity(), Value::Int(1).identity());
    }

    #[test]
    fn floats_display_round_trip() {
        for v in [1.23, 100.0, 1.0e-6, -5.5e20] {
            let text = Value::Float(v).to_string();
            assert_eq!(text.parse::<f64>().unwrap(), v);
        }
        assert_eq!(Value::Float(100.0).to_string(), "100.0");
        assert_eq!(Value::Bool(true).to_string(), "T");
    }
}
