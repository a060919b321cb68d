use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Typed attribute value stored in a key-value item.
///
/// Mirrors the attribute shapes a document store exposes natively (string,
/// number, boolean, list, nested map). Items are persisted as
/// `BTreeMap<String, Value>` so serialization order is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    /// Explicit null attribute.
    Null,
    /// Boolean attribute.
    Bool(bool),
    /// Signed 64-bit integer attribute.
    Int(i64),
    /// Unsigned 64-bit integer attribute, for values that may exceed `i64::MAX`.
    UInt(u64),
    /// UTF-8 string attribute.
    String(String),
    /// Ordered list of attributes.
    Array(Vec<Value>),
    /// Nested map of attributes.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Returns the inner string if this is a `Value::String`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the inner integer if this is a `Value::Int`.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the inner integer if this is a `Value::UInt`.
    #[must_use]
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Self::UInt(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns a short name for the variant, used in mapping errors.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Self::UInt(n)
    }
}

/// A storage item: attribute name to typed value.
pub type Item = BTreeMap<String, Value>;
