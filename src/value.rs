//! Value - The dynamic data graph type.
//!
//! A [`Value`] is either a scalar leaf or a handle to a [`ReactiveMap`].
//! Scalars compare structurally; maps compare by handle identity, matching
//! the strict-inequality semantics the change detection relies on (assigning
//! a brand-new map always counts as a change, even if its contents are
//! equal).

use std::fmt;

use crate::reactive::ReactiveMap;

// =============================================================================
// Value
// =============================================================================

/// One value in the data graph: a scalar leaf or a nested reactive map.
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Map(ReactiveMap),
}

impl Value {
    /// Build a nested map value. Observation happens at construction: every
    /// key passed here becomes a reactive slot of the new map.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Map(ReactiveMap::observe(entries))
    }

    /// The nested map handle, if this value is a map.
    pub fn as_map(&self) -> Option<&ReactiveMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// The string slice, if this value is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            // Map comparison is handle identity, not deep equality.
            (Value::Map(a), Value::Map(b)) => ReactiveMap::handle_eq(a, b),
            _ => false,
        }
    }
}

/// Rendered form used by the text/html/model/attr updaters.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
            Value::Map(_) => f.write_str("[object]"),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<ReactiveMap> for Value {
    fn from(map: ReactiveMap) -> Self {
        Value::Map(map)
    }
}
