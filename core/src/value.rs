//! Values stored for parsed flags.
//!
//! Flags may hold values of different shapes, so the result of a parse is a
//! mapping from flag name to [`Value`], a small tagged union with typed
//! accessors. Values serialize to their natural JSON shape, which is what the
//! `argtree` binary prints.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Serialize, Serializer};

/// A parsed flag value.
///
/// # Examples
///
/// ```
/// use argtree_core::Value;
///
/// let v = Value::from(vec!["a".to_string(), "b".to_string()]);
/// assert_eq!(v.as_str_list(), Some(vec!["a", "b"]));
/// assert_eq!(Value::from(42i64).as_int(), Some(42));
/// assert!(Value::from("text").as_bool().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean switch.
    Bool(bool),
    /// Signed 64-bit integer.
    Int(i64),
    /// Time interval, serialized in humantime notation (e.g. `"2m 2s"`).
    #[serde(serialize_with = "serialize_duration")]
    Duration(Duration),
    /// Raw or parsed string.
    Str(String),
    /// Ordered sequence, used by accumulating flags.
    List(Vec<Value>),
    /// String-keyed mapping, used by key/value style flags.
    Map(BTreeMap<String, Value>),
}

fn serialize_duration<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&humantime::format_duration(*d))
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Self::Duration(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the items of a list whose elements are all strings.
    pub fn as_str_list(&self) -> Option<Vec<&str>> {
        self.as_list()?.iter().map(Value::as_str).collect()
    }

    /// Short name of the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Duration(_) => "duration",
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<Duration> for Value {
    fn from(d: Duration) -> Self {
        Self::Duration(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Self::List(items.into_iter().map(Self::Str).collect())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self::Map(map)
    }
}
