use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A loaded game file: string keys mapped to nested values.
///
/// Keys are kept sorted so that every walk over the tree is deterministic.
pub type ConfigTree = BTreeMap<String, Value>;

/// An untyped value read from a game file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A text value.
    String(String),
    /// A 64-bit signed integer value.
    Integer(i64),
    /// A 64-bit floating-point value.
    Float(f64),
    /// A boolean value.
    Boolean(bool),
    /// An ordered list of values.
    List(Vec<Value>),
    /// A string-keyed map of values.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Read a scalar from command-line style text: all-digit text is an
    /// integer, `true`/`false` a boolean, anything else a string.
    pub fn parse_scalar(text: &str) -> Self {
        if !text.is_empty()
            && text.bytes().all(|b| b.is_ascii_digit())
            && let Ok(n) = text.parse::<i64>()
        {
            return Self::Integer(n);
        }
        match text {
            "true" => Self::Boolean(true),
            "false" => Self::Boolean(false),
            _ => Self::String(text.to_string()),
        }
    }

    /// Returns the inner mapping, if this is a map.
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the inner items, if this is a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the inner text, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the inner integer, if this is one.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
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
        Self::Integer(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::List(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            Self::Map(_) => write!(f, "{{...}}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_json_picks_narrowest_variant() {
        let value: Value = serde_json::from_str(r#"{"a": 5, "b": 2.5, "c": "x", "d": [true]}"#)
            .unwrap();
        let map = value.as_map().unwrap();
        assert_eq!(map["a"], Value::Integer(5));
        assert_eq!(map["b"], Value::Float(2.5));
        assert_eq!(map["c"], Value::String("x".into()));
        assert_eq!(map["d"], Value::List(vec![Value::Boolean(true)]));
    }

    #[test]
    fn display_list_joins_items() {
        let value = Value::List(vec![Value::from(1), Value::from("two")]);
        assert_eq!(value.to_string(), "[1, two]");
    }

    #[test]
    fn parse_scalar_picks_type() {
        assert_eq!(Value::parse_scalar("42"), Value::Integer(42));
        assert_eq!(Value::parse_scalar("true"), Value::Boolean(true));
        assert_eq!(Value::parse_scalar("-3"), Value::from("-3"));
        assert_eq!(Value::parse_scalar("rain"), Value::from("rain"));
        assert_eq!(Value::parse_scalar(""), Value::from(""));
    }

    #[test]
    fn accessors_reject_other_variants() {
        let value = Value::from("sword");
        assert_eq!(value.as_str(), Some("sword"));
        assert!(value.as_map().is_none());
        assert!(value.as_list().is_none());
        assert!(value.as_integer().is_none());
    }
}
