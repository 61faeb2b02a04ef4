//! Structural view of a Value: which values decompose into children, how
//! children are addressed, and how a structured value is rebuilt from them.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Address of one child inside a structured value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Index(usize),
    Field(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{i}"),
            Key::Field(name) => f.write_str(name),
        }
    }
}

impl From<usize> for Key {
    fn from(i: usize) -> Self {
        Key::Index(i)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Field(name.to_string())
    }
}

/// The two structured forms. Everything else is a leaf.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Structure {
    Array,
    Record,
}

impl Structure {
    /// Rebuild a structured value from `(key, child)` pairs, in the order given.
    pub fn assemble(self, entries: impl IntoIterator<Item = (Key, Value)>) -> Value {
        match self {
            Structure::Array => Value::Array(entries.into_iter().map(|(_, v)| v).collect()),
            Structure::Record => {
                let fields: IndexMap<String, Value> = entries
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect();
                Value::Record(fields)
            }
        }
    }
}

impl Value {
    /// `Some` for arrays and records.
    #[inline]
    pub fn structure(&self) -> Option<Structure> {
        match self {
            Value::Array(_) => Some(Structure::Array),
            Value::Record(_) => Some(Structure::Record),
            _ => None,
        }
    }

    #[inline]
    pub fn is_structured(&self) -> bool {
        self.structure().is_some()
    }

    /// Child keys in order: indices for arrays, field names for records, empty for leaves.
    pub fn keys(&self) -> Vec<Key> {
        match self {
            Value::Array(items) => (0..items.len()).map(Key::Index).collect(),
            Value::Record(fields) => fields.keys().cloned().map(Key::Field).collect(),
            _ => Vec::new(),
        }
    }

    /// Child lookup. A field key never matches an array and an index never matches a record.
    pub fn get(&self, key: &Key) -> Option<&Value> {
        match (self, key) {
            (Value::Array(items), Key::Index(i)) => items.get(*i),
            (Value::Record(fields), Key::Field(name)) => fields.get(name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_follow_shape() {
        let arr = Value::array([Value::f(1.0), Value::f(2.0)]);
        assert_eq!(arr.keys(), vec![Key::Index(0), Key::Index(1)]);
        let rec = Value::record([("b", Value::f(1.0)), ("a", Value::f(2.0))]);
        assert_eq!(rec.keys(), vec![Key::from("b"), Key::from("a")]);
        assert!(Value::vec3(0.0, 0.0, 0.0).keys().is_empty());
    }

    #[test]
    fn get_rejects_mismatched_key_kind() {
        let arr = Value::array([Value::f(1.0)]);
        assert_eq!(arr.get(&Key::Index(0)), Some(&Value::f(1.0)));
        assert_eq!(arr.get(&Key::from("0")), None);
        let rec = Value::record([("0", Value::f(1.0))]);
        assert_eq!(rec.get(&Key::Index(0)), None);
    }

    #[test]
    fn assemble_round_trips_structure() {
        let rec = Value::record([("x", Value::f(1.0)), ("y", Value::f(2.0))]);
        let rebuilt = Structure::Record.assemble(
            rec.keys()
                .into_iter()
                .map(|k| (k.clone(), rec.get(&k).cloned().unwrap())),
        );
        assert_eq!(rebuilt, rec);
    }
}
