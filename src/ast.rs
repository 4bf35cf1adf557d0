//! The key/value AST produced by a scan.
//!
//! Keys keep the order in which they were first seen. A key that recurs is
//! coalesced into an ordered sequence by [`Ast::insert`]; [`Ast::set`] is the
//! plain overwrite used by rules that manage their own values.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum Value {
    Scalar(String),
    Sequence(Vec<String>),
}

impl Value {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) => Some(s),
            Value::Sequence(_) => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[String]> {
        match self {
            Value::Sequence(items) => Some(items),
            Value::Scalar(_) => None,
        }
    }

    /// All values in input order, whatever the shape.
    pub fn values(&self) -> Vec<&str> {
        match self {
            Value::Scalar(s) => vec![s.as_str()],
            Value::Sequence(items) => items.iter().map(String::as_str).collect(),
        }
    }

    /// Adds `value` after the existing ones, promoting a scalar to a sequence.
    pub fn push(&mut self, value: String) {
        match self {
            Value::Scalar(existing) => {
                let first = std::mem::take(existing);
                *self = Value::Sequence(vec![first, value]);
            }
            Value::Sequence(items) => items.push(value),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(s)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::Sequence(items)
    }
}

impl From<Vec<&str>> for Value {
    fn from(items: Vec<&str>) -> Self {
        Value::Sequence(items.into_iter().map(String::from).collect())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Ast {
    entries: Vec<(String, Value)>,
    index: HashMap<String, usize>,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Records one occurrence of `key`.
    ///
    /// A new key stores a scalar, a second occurrence turns it into
    /// `[first, second]`, later ones append.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1.push(value),
            None => self.push_entry(key, Value::Scalar(value)),
        }
    }

    /// Stores `value` under `key`, replacing whatever was there.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.push_entry(key, value);
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let i = self.index.remove(key)?;
        let (_, value) = self.entries.remove(i);
        for slot in self.index.values_mut() {
            if *slot > i {
                *slot -= 1;
            }
        }
        Some(value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn push_entry(&mut self, key: String, value: Value) {
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
    }
}

impl PartialEq for Ast {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for Ast {}

impl IntoIterator for Ast {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Ast {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut ast = Ast::new();
        for (key, value) in iter {
            ast.set(key, value);
        }
        ast
    }
}

impl Serialize for Ast {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
