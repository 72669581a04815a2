//! Named scalar fields the controls read from and write back to.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// A single model field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Number(f64),
    Bool(bool),
    /// Selected entry of an option list.
    Index(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Number,
    Bool,
    Index,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Number => f.write_str("number"),
            ValueKind::Bool => f.write_str("boolean"),
            ValueKind::Index => f.write_str("index"),
        }
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Number(_) => ValueKind::Number,
            Value::Bool(_) => ValueKind::Bool,
            Value::Index(_) => ValueKind::Index,
        }
    }

    pub fn as_number(&self) -> f64 {
        match *self {
            Value::Number(n) => n,
            Value::Bool(b) => f64::from(u8::from(b)),
            Value::Index(i) => i as f64,
        }
    }

    /// Truthiness: zero, NaN and `false` are false.
    pub fn is_truthy(&self) -> bool {
        match *self {
            Value::Number(n) => n != 0.0 && !n.is_nan(),
            Value::Bool(b) => b,
            Value::Index(i) => i != 0,
        }
    }

    /// Negative and non-finite numbers have no index.
    pub fn as_index(&self) -> Option<usize> {
        match *self {
            Value::Index(i) => Some(i),
            Value::Number(n) if n.is_finite() && n >= 0.0 => Some(n as usize),
            Value::Number(_) => None,
            Value::Bool(b) => Some(usize::from(b)),
        }
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

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        Value::Index(i)
    }
}

/// Field name to value mapping owned by the application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    fields: BTreeMap<String, Value>,
}

pub type SharedModel = Rc<RefCell<Model>>;

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.fields.get(key).copied()
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).map(|v| v.as_number())
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.fields.insert(key.to_owned(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_shared(self) -> SharedModel {
        Rc::new(RefCell::new(self))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Model {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Model {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
