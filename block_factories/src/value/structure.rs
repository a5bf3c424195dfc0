//! Struct block values.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use super::Value;

/// Ordered name → value pairs produced by a struct block factory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StructValue {
    block_type: Option<String>,
    fields: IndexMap<String, Value>,
}

impl StructValue {
    /// Create an empty value for the named block type (`None` when the block
    /// was declared inline).
    #[must_use]
    pub fn new(block_type: Option<String>) -> Self {
        Self {
            block_type,
            fields: IndexMap::new(),
        }
    }

    /// Create a value from ordered `(name, value)` pairs.
    #[must_use]
    pub fn from_fields<I, K>(block_type: Option<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            block_type,
            fields: fields
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }

    /// Name of the struct block type, if it has one.
    #[must_use]
    pub fn block_type(&self) -> Option<&str> {
        self.block_type.as_deref()
    }

    /// Look up a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Insert or replace a field, keeping the original position on replace.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    /// Iterate over fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` when the value has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn map_values<F>(self, f: F) -> Self
    where
        F: Fn(Value) -> Value,
    {
        Self {
            block_type: self.block_type,
            fields: self
                .fields
                .into_iter()
                .map(|(name, value)| (name, f(value)))
                .collect(),
        }
    }
}

impl Serialize for StructValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(&self.fields)
    }
}
