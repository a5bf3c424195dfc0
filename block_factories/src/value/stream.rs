//! Stream block values.

use serde::{Serialize, Serializer};

use super::Value;

/// One `(block type, value)` entry of a stream.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StreamChild {
    #[serde(rename = "type")]
    block_type: String,
    value: Value,
}

impl StreamChild {
    /// Create a child of the given branch type.
    #[must_use]
    pub fn new(block_type: impl Into<String>, value: Value) -> Self {
        Self {
            block_type: block_type.into(),
            value,
        }
    }

    /// Name of the branch this child was built from.
    #[must_use]
    pub fn block_type(&self) -> &str {
        &self.block_type
    }

    /// The built value.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    /// Decompose the child into its branch name and value.
    #[must_use]
    pub fn into_parts(self) -> (String, Value) {
        (self.block_type, self.value)
    }
}

/// Ordered, heterogeneous sequence produced by a stream block factory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StreamValue {
    block_type: Option<String>,
    children: Vec<StreamChild>,
}

impl StreamValue {
    /// Create an empty stream of the named block type (`None` when the block
    /// was declared inline).
    #[must_use]
    pub const fn new(block_type: Option<String>) -> Self {
        Self {
            block_type,
            children: Vec::new(),
        }
    }

    /// Name of the stream block type, if it has one.
    #[must_use]
    pub fn block_type(&self) -> Option<&str> {
        self.block_type.as_deref()
    }

    /// Append a child.
    pub fn push(&mut self, child: StreamChild) {
        self.children.push(child);
    }

    /// The child at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&StreamChild> {
        self.children.get(index)
    }

    /// Iterate over the children in order.
    pub fn iter(&self) -> impl Iterator<Item = &StreamChild> {
        self.children.iter()
    }

    /// Branch names in order, convenient for assertions.
    #[must_use]
    pub fn block_types(&self) -> Vec<&str> {
        self.children.iter().map(StreamChild::block_type).collect()
    }

    /// Number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` when the stream has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn map_values<F>(self, f: F) -> Self
    where
        F: Fn(Value) -> Value,
    {
        Self {
            block_type: self.block_type,
            children: self
                .children
                .into_iter()
                .map(|child| StreamChild {
                    block_type: child.block_type,
                    value: f(child.value),
                })
                .collect(),
        }
    }
}

impl Serialize for StreamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.children)
    }
}

impl<'a> IntoIterator for &'a StreamValue {
    type Item = &'a StreamChild;
    type IntoIter = std::slice::Iter<'a, StreamChild>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}
