//! Record values produced by record-backed factories.

use std::fmt;

use indexmap::IndexMap;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use super::Value;

/// Identity assigned to a record by a [`crate::RecordStore`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct RecordId(u64);

impl RecordId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Materialised-path position of a record inside a tree.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TreePosition {
    /// Concatenated fixed-width steps from the root to this node.
    pub path: String,
    /// Depth of the node; roots have depth 1.
    pub depth: u32,
    /// Number of direct children.
    pub numchild: u32,
}

/// A record built by a record-backed factory, persisted or not.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    model: String,
    id: Option<RecordId>,
    fields: IndexMap<String, Value>,
    parent: Option<Box<Record>>,
    tree: Option<TreePosition>,
}

impl Record {
    /// Create an unsaved record of `model` with no fields.
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            id: None,
            fields: IndexMap::new(),
            parent: None,
            tree: None,
        }
    }

    /// Model name of the record.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Identity assigned by the store, if persisted.
    #[must_use]
    pub const fn id(&self) -> Option<RecordId> {
        self.id
    }

    /// Returns `true` once a store has assigned an identity.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Look up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Iterate over fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// The parent record resolved when the record was built.
    #[must_use]
    pub fn parent(&self) -> Option<&Self> {
        self.parent.as_deref()
    }

    /// Tree position assigned by the store.
    #[must_use]
    pub const fn tree(&self) -> Option<&TreePosition> {
        self.tree.as_ref()
    }

    /// Set or replace a field.
    pub fn set_field(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    /// Record the identity assigned by a store.
    pub const fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    /// Attach (or detach) the resolved parent.
    pub fn set_parent(&mut self, parent: Option<Self>) {
        self.parent = parent.map(Box::new);
    }

    /// Record the tree position assigned by a store.
    pub fn set_tree(&mut self, tree: TreePosition) {
        self.tree = Some(tree);
    }

    /// Builder-style variant of [`Record::set_field`].
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_field(name, value.into());
        self
    }

    pub(crate) fn tree_mut(&mut self) -> Option<&mut TreePosition> {
        self.tree.as_mut()
    }

    /// Strip store-assigned identity from this record, its fields and its
    /// parent chain.
    #[must_use]
    pub fn without_identity(self) -> Self {
        Self {
            model: self.model,
            id: None,
            fields: self
                .fields
                .into_iter()
                .map(|(name, value)| (name, value.without_identity()))
                .collect(),
            parent: self
                .parent
                .map(|parent| Box::new(parent.without_identity())),
            tree: None,
        }
    }
}

struct Fields<'a>(&'a IndexMap<String, Value>);

impl Serialize for Fields<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Record", 4)?;
        state.serialize_field("model", &self.model)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("fields", &Fields(&self.fields))?;
        state.serialize_field("parent", &self.parent.as_ref().and_then(|parent| parent.id))?;
        state.end()
    }
}
