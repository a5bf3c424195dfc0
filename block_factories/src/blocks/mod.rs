//! Block schema targeted by block factories.
//!
//! This is the minimal typed surface of the host block library: atomic and
//! chooser leaves know how to clean values, compound definitions know their
//! children and defaults. Factories carry an optional [`BlockDef`]; when a
//! nested factory has none, the parent threads its own child definition down
//! so inline ("anonymous") blocks still produce typed values.

mod atomic;

pub use atomic::{AtomicBlock, AtomicKind, ChooserBlock};

use indexmap::IndexMap;

use crate::value::{StreamValue, StructValue, Value};

/// Definition of one block type.
#[derive(Clone, Debug, PartialEq)]
pub enum BlockDef {
    /// Scalar leaf block.
    Atomic(AtomicBlock),
    /// Reference to a record of another model.
    Chooser(ChooserBlock),
    /// Fixed named children.
    Struct(StructBlockDef),
    /// Homogeneous repeated child.
    List(ListBlockDef),
    /// Heterogeneous ordinal-indexed children chosen from named branches.
    Stream(StreamBlockDef),
}

impl BlockDef {
    /// Type name of a compound block, `None` for leaves and inline blocks.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Self::Struct(def) => def.name.as_deref(),
            Self::Stream(def) => def.name.as_deref(),
            Self::Atomic(_) | Self::Chooser(_) | Self::List(_) => None,
        }
    }

    /// Child definition for a struct field or stream branch.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        match self {
            Self::Struct(def) => def.children.get(name),
            Self::Stream(def) => def.children.get(name),
            Self::Atomic(_) | Self::Chooser(_) | Self::List(_) => None,
        }
    }

    /// Element definition of a list block.
    #[must_use]
    pub fn list_child(&self) -> Option<&Self> {
        match self {
            Self::List(def) => Some(&def.child),
            _ => None,
        }
    }

    /// Child names of a struct or stream block, in declaration order.
    pub fn child_names(&self) -> impl Iterator<Item = &str> {
        let children = match self {
            Self::Struct(def) => Some(&def.children),
            Self::Stream(def) => Some(&def.children),
            Self::Atomic(_) | Self::Chooser(_) | Self::List(_) => None,
        };
        children
            .into_iter()
            .flat_map(|map| map.keys().map(String::as_str))
    }

    /// Value used when a factory supplies nothing for this block.
    #[must_use]
    pub fn default_value(&self) -> Value {
        match self {
            Self::Atomic(block) => block.default_value(),
            Self::Chooser(_) => Value::Null,
            Self::Struct(def) => Value::Struct(StructValue::from_fields(
                def.name.clone(),
                def.children
                    .iter()
                    .map(|(name, child)| (name.clone(), child.default_value())),
            )),
            Self::List(_) => Value::List(Vec::new()),
            Self::Stream(def) => Value::Stream(StreamValue::new(def.name.clone())),
        }
    }

    /// Clean a caller-supplied leaf value. Compound values pass through.
    ///
    /// # Errors
    ///
    /// Returns the cleaning function's message when a leaf rejects `value`.
    pub fn clean(&self, value: Value) -> Result<Value, String> {
        match self {
            Self::Atomic(block) => block.clean(value),
            Self::Chooser(block) => block.clean(value),
            Self::Struct(_) | Self::List(_) | Self::Stream(_) => Ok(value),
        }
    }

    /// Returns `true` for atomic and chooser blocks.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Atomic(_) | Self::Chooser(_))
    }
}

impl From<AtomicBlock> for BlockDef {
    fn from(block: AtomicBlock) -> Self {
        Self::Atomic(block)
    }
}

impl From<ChooserBlock> for BlockDef {
    fn from(block: ChooserBlock) -> Self {
        Self::Chooser(block)
    }
}

impl From<StructBlockDef> for BlockDef {
    fn from(def: StructBlockDef) -> Self {
        Self::Struct(def)
    }
}

impl From<ListBlockDef> for BlockDef {
    fn from(def: ListBlockDef) -> Self {
        Self::List(def)
    }
}

impl From<StreamBlockDef> for BlockDef {
    fn from(def: StreamBlockDef) -> Self {
        Self::Stream(def)
    }
}

/// Struct block with named children.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StructBlockDef {
    name: Option<String>,
    children: IndexMap<String, BlockDef>,
}

impl StructBlockDef {
    /// A named struct block type.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            children: IndexMap::new(),
        }
    }

    /// A struct block declared inline, without a type name.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Add a child block.
    #[must_use]
    pub fn child(mut self, name: impl Into<String>, def: impl Into<BlockDef>) -> Self {
        self.children.insert(name.into(), def.into());
        self
    }
}

/// List block repeating one child definition.
#[derive(Clone, Debug, PartialEq)]
pub struct ListBlockDef {
    child: Box<BlockDef>,
}

impl ListBlockDef {
    /// A list of `child` blocks.
    #[must_use]
    pub fn of(child: impl Into<BlockDef>) -> Self {
        Self {
            child: Box::new(child.into()),
        }
    }
}

/// Stream block choosing each child from named branches.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StreamBlockDef {
    name: Option<String>,
    children: IndexMap<String, BlockDef>,
}

impl StreamBlockDef {
    /// A named stream block type.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            children: IndexMap::new(),
        }
    }

    /// A stream block declared inline, without a type name.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Add a branch.
    #[must_use]
    pub fn child(mut self, name: impl Into<String>, def: impl Into<BlockDef>) -> Self {
        self.children.insert(name.into(), def.into());
        self
    }
}
