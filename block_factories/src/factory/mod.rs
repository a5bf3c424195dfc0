//! Factory definitions.
//!
//! A [`Factory`] names the fields (or stream branches) of one block or
//! record type and how each obtains its value. Definitions are assembled
//! with a [`FactoryBuilder`] and shared as `Arc<Factory>`; they are never
//! mutated afterwards. The per-call stream configuration that other
//! factory libraries synthesise as an ad-hoc subclass is carried by the
//! immutable [`StreamShape`](crate::declaration::StreamShape) instead.

mod declaration;
mod sequence;

pub use declaration::{Declaration, LazyAttributeFn, SequenceFn, SubFactory};
pub use sequence::Sequence;

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::blocks::{BlockDef, ChooserBlock};
use crate::builder::Resolver;
use crate::error::FactoryResult;
use crate::hierarchy::{PARENT_FIELD, ParentDecl};
use crate::params::Params;
use crate::value::Value;

/// Field holding the value of a leaf factory.
pub const LEAF_FIELD: &str = "value";

/// What a factory produces, and so how the step builder assembles it.
#[derive(Clone, Debug)]
pub enum FactoryKind {
    /// A single cleaned scalar taken from the [`LEAF_FIELD`] declaration.
    Leaf,
    /// A record reference taken from the named declaration.
    Chooser {
        /// Declaration producing the chosen record.
        field: String,
    },
    /// Named fields in block order.
    Struct,
    /// Ordinal-indexed elements built by one child factory.
    List {
        /// Factory building every element.
        child: Arc<Factory>,
    },
    /// Ordinal-indexed elements, each built by a named branch declaration.
    Stream,
    /// A record of the given model, persisted by the create strategy.
    Record {
        /// Model name stored on built records.
        model: String,
    },
}

/// Immutable definition of how to build one block or record type.
pub struct Factory {
    name: String,
    kind: FactoryKind,
    block: Option<BlockDef>,
    declarations: IndexMap<String, Declaration>,
    defaults: Params,
    sequence: Sequence,
    is_abstract: bool,
}

impl Factory {
    fn with_kind(name: impl Into<String>, kind: FactoryKind) -> FactoryBuilder {
        FactoryBuilder {
            factory: Self {
                name: name.into(),
                kind,
                block: None,
                declarations: IndexMap::new(),
                defaults: Params::new(),
                sequence: Sequence::new(),
                is_abstract: false,
            },
        }
    }

    /// Start a leaf factory cleaning values against `block`.
    ///
    /// The [`LEAF_FIELD`] declaration defaults to null, which resolves to
    /// the block's own default.
    pub fn leaf(name: impl Into<String>, block: impl Into<BlockDef>) -> FactoryBuilder {
        Self::with_kind(name, FactoryKind::Leaf)
            .block(block)
            .declare(LEAF_FIELD, Value::Null)
    }

    /// Start a chooser factory whose value comes from the `field`
    /// declaration.
    pub fn chooser(
        name: impl Into<String>,
        field: impl Into<String>,
        block: ChooserBlock,
    ) -> FactoryBuilder {
        Self::with_kind(
            name,
            FactoryKind::Chooser {
                field: field.into(),
            },
        )
        .block(block)
    }

    /// Start a struct block factory.
    pub fn structure(name: impl Into<String>) -> FactoryBuilder {
        Self::with_kind(name, FactoryKind::Struct)
    }

    /// Start a list block factory building elements with `child`.
    pub fn list(name: impl Into<String>, child: &Arc<Self>) -> FactoryBuilder {
        Self::with_kind(
            name,
            FactoryKind::List {
                child: Arc::clone(child),
            },
        )
    }

    /// Start a stream block factory. Declarations name its branches.
    pub fn stream(name: impl Into<String>) -> FactoryBuilder {
        Self::with_kind(name, FactoryKind::Stream)
    }

    /// Start a record factory for `model`.
    pub fn record(name: impl Into<String>, model: impl Into<String>) -> FactoryBuilder {
        Self::with_kind(
            name,
            FactoryKind::Record {
                model: model.into(),
            },
        )
    }

    /// Start a factory inheriting everything from `parent`.
    ///
    /// Declarations added to the returned builder override the parent's by
    /// name and keep the parent's field order. The new factory has its own
    /// sequence and is never abstract.
    pub fn extend(name: impl Into<String>, parent: &Arc<Self>) -> FactoryBuilder {
        FactoryBuilder {
            factory: Self {
                name: name.into(),
                kind: parent.kind.clone(),
                block: parent.block.clone(),
                declarations: parent.declarations.clone(),
                defaults: parent.defaults.clone(),
                sequence: Sequence::new(),
                is_abstract: false,
            },
        }
    }

    /// Name of the factory.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// What the factory produces.
    #[must_use]
    pub const fn kind(&self) -> &FactoryKind {
        &self.kind
    }

    /// Block definition targeted by the factory, if it names one.
    #[must_use]
    pub const fn block(&self) -> Option<&BlockDef> {
        self.block.as_ref()
    }

    /// Declaration for a field or branch.
    #[must_use]
    pub fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.declarations.get(name)
    }

    /// Returns `true` when `name` is declared.
    #[must_use]
    pub fn declares(&self, name: &str) -> bool {
        self.declarations.contains_key(name)
    }

    /// Declared names in declaration order.
    pub fn declared_names(&self) -> impl Iterator<Item = &str> {
        self.declarations.keys().map(String::as_str)
    }

    /// Definition-level defaults, the lowest parameter layer.
    #[must_use]
    pub const fn defaults(&self) -> &Params {
        &self.defaults
    }

    /// The factory's sequence counter.
    #[must_use]
    pub const fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// Whether the factory only exists to be extended.
    #[must_use]
    pub const fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// Model name for record factories.
    #[must_use]
    pub fn model(&self) -> Option<&str> {
        match &self.kind {
            FactoryKind::Record { model } => Some(model),
            _ => None,
        }
    }

    /// Field receiving an explicit value passed where this factory is
    /// referenced: [`LEAF_FIELD`] for leaves, the chosen field for
    /// choosers, `None` for compound and record factories.
    #[must_use]
    pub fn value_field(&self) -> Option<&str> {
        match &self.kind {
            FactoryKind::Leaf => Some(LEAF_FIELD),
            FactoryKind::Chooser { field } => Some(field),
            FactoryKind::Struct
            | FactoryKind::List { .. }
            | FactoryKind::Stream
            | FactoryKind::Record { .. } => None,
        }
    }

    /// The tree-parent declaration of a hierarchical record factory.
    #[must_use]
    pub fn parent_decl(&self) -> Option<&ParentDecl> {
        match self.declarations.get(PARENT_FIELD) {
            Some(Declaration::Parent(decl)) => Some(decl),
            _ => None,
        }
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("declarations", &self.declarations.keys().collect::<Vec<_>>())
            .field("is_abstract", &self.is_abstract)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Factory`] definitions.
///
/// ```rust
/// use block_factories::blocks::{AtomicBlock, StructBlockDef};
/// use block_factories::{Factory, Value, params};
///
/// let item = Factory::structure("my_block_item")
///     .block(
///         StructBlockDef::named("my_block_item")
///             .child("label", AtomicBlock::char())
///             .child("value", AtomicBlock::integer()),
///     )
///     .declare("label", "my-label")
///     .declare("value", 100)
///     .finish();
///
/// let built = item.build(params! { "value" => 5 })?;
/// let fields = built.as_struct().expect("struct value");
/// assert_eq!(fields.get("label"), Some(&Value::from("my-label")));
/// assert_eq!(fields.get("value"), Some(&Value::from(5)));
/// # Ok::<_, block_factories::FactoryError>(())
/// ```
#[derive(Debug)]
#[must_use]
pub struct FactoryBuilder {
    factory: Factory,
}

impl FactoryBuilder {
    /// Set the targeted block definition.
    pub fn block(mut self, def: impl Into<BlockDef>) -> Self {
        self.factory.block = Some(def.into());
        self
    }

    /// Declare (or override) a field.
    pub fn declare(mut self, name: impl Into<String>, declaration: impl Into<Declaration>) -> Self {
        self.factory
            .declarations
            .insert(name.into(), declaration.into());
        self
    }

    /// Declare a field delegated to `factory`.
    pub fn sub_factory(self, name: impl Into<String>, factory: &Arc<Factory>) -> Self {
        self.declare(name, Declaration::sub_factory(factory))
    }

    /// Declare a field delegated to `factory` with call-site defaults.
    pub fn sub_factory_with(
        self,
        name: impl Into<String>,
        factory: &Arc<Factory>,
        defaults: Params,
    ) -> Self {
        self.declare(
            name,
            Declaration::SubFactory(SubFactory::new(factory).with_defaults(defaults)),
        )
    }

    /// Declare a lazily evaluated field.
    pub fn lazy<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.declare(name, Declaration::lazy(f))
    }

    /// Declare a field computed from sibling values.
    pub fn lazy_attribute<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut Resolver<'_>) -> FactoryResult<Value> + Send + Sync + 'static,
    {
        self.declare(name, Declaration::lazy_attribute(f))
    }

    /// Declare a field derived from the build's sequence number.
    pub fn sequenced<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(u64) -> Value + Send + Sync + 'static,
    {
        self.declare(name, Declaration::sequence(f))
    }

    /// Declare the tree parent of a hierarchical record.
    pub fn parent(self, decl: ParentDecl) -> Self {
        self.declare(PARENT_FIELD, Declaration::Parent(decl))
    }

    /// Add definition-level defaults. Later keys replace earlier ones.
    pub fn defaults(mut self, params: Params) -> Self {
        self.factory.defaults.extend(params);
        self
    }

    /// Use an injected sequence counter.
    pub fn sequence(mut self, sequence: Sequence) -> Self {
        self.factory.sequence = sequence;
        self
    }

    /// Mark the factory abstract: it can be extended but not built.
    pub fn mark_abstract(mut self) -> Self {
        self.factory.is_abstract = true;
        self
    }

    /// Finish the definition.
    #[must_use]
    pub fn finish(self) -> Arc<Factory> {
        Arc::new(self.factory)
    }
}
