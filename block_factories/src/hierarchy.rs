//! Tree assembly for hierarchical records.
//!
//! A tree record declares its parent with [`ParentDecl`]. At build time the
//! `parent` field must receive exactly one of:
//!
//! - a parent record (`parent => record`);
//! - an explicit null, making the node a new root (`parent => None::<&str>`);
//! - parent attributes (`parent__title => "root"`), which build the parent
//!   first, recursively.
//!
//! Supplying an instance and attributes together is rejected while the
//! parameters are parsed, before anything is persisted.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::builder::{FieldPath, Resolver, Strategy};
use crate::declaration::SlotInput;
use crate::error::{FactoryError, FactoryResult};
use crate::factory::Factory;
use crate::layering::Layer;
use crate::value::{Record, Value};

/// Field naming the tree parent of a hierarchical record.
pub const PARENT_FIELD: &str = "parent";

/// Parent declaration of a hierarchical record factory.
#[derive(Clone, Default)]
pub struct ParentDecl {
    factory: Option<Arc<Factory>>,
    root_by_default: bool,
}

impl ParentDecl {
    /// Parents are built by the declaring factory itself and must always be
    /// given explicitly.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build parents from attributes with `factory` instead.
    #[must_use]
    pub fn built_by(mut self, factory: &Arc<Factory>) -> Self {
        self.factory = Some(Arc::clone(factory));
        self
    }

    /// Treat an absent parent as an explicit root.
    #[must_use]
    pub const fn root_by_default(mut self) -> Self {
        self.root_by_default = true;
        self
    }

    /// Factory building parents from attributes, if not the declaring one.
    #[must_use]
    pub const fn factory(&self) -> Option<&Arc<Factory>> {
        self.factory.as_ref()
    }

    /// Whether an absent parent means "root".
    #[must_use]
    pub const fn is_root_by_default(&self) -> bool {
        self.root_by_default
    }
}

impl fmt::Debug for ParentDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParentDecl")
            .field("factory", &self.factory.as_ref().map(|factory| factory.name()))
            .field("root_by_default", &self.root_by_default)
            .finish()
    }
}

/// What the caller said about a node's parent.
#[derive(Clone, Debug)]
pub enum ParentSpec {
    /// An existing parent record.
    Instance(Record),
    /// No parent: the node is a root.
    Root,
    /// Attributes for a parent to build first.
    Attributes(Vec<Layer>),
}

impl ParentSpec {
    /// Interpret the input supplied for the parent field.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::MissingParent`] when nothing was supplied and
    /// the declaration does not default to root, and
    /// [`FactoryError::Validation`] when the value is neither a record nor
    /// null.
    pub fn from_input(
        input: Option<SlotInput>,
        decl: &ParentDecl,
        model: &str,
        path: &FieldPath,
    ) -> FactoryResult<Self> {
        match input {
            None | Some(SlotInput::Default) if decl.root_by_default => Ok(Self::Root),
            None | Some(SlotInput::Default) => Err(FactoryError::MissingParent {
                model: model.to_owned(),
            }),
            Some(SlotInput::Nested(layers)) => Ok(Self::Attributes(layers)),
            Some(SlotInput::Value(param)) => match param.evaluate() {
                Value::Null => Ok(Self::Root),
                Value::Record(record) => Ok(Self::Instance(record)),
                other => Err(FactoryError::validation(
                    path.to_string(),
                    format!("expected a parent record or null, got {}", other.kind_name()),
                )),
            },
        }
    }
}

/// Resolve the parent field of the record being built by `resolver`.
pub(crate) fn resolve_parent(
    resolver: &mut Resolver<'_>,
    decl: &ParentDecl,
    input: Option<SlotInput>,
    path: FieldPath,
) -> FactoryResult<Value> {
    let factory = Arc::clone(resolver.factory());
    let model = factory.model().unwrap_or_else(|| factory.name()).to_owned();
    match ParentSpec::from_input(input, decl, &model, &path)? {
        ParentSpec::Root => {
            debug!(model = %model, "node is a root");
            Ok(Value::Null)
        }
        ParentSpec::Instance(record) => {
            if resolver.strategy() == Strategy::Create && !record.is_persisted() {
                return Err(FactoryError::UnsavedParent { model });
            }
            Ok(Value::Record(record))
        }
        ParentSpec::Attributes(layers) => {
            let parent_factory = decl.factory().unwrap_or(&factory);
            debug!(model = %model, parent = parent_factory.name(), "building parent first");
            resolver.run_nested(parent_factory, layers, None, path)
        }
    }
}
