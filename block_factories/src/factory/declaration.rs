//! Field declarations of a factory definition.

use std::fmt;
use std::sync::Arc;

use crate::builder::Resolver;
use crate::error::FactoryResult;
use crate::hierarchy::ParentDecl;
use crate::params::{LazyFn, Params};
use crate::value::Value;

use super::Factory;

/// Computation reading sibling declarations through the resolver.
pub type LazyAttributeFn = Arc<dyn Fn(&mut Resolver<'_>) -> FactoryResult<Value> + Send + Sync>;

/// Computation of a value from the build's sequence number.
pub type SequenceFn = Arc<dyn Fn(u64) -> Value + Send + Sync>;

/// How one field or branch of a factory obtains its value.
#[derive(Clone)]
pub enum Declaration {
    /// A fixed value.
    Literal(Value),
    /// Evaluated at resolution time.
    Lazy(LazyFn),
    /// Evaluated at resolution time with access to sibling values.
    LazyAttribute(LazyAttributeFn),
    /// Derived from the per-build sequence number.
    Sequence(SequenceFn),
    /// Delegated to a nested factory.
    SubFactory(SubFactory),
    /// The tree parent of a hierarchical record.
    Parent(ParentDecl),
}

impl Declaration {
    /// Declare a lazily evaluated value.
    #[must_use]
    pub fn lazy<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self::Lazy(Arc::new(f))
    }

    /// Declare a value computed from sibling values.
    #[must_use]
    pub fn lazy_attribute<F>(f: F) -> Self
    where
        F: Fn(&mut Resolver<'_>) -> FactoryResult<Value> + Send + Sync + 'static,
    {
        Self::LazyAttribute(Arc::new(f))
    }

    /// Declare a value derived from the build's sequence number.
    #[must_use]
    pub fn sequence<F>(f: F) -> Self
    where
        F: Fn(u64) -> Value + Send + Sync + 'static,
    {
        Self::Sequence(Arc::new(f))
    }

    /// Delegate to `factory` with no call-site defaults.
    #[must_use]
    pub fn sub_factory(factory: &Arc<Factory>) -> Self {
        Self::SubFactory(SubFactory::new(factory))
    }

    /// The nested factory, for [`Declaration::SubFactory`].
    #[must_use]
    pub fn as_sub_factory(&self) -> Option<&SubFactory> {
        match self {
            Self::SubFactory(sub) => Some(sub),
            _ => None,
        }
    }
}

impl fmt::Debug for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Lazy(_) => f.write_str("Lazy(<fn>)"),
            Self::LazyAttribute(_) => f.write_str("LazyAttribute(<fn>)"),
            Self::Sequence(_) => f.write_str("Sequence(<fn>)"),
            Self::SubFactory(sub) => f.debug_tuple("SubFactory").field(sub).finish(),
            Self::Parent(parent) => f.debug_tuple("Parent").field(parent).finish(),
        }
    }
}

impl<T: Into<Value>> From<T> for Declaration {
    fn from(value: T) -> Self {
        Self::Literal(value.into())
    }
}

/// Reference to a nested factory plus the defaults attached where it is
/// referenced.
#[derive(Clone)]
pub struct SubFactory {
    factory: Arc<Factory>,
    defaults: Params,
}

impl SubFactory {
    /// Reference `factory` with no call-site defaults.
    #[must_use]
    pub fn new(factory: &Arc<Factory>) -> Self {
        Self {
            factory: Arc::clone(factory),
            defaults: Params::new(),
        }
    }

    /// Attach call-site defaults.
    #[must_use]
    pub fn with_defaults(mut self, defaults: Params) -> Self {
        self.defaults = defaults;
        self
    }

    /// The referenced factory.
    #[must_use]
    pub const fn factory(&self) -> &Arc<Factory> {
        &self.factory
    }

    /// Defaults attached at the reference.
    #[must_use]
    pub const fn defaults(&self) -> &Params {
        &self.defaults
    }
}

impl fmt::Debug for SubFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubFactory")
            .field("factory", &self.factory.name())
            .field("defaults", &self.defaults)
            .finish()
    }
}
