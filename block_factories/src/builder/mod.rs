//! Recursive step builder.
//!
//! [`StepBuilder::run`] builds one factory: it stacks the factory's own
//! defaults under the layers it was handed, draws the build's sequence
//! number and dispatches on [`FactoryKind`]. Nested factories are reached
//! through the [`Resolver`], which starts a new step builder for them with
//! the same strategy.

mod compound;
mod path;
mod record;
mod resolver;

pub use path::FieldPath;
pub use resolver::Resolver;

use std::sync::Arc;

use tracing::debug;

use crate::blocks::BlockDef;
use crate::declaration::FieldClass;
use crate::error::{FactoryError, FactoryResult};
use crate::factory::{Declaration, Factory, FactoryKind};
use crate::layering::{Layer, LayerComposer, compose_struct};
use crate::params::Params;
use crate::store::RecordStore;
use crate::value::Value;

/// Whether built values are persisted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Strategy {
    /// Construct in memory only.
    Build,
    /// Construct and persist, nested records first.
    Create,
}

/// Strategy plus the store the create strategy writes to.
pub(crate) enum Mode<'m> {
    Build,
    Create(&'m mut dyn RecordStore),
}

impl Mode<'_> {
    pub(crate) const fn strategy(&self) -> Strategy {
        match self {
            Self::Build => Strategy::Build,
            Self::Create(_) => Strategy::Create,
        }
    }

    /// Borrow the mode for a nested build.
    pub(crate) fn reborrow(&mut self) -> Mode<'_> {
        match self {
            Self::Build => Mode::Build,
            Self::Create(store) => Mode::Create(&mut **store),
        }
    }
}

pub(crate) struct StepBuilder<'m> {
    mode: Mode<'m>,
    path: FieldPath,
    inherited: Option<BlockDef>,
}

impl<'m> StepBuilder<'m> {
    pub(crate) const fn new(mode: Mode<'m>, path: FieldPath) -> Self {
        Self {
            mode,
            path,
            inherited: None,
        }
    }

    /// Thread the parent's block definition for this node.
    pub(crate) fn inherit_block(mut self, block: Option<BlockDef>) -> Self {
        self.inherited = block;
        self
    }

    pub(crate) fn run(self, factory: &Arc<Factory>, layers: Vec<Layer>) -> FactoryResult<Value> {
        if factory.is_abstract() {
            return Err(FactoryError::AbstractFactory {
                name: factory.name().to_owned(),
            });
        }
        let block = self.inherited.or_else(|| factory.block().cloned());
        let mut composer = LayerComposer::with_capacity(layers.len() + 1);
        composer.push_definition(factory.defaults().clone());
        composer.extend(layers);
        let stacked = composer.layers();
        let sequence = factory.sequence().next();
        debug!(
            factory = factory.name(),
            path = %self.path,
            strategy = ?self.mode.strategy(),
            sequence,
            layers = stacked.len(),
            "building"
        );

        let resolver = Resolver::new(self.mode, factory, block, sequence, self.path);
        match factory.kind() {
            FactoryKind::List { child } => compound::build_list(resolver, child, &stacked),
            FactoryKind::Stream => compound::build_stream(resolver, &stacked),
            FactoryKind::Leaf => {
                compound::build_leaf(with_field_inputs(resolver, factory, &stacked)?)
            }
            FactoryKind::Chooser { field } => {
                compound::build_chooser(with_field_inputs(resolver, factory, &stacked)?, field)
            }
            FactoryKind::Struct => {
                compound::build_struct(with_field_inputs(resolver, factory, &stacked)?)
            }
            FactoryKind::Record { model } => {
                record::build_record(with_field_inputs(resolver, factory, &stacked)?, model)
            }
        }
    }
}

/// Parse field-keyed layers and hand the merged inputs to the resolver.
fn with_field_inputs<'m>(
    resolver: Resolver<'m>,
    factory: &Factory,
    layers: &[Layer],
) -> FactoryResult<Resolver<'m>> {
    let owner = resolver.path().describe(factory.name());
    let shape = compose_struct(layers, factory.name(), &owner, |name| {
        classify(factory, resolver.block(), name)
    })?;
    Ok(resolver.with_inputs(shape.into_fields()))
}

fn classify(factory: &Factory, block: Option<&BlockDef>, name: &str) -> FieldClass {
    match factory.declaration(name) {
        Some(Declaration::Parent(_)) => FieldClass::Parent,
        Some(_) => FieldClass::Declared,
        None if block.is_some_and(|def| def.child(name).is_some()) => FieldClass::Declared,
        None if matches!(factory.kind(), FactoryKind::Record { .. }) => FieldClass::Extra,
        None => FieldClass::Unknown,
    }
}

impl Factory {
    /// Build a value in memory.
    ///
    /// # Errors
    ///
    /// Returns any [`FactoryError`] raised while parsing `params` or
    /// resolving declarations.
    pub fn build(self: &Arc<Self>, params: Params) -> FactoryResult<Value> {
        self.run_with(Mode::Build, params)
    }

    /// Build a value and persist every record in it through `store`,
    /// parents and nested records first.
    ///
    /// # Errors
    ///
    /// As [`Factory::build`], plus [`FactoryError::Store`] and
    /// [`FactoryError::UnsavedParent`].
    pub fn create(
        self: &Arc<Self>,
        store: &mut dyn RecordStore,
        params: Params,
    ) -> FactoryResult<Value> {
        self.run_with(Mode::Create(store), params)
    }

    /// Build or create according to `strategy`. The store is only touched
    /// by [`Strategy::Create`].
    ///
    /// # Errors
    ///
    /// As [`Factory::create`].
    pub fn generate(
        self: &Arc<Self>,
        strategy: Strategy,
        store: &mut dyn RecordStore,
        params: Params,
    ) -> FactoryResult<Value> {
        match strategy {
            Strategy::Build => self.build(params),
            Strategy::Create => self.create(store, params),
        }
    }

    /// Build `count` values from the same parameters.
    ///
    /// # Errors
    ///
    /// Stops at the first failing build.
    pub fn build_batch(self: &Arc<Self>, count: usize, params: &Params) -> FactoryResult<Vec<Value>> {
        (0..count).map(|_| self.build(params.clone())).collect()
    }

    /// Create `count` values from the same parameters.
    ///
    /// # Errors
    ///
    /// Stops at the first failing create; earlier values stay persisted.
    pub fn create_batch(
        self: &Arc<Self>,
        store: &mut dyn RecordStore,
        count: usize,
        params: &Params,
    ) -> FactoryResult<Vec<Value>> {
        (0..count)
            .map(|_| self.create(&mut *store, params.clone()))
            .collect()
    }

    fn run_with(self: &Arc<Self>, mode: Mode<'_>, params: Params) -> FactoryResult<Value> {
        StepBuilder::new(mode, FieldPath::root()).run(self, vec![Layer::call_time(params)])
    }
}

#[cfg(test)]
mod tests;
