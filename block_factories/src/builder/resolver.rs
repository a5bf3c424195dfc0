//! On-demand resolution of one factory's declarations.

use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use tracing::trace;

use crate::blocks::BlockDef;
use crate::declaration::SlotInput;
use crate::error::{FactoryError, FactoryResult};
use crate::factory::{Declaration, Factory, SubFactory};
use crate::hierarchy;
use crate::layering::{Layer, LayerComposer};
use crate::params::Params;
use crate::value::Value;

use super::{FieldPath, Mode, StepBuilder, Strategy};

/// Resolves the fields of one factory build.
///
/// Values are computed the first time they are asked for and memoised, so a
/// lazy attribute may read siblings in any order:
///
/// ```rust
/// use block_factories::{Factory, Value, params};
///
/// let factory = Factory::stream("simple_stream")
///     .declare("number", 42)
///     .declare("text", "foo")
///     .lazy_attribute("extra_text", |resolver| {
///         let text = resolver.get("text")?;
///         let number = resolver.get("number")?;
///         Ok(Value::from(format!(
///             "{}{}",
///             text.as_str().unwrap_or_default(),
///             number.as_int().unwrap_or_default()
///         )))
///     })
///     .finish();
///
/// let stream = factory.build(params! { "0" => "extra_text" })?;
/// let child = stream.as_stream().and_then(|s| s.get(0)).expect("one child");
/// assert_eq!(child.value(), &Value::from("foo42"));
/// # Ok::<_, block_factories::FactoryError>(())
/// ```
pub struct Resolver<'m> {
    mode: Mode<'m>,
    factory: Arc<Factory>,
    block: Option<BlockDef>,
    inputs: IndexMap<String, SlotInput>,
    resolved: IndexMap<String, Value>,
    stack: Vec<String>,
    sequence: u64,
    path: FieldPath,
}

impl<'m> Resolver<'m> {
    pub(crate) fn new(
        mode: Mode<'m>,
        factory: &Arc<Factory>,
        block: Option<BlockDef>,
        sequence: u64,
        path: FieldPath,
    ) -> Self {
        Self {
            mode,
            factory: Arc::clone(factory),
            block,
            inputs: IndexMap::new(),
            resolved: IndexMap::new(),
            stack: Vec::new(),
            sequence,
            path,
        }
    }

    pub(crate) fn with_inputs(mut self, inputs: IndexMap<String, SlotInput>) -> Self {
        self.inputs = inputs;
        self
    }

    pub(crate) const fn mode_mut(&mut self) -> &mut Mode<'m> {
        &mut self.mode
    }
}

impl Resolver<'_> {
    /// Resolve the field `name`: the caller's input if any, otherwise the
    /// factory's declaration, otherwise the block's default.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::CyclicDeclaration`] when lazy attributes read
    /// each other in a cycle, and any error raised by a nested build.
    pub fn get(&mut self, name: &str) -> FactoryResult<Value> {
        if let Some(value) = self.resolved.get(name) {
            return Ok(value.clone());
        }
        if self.stack.iter().any(|pending| pending == name) {
            let mut cycle = self.stack.clone();
            cycle.push(name.to_owned());
            return Err(FactoryError::CyclicDeclaration {
                cycle: cycle.join(" -> "),
            });
        }
        self.stack.push(name.to_owned());
        let outcome = self.resolve_field(name);
        self.stack.pop();
        let value = outcome?;
        self.resolved.insert(name.to_owned(), value.clone());
        Ok(value)
    }

    /// Sequence number drawn for this build.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Strategy of the running build.
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.mode.strategy()
    }

    /// Path of the node being built.
    #[must_use]
    pub const fn path(&self) -> &FieldPath {
        &self.path
    }

    /// The factory being resolved.
    #[must_use]
    pub const fn factory(&self) -> &Arc<Factory> {
        &self.factory
    }

    /// Effective block definition of the node.
    #[must_use]
    pub const fn block(&self) -> Option<&BlockDef> {
        self.block.as_ref()
    }

    /// Names making up the node's value. A struct block fixes them to its
    /// children, in block order; other declarations are only resolved when a
    /// sibling reads them. Without a struct block: declared fields, then
    /// extra inputs, each once.
    pub(crate) fn field_names(&self) -> Vec<String> {
        if let Some(def @ BlockDef::Struct(_)) = &self.block {
            return def.child_names().map(str::to_owned).collect();
        }
        let mut names: IndexSet<String> = IndexSet::new();
        names.extend(self.factory.declared_names().map(str::to_owned));
        names.extend(self.inputs.keys().cloned());
        names.into_iter().collect()
    }

    fn resolve_field(&mut self, name: &str) -> FactoryResult<Value> {
        let factory = Arc::clone(&self.factory);
        let declaration = factory.declaration(name);
        let block = self.block.as_ref().and_then(|def| def.child(name)).cloned();
        let input = self.inputs.shift_remove(name);
        let path = self.path.child(name);
        trace!(path = %path, explicit = input.is_some(), "resolving field");
        if let Some(Declaration::Parent(parent)) = declaration {
            return hierarchy::resolve_parent(self, parent, input, path);
        }
        self.resolve_slot(declaration, input, block.as_ref(), path)
    }

    /// Resolve one slot from its declaration, the caller's input and the
    /// slot's block definition.
    pub(crate) fn resolve_slot(
        &mut self,
        declaration: Option<&Declaration>,
        input: Option<SlotInput>,
        block: Option<&BlockDef>,
        path: FieldPath,
    ) -> FactoryResult<Value> {
        match input {
            Some(SlotInput::Value(param)) => {
                self.explicit_value(declaration, param.evaluate(), block, path)
            }
            Some(SlotInput::Nested(layers)) => match declaration {
                Some(Declaration::SubFactory(sub)) => {
                    self.run_sub_factory(sub, layers, block, path)
                }
                Some(_) => Err(FactoryError::invalid_declaration(
                    path.to_string(),
                    "the declaration does not accept nested parameters",
                )),
                None => Err(FactoryError::unknown_child_block(
                    path.last().unwrap_or_default(),
                )),
            },
            Some(SlotInput::Default) | None => self.declared_value(declaration, block, path),
        }
    }

    fn explicit_value(
        &mut self,
        declaration: Option<&Declaration>,
        value: Value,
        block: Option<&BlockDef>,
        path: FieldPath,
    ) -> FactoryResult<Value> {
        if let Some(sub) = declaration.and_then(Declaration::as_sub_factory) {
            if let Some(field) = sub.factory().value_field() {
                let layer = Layer::call_time(Params::new().with(field, value));
                return self.run_sub_factory(sub, vec![layer], block, path);
            }
        }
        match block {
            Some(def) if def.is_leaf() && value.is_null() => Ok(def.default_value()),
            Some(def) if def.is_leaf() => def
                .clean(value)
                .map_err(|message| FactoryError::validation(path.to_string(), message)),
            _ => Ok(value),
        }
    }

    fn declared_value(
        &mut self,
        declaration: Option<&Declaration>,
        block: Option<&BlockDef>,
        path: FieldPath,
    ) -> FactoryResult<Value> {
        match declaration {
            Some(Declaration::Literal(value)) => Ok(value.clone()),
            Some(Declaration::Lazy(f)) => Ok(f()),
            Some(Declaration::LazyAttribute(f)) => f(self),
            Some(Declaration::Sequence(f)) => Ok(f(self.sequence)),
            Some(Declaration::SubFactory(sub)) => self.run_sub_factory(sub, Vec::new(), block, path),
            Some(Declaration::Parent(_)) => Err(FactoryError::invalid_declaration(
                path.to_string(),
                "parent declarations are only valid on record fields",
            )),
            None => Ok(block.map_or(Value::Null, BlockDef::default_value)),
        }
    }

    fn run_sub_factory(
        &mut self,
        sub: &SubFactory,
        layers: Vec<Layer>,
        block: Option<&BlockDef>,
        path: FieldPath,
    ) -> FactoryResult<Value> {
        let mut composer = LayerComposer::with_capacity(layers.len() + 1);
        composer.push_call_site(sub.defaults().clone());
        composer.extend(layers);
        self.run_nested(sub.factory(), composer.layers(), block.cloned(), path)
    }

    /// Build `factory` as a child of this node with the same strategy.
    pub(crate) fn run_nested(
        &mut self,
        factory: &Arc<Factory>,
        layers: Vec<Layer>,
        block: Option<BlockDef>,
        path: FieldPath,
    ) -> FactoryResult<Value> {
        StepBuilder::new(self.mode.reborrow(), path)
            .inherit_block(block)
            .run(factory, layers)
    }
}
