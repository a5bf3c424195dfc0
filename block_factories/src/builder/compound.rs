//! Assembly of leaf, chooser and compound block values.

use std::sync::Arc;

use tracing::trace;

use crate::blocks::BlockDef;
use crate::error::{FactoryError, FactoryResult};
use crate::factory::{Declaration, Factory, LEAF_FIELD};
use crate::layering::{Layer, compose_list, compose_stream};
use crate::value::{StreamChild, StreamValue, StructValue, Value};

use super::Resolver;

fn type_name(resolver: &Resolver<'_>) -> Option<String> {
    resolver
        .block()
        .and_then(BlockDef::type_name)
        .map(str::to_owned)
}

/// Clean a resolved leaf value against the node's block.
///
/// Null falls back to the block default without cleaning.
fn clean_leaf(resolver: &Resolver<'_>, value: Value) -> FactoryResult<Value> {
    let Some(def) = resolver.block() else {
        return Ok(value);
    };
    if value.is_null() {
        return Ok(def.default_value());
    }
    def.clean(value).map_err(|message| {
        FactoryError::validation(
            resolver.path().describe(resolver.factory().name()),
            message,
        )
    })
}

pub(super) fn build_leaf(mut resolver: Resolver<'_>) -> FactoryResult<Value> {
    let raw = resolver.get(LEAF_FIELD)?;
    clean_leaf(&resolver, raw)
}

pub(super) fn build_chooser(mut resolver: Resolver<'_>, field: &str) -> FactoryResult<Value> {
    let chosen = resolver.get(field)?;
    clean_leaf(&resolver, chosen)
}

pub(super) fn build_struct(mut resolver: Resolver<'_>) -> FactoryResult<Value> {
    let mut value = StructValue::new(type_name(&resolver));
    for name in resolver.field_names() {
        let field = resolver.get(&name)?;
        value.insert(name, field);
    }
    Ok(Value::Struct(value))
}

pub(super) fn build_list(
    mut resolver: Resolver<'_>,
    child: &Arc<Factory>,
    layers: &[Layer],
) -> FactoryResult<Value> {
    let shape = compose_list(layers)?;
    let element_block = resolver.block().and_then(BlockDef::list_child).cloned();
    let declaration = Declaration::sub_factory(child);
    let mut items = Vec::with_capacity(shape.len());
    for (index, input) in shape.into_slots() {
        let path = resolver.path().child(index);
        trace!(path = %path, "resolving list element");
        items.push(resolver.resolve_slot(
            Some(&declaration),
            Some(input),
            element_block.as_ref(),
            path,
        )?);
    }
    Ok(Value::List(items))
}

pub(super) fn build_stream(mut resolver: Resolver<'_>, layers: &[Layer]) -> FactoryResult<Value> {
    let factory = Arc::clone(resolver.factory());
    let shape = compose_stream(layers, |name| factory.declares(name))?;
    let mut stream = StreamValue::new(type_name(&resolver));
    for (index, slot) in shape.into_slots() {
        let (branch, input) = slot.into_parts();
        let block = resolver
            .block()
            .and_then(|def| def.child(&branch))
            .cloned();
        let path = resolver.path().child(index).child(&branch);
        trace!(path = %path, "resolving stream child");
        let value = resolver.resolve_slot(
            factory.declaration(&branch),
            Some(input),
            block.as_ref(),
            path,
        )?;
        stream.push(StreamChild::new(branch, value));
    }
    Ok(Value::Stream(stream))
}
