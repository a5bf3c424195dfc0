//! Cross-layer merge of parsed declaration trees.

use tracing::trace;

use crate::declaration::{
    FieldClass, ListShape, StreamShape, StructShape, parse_list, parse_stream, parse_struct,
};
use crate::error::FactoryResult;

use super::Layer;

/// Parse and overlay stream layers, then check ordinal contiguity.
///
/// # Errors
///
/// Propagates parser errors from any layer, and returns
/// [`FactoryError::MissingIndex`](crate::FactoryError::MissingIndex) when the
/// merged ordinals have a gap.
pub fn compose_stream<F>(layers: &[Layer], is_branch: F) -> FactoryResult<StreamShape>
where
    F: Fn(&str) -> bool,
{
    let mut merged = StreamShape::default();
    for layer in layers {
        let shape = parse_stream(layer, &is_branch)?;
        trace!(provenance = ?layer.provenance(), ordinals = shape.len(), "stream layer parsed");
        merged = merged.overlay(shape);
    }
    merged.validate_contiguous()?;
    Ok(merged)
}

/// Parse and overlay list layers, then check ordinal contiguity.
///
/// # Errors
///
/// As [`compose_stream`].
pub fn compose_list(layers: &[Layer]) -> FactoryResult<ListShape> {
    let mut merged = ListShape::default();
    for layer in layers {
        merged = merged.overlay(parse_list(layer)?);
    }
    merged.validate_contiguous()?;
    Ok(merged)
}

/// Parse and overlay struct or record layers.
///
/// # Errors
///
/// Propagates parser errors from any layer.
pub fn compose_struct<F>(
    layers: &[Layer],
    factory: &str,
    path: &str,
    classify: F,
) -> FactoryResult<StructShape>
where
    F: Fn(&str) -> FieldClass,
{
    let mut merged = StructShape::default();
    for layer in layers {
        merged = merged.overlay(parse_struct(layer, factory, path, &classify)?);
    }
    Ok(merged)
}
