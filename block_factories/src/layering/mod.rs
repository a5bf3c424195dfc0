//! Default-value layering.
//!
//! A compound factory may receive parameters from several places: the
//! defaults attached to its own definition, the defaults attached where a
//! parent field references it, and the parameters passed to the build call.
//! Each source becomes a [`Layer`]; layers are parsed independently and then
//! overlaid slot by slot, lowest precedence first, so
//! call-time > call-site > definition > the branch's own declaration.

mod composer;
mod layer;
mod merge;

pub use composer::LayerComposer;
pub use layer::{Layer, LayerProvenance};
pub use merge::{compose_list, compose_stream, compose_struct};

#[cfg(test)]
mod tests;
