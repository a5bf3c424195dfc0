//! Layer composition helpers.

use crate::params::Params;

use super::Layer;

/// Builder that accumulates [`Layer`] instances, lowest precedence first.
///
/// ```rust
/// use block_factories::{params, LayerComposer, LayerProvenance};
///
/// let mut composer = LayerComposer::new();
/// composer.push_definition(params! { "0__char_block" => "meta default text" });
/// composer.push_call_site(params! { "0__char_block" => "overridden text" });
/// composer.push_call_time(params! {});
///
/// let layers = composer.layers();
/// let provenances: Vec<_> = layers.iter().map(|layer| layer.provenance()).collect();
/// assert_eq!(
///     provenances,
///     [LayerProvenance::Definition, LayerProvenance::CallSite]
/// );
/// ```
#[derive(Debug, Default)]
pub struct LayerComposer {
    layers: Vec<Layer>,
}

impl LayerComposer {
    /// Create an empty composer.
    #[must_use]
    pub const fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Create a composer with preallocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            layers: Vec::with_capacity(capacity),
        }
    }

    /// Push a definition-level defaults layer.
    pub fn push_definition(&mut self, params: Params) {
        self.push_layer(Layer::definition(params));
    }

    /// Push a call-site defaults layer.
    pub fn push_call_site(&mut self, params: Params) {
        self.push_layer(Layer::call_site(params));
    }

    /// Push a call-time layer.
    pub fn push_call_time(&mut self, params: Params) {
        self.push_layer(Layer::call_time(params));
    }

    /// Push an arbitrary layer. Empty layers are dropped.
    pub fn push_layer(&mut self, layer: Layer) {
        if !layer.is_empty() {
            self.layers.push(layer);
        }
    }

    /// Append already-composed layers, keeping their order.
    pub fn extend(&mut self, layers: impl IntoIterator<Item = Layer>) {
        for layer in layers {
            self.push_layer(layer);
        }
    }

    /// Consume the composer and return the accumulated layers.
    #[must_use]
    pub fn layers(self) -> Vec<Layer> {
        self.layers
    }
}
