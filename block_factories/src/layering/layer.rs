//! Layer metadata and transport values for default layering.

use crate::params::Params;

/// Where a parameter layer came from.
///
/// Variants are ordered from lowest to highest precedence.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
#[non_exhaustive]
pub enum LayerProvenance {
    /// Defaults attached to the factory definition itself.
    Definition,
    /// Defaults attached where a field references the factory.
    CallSite,
    /// Parameters passed to the build call.
    CallTime,
}

/// One set of flat parameters tagged with its provenance.
#[derive(Clone, Debug)]
pub struct Layer {
    provenance: LayerProvenance,
    params: Params,
}

impl Layer {
    /// Construct a layer from explicit parts.
    #[must_use]
    pub const fn new(provenance: LayerProvenance, params: Params) -> Self {
        Self { provenance, params }
    }

    /// Construct a layer of definition-level defaults.
    #[must_use]
    pub const fn definition(params: Params) -> Self {
        Self::new(LayerProvenance::Definition, params)
    }

    /// Construct a layer of call-site defaults.
    #[must_use]
    pub const fn call_site(params: Params) -> Self {
        Self::new(LayerProvenance::CallSite, params)
    }

    /// Construct a layer of call-time parameters.
    #[must_use]
    pub const fn call_time(params: Params) -> Self {
        Self::new(LayerProvenance::CallTime, params)
    }

    /// Returns the provenance of the layer.
    #[must_use]
    pub const fn provenance(&self) -> LayerProvenance {
        self.provenance
    }

    /// Borrow the layer's parameters.
    #[must_use]
    pub const fn params(&self) -> &Params {
        &self.params
    }

    /// Consume the layer, returning its parameters.
    #[must_use]
    pub fn into_params(self) -> Params {
        self.params
    }

    /// Returns `true` when the layer carries no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}
