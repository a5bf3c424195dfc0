//! Error types produced while parsing declarations and building values.

mod constructors;
mod conversions;
mod types;

pub use types::{FactoryError, FactoryResult};

#[cfg(test)]
mod tests;
