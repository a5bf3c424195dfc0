//! Primary error enum for factory builds.

use thiserror::Error;

use crate::store::StoreError;

/// Result alias used throughout the crate.
pub type FactoryResult<T> = Result<T, FactoryError>;

/// Errors that can occur while resolving parameters and building values.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FactoryError {
    /// A flat parameter key does not match the grammar of its block kind.
    #[error("invalid declaration '{key}': {reason}")]
    InvalidDeclaration {
        /// Offending parameter key (or field path).
        key: String,
        /// Explanation of why the key was rejected.
        reason: String,
    },

    /// Two different branches were bound to the same stream index.
    #[error("duplicate declaration for index {index}: got {got}, already have {existing}")]
    DuplicateDeclaration {
        /// Stream index receiving both declarations.
        index: usize,
        /// Branch name bound first.
        existing: String,
        /// Branch name that conflicted with it.
        got: String,
    },

    /// A parameter referenced a block name the factory does not declare.
    #[error("No factory defined for block '{name}'")]
    UnknownChildBlock {
        /// The unknown block name.
        name: String,
    },

    /// Nested parameters were addressed to a record field with no declaration.
    #[error("factory '{factory}' declares no field '{name}'")]
    UnknownField {
        /// Factory receiving the parameters.
        factory: String,
        /// Field named by the parameter key.
        name: String,
    },

    /// Stream or list indices do not form a contiguous zero-based range.
    #[error("invalid declaration: missing required index {index}")]
    MissingIndex {
        /// First index absent from the sequence.
        index: usize,
    },

    /// Both a parent instance and parent attributes were supplied.
    #[error("Can't pass a parent instance and attributes for '{path}'")]
    ParentConflict {
        /// Path of the node receiving the conflicting parent declarations.
        path: String,
    },

    /// A tree node was requested without any parent information.
    #[error(
        "no parent given for '{model}': pass a parent instance, parent attributes, or an explicit null parent"
    )]
    MissingParent {
        /// Model of the node being built.
        model: String,
    },

    /// A parent instance passed to the create strategy has no identity.
    #[error("parent of '{model}' has not been persisted")]
    UnsavedParent {
        /// Model of the child node.
        model: String,
    },

    /// Type cleaning rejected a resolved value.
    #[error("Validation failed for '{path}': {message}")]
    Validation {
        /// Dotted path of the offending field.
        path: String,
        /// Human-readable explanation from the cleaning function.
        message: String,
    },

    /// Lazy attributes read each other in a cycle.
    #[error("cyclic lazy declaration: {cycle}")]
    CyclicDeclaration {
        /// Declaration names forming the cycle, joined with `->`.
        cycle: String,
    },

    /// An abstract factory was asked to build a value.
    #[error("factory '{name}' is abstract and cannot build values")]
    AbstractFactory {
        /// Name of the abstract factory.
        name: String,
    },

    /// The record store refused to persist a record.
    #[error("Failed to persist '{model}': {source}")]
    Store {
        /// Model of the record being persisted.
        model: String,
        /// Underlying store failure.
        #[source]
        source: StoreError,
    },

    /// A fixture document could not be read or extracted.
    #[error("Failed to load fixture parameters: {0}")]
    Fixture(#[from] Box<figment::Error>),
}
