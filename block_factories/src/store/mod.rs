//! Record persistence collaborator.
//!
//! The create strategy hands finished records to a [`RecordStore`]. Plain
//! records are saved; tree records are added as a root or as the child of an
//! already persisted parent, so a child never references an unsaved parent.

mod memory;

pub use memory::InMemoryStore;

use thiserror::Error;

use crate::value::{Record, RecordId};

/// Persistence primitives consumed by the create strategy.
pub trait RecordStore {
    /// Persist a record outside any tree.
    ///
    /// # Errors
    ///
    /// Implementations reject records that already have an identity.
    fn save(&mut self, record: Record) -> Result<Record, StoreError>;

    /// Persist a record as a new tree root.
    ///
    /// # Errors
    ///
    /// As [`RecordStore::save`], plus tree bookkeeping failures.
    fn add_root(&mut self, record: Record) -> Result<Record, StoreError>;

    /// Persist a record as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownRecord`] when `parent` was never
    /// persisted by this store.
    fn add_child(&mut self, parent: RecordId, record: Record) -> Result<Record, StoreError>;
}

/// Failures raised by a [`RecordStore`].
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum StoreError {
    /// The referenced record does not exist in the store.
    #[error("record {id} does not exist")]
    UnknownRecord {
        /// Identity that was looked up.
        id: RecordId,
    },

    /// A child was added under a record that has no tree position.
    #[error("record {id} is not a tree node")]
    NotATreeNode {
        /// Identity of the would-be parent.
        id: RecordId,
    },

    /// The record already carries an identity.
    #[error("{model} record is already persisted as {id}")]
    AlreadyPersisted {
        /// Model of the record.
        model: String,
        /// Existing identity.
        id: RecordId,
    },

    /// A tree level ran out of path steps.
    #[error("tree position {position} does not fit in a path step")]
    PathOverflow {
        /// One-based position among siblings.
        position: u32,
    },
}
