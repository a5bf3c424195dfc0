//! In-memory record store with materialised-path trees.

use indexmap::IndexMap;
use tracing::trace;

use crate::value::{Record, RecordId, TreePosition};

use super::{RecordStore, StoreError};

const STEP_LEN: usize = 4;
const RADIX: u32 = 36;

/// Store keeping persisted records in memory.
///
/// Tree records get a materialised path of four base-36 characters per
/// level (`0001`, `00010001`, ...), with roots numbered per model.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    last_id: u64,
    records: IndexMap<RecordId, Record>,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a record by identity.
    #[must_use]
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.get(&id)
    }

    /// The stored parent of `id`.
    #[must_use]
    pub fn parent_of(&self, id: RecordId) -> Option<&Record> {
        self.get(id)
            .and_then(Record::parent)
            .and_then(Record::id)
            .and_then(|parent| self.get(parent))
    }

    /// Direct children of `id`, in path order.
    #[must_use]
    pub fn children_of(&self, id: RecordId) -> Vec<&Record> {
        self.records
            .values()
            .filter(|record| record.parent().and_then(Record::id) == Some(id))
            .collect()
    }

    /// Tree roots of `model`, in path order.
    #[must_use]
    pub fn roots(&self, model: &str) -> Vec<&Record> {
        self.records
            .values()
            .filter(|record| {
                record.model() == model && record.tree().is_some_and(|tree| tree.depth == 1)
            })
            .collect()
    }

    /// Number of stored records.
    #[must_use]
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Number of stored records of `model`.
    #[must_use]
    pub fn count_model(&self, model: &str) -> usize {
        self.records
            .values()
            .filter(|record| record.model() == model)
            .count()
    }

    /// Iterate over stored records in insertion order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    fn insert(&mut self, mut record: Record) -> Result<Record, StoreError> {
        if let Some(id) = record.id() {
            return Err(StoreError::AlreadyPersisted {
                model: record.model().to_owned(),
                id,
            });
        }
        self.last_id += 1;
        let id = RecordId::new(self.last_id);
        record.set_id(id);
        trace!(model = record.model(), %id, "stored record");
        self.records.insert(id, record.clone());
        Ok(record)
    }
}

impl RecordStore for InMemoryStore {
    fn save(&mut self, record: Record) -> Result<Record, StoreError> {
        self.insert(record)
    }

    fn add_root(&mut self, mut record: Record) -> Result<Record, StoreError> {
        let siblings = self.roots(record.model()).len();
        let position = u32::try_from(siblings + 1).map_err(|_| StoreError::PathOverflow {
            position: u32::MAX,
        })?;
        record.set_tree(TreePosition {
            path: encode_step(position)?,
            depth: 1,
            numchild: 0,
        });
        self.insert(record)
    }

    fn add_child(&mut self, parent: RecordId, mut record: Record) -> Result<Record, StoreError> {
        if let Some(id) = record.id() {
            return Err(StoreError::AlreadyPersisted {
                model: record.model().to_owned(),
                id,
            });
        }
        let stored = self
            .records
            .get_mut(&parent)
            .ok_or(StoreError::UnknownRecord { id: parent })?;
        let tree = stored
            .tree_mut()
            .ok_or(StoreError::NotATreeNode { id: parent })?;
        let position = tree.numchild + 1;
        let path = format!("{}{}", tree.path, encode_step(position)?);
        let depth = tree.depth + 1;
        tree.numchild = position;
        record.set_parent(Some(stored.clone()));
        record.set_tree(TreePosition {
            path,
            depth,
            numchild: 0,
        });
        self.insert(record)
    }
}

/// Encode a one-based sibling position as a fixed-width base-36 step.
#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "base-36 digit extraction"
)]
pub(super) fn encode_step(position: u32) -> Result<String, StoreError> {
    let mut digits = Vec::with_capacity(STEP_LEN);
    let mut rest = position;
    for _ in 0..STEP_LEN {
        let digit = char::from_digit(rest % RADIX, RADIX).unwrap_or('0');
        digits.push(digit.to_ascii_uppercase());
        rest /= RADIX;
    }
    if rest != 0 {
        return Err(StoreError::PathOverflow { position });
    }
    Ok(digits.into_iter().rev().collect())
}
