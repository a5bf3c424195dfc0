//! Resolved declaration trees produced by the parsers.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::mem;

use indexmap::IndexMap;

use crate::error::{FactoryError, FactoryResult};
use crate::layering::Layer;
use crate::params::Param;

/// What the caller supplied for one struct field, list element or stream
/// ordinal.
#[derive(Clone, Debug, Default)]
pub enum SlotInput {
    /// Use the declaration's default (a bare default-branch marker).
    #[default]
    Default,
    /// An explicit value.
    Value(Param),
    /// Sub-parameters forwarded to the slot's own factory, one layer per
    /// source layer, lowest precedence first.
    Nested(Vec<Layer>),
}

impl SlotInput {
    /// Lay `higher` over `self`.
    ///
    /// A default marker keeps whatever the lower layer supplied; nested
    /// groups stack so the nested factory re-applies layering; anything else
    /// in the higher layer replaces the lower input.
    #[must_use]
    pub fn overlay(self, higher: Self) -> Self {
        match (self, higher) {
            (lower, Self::Default) => lower,
            (Self::Nested(mut lower), Self::Nested(upper)) => {
                lower.extend(upper);
                Self::Nested(lower)
            }
            (_, upper) => upper,
        }
    }

    /// Returns `true` for [`SlotInput::Default`].
    #[must_use]
    pub const fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }
}

/// One bound stream ordinal.
#[derive(Clone, Debug)]
pub struct StreamSlot {
    branch: String,
    input: SlotInput,
}

impl StreamSlot {
    pub(crate) const fn new(branch: String, input: SlotInput) -> Self {
        Self { branch, input }
    }

    /// Branch selected for this ordinal.
    #[must_use]
    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// Input supplied for the branch.
    #[must_use]
    pub const fn input(&self) -> &SlotInput {
        &self.input
    }

    /// Consume the slot, returning branch name and input.
    #[must_use]
    pub fn into_parts(self) -> (String, SlotInput) {
        (self.branch, self.input)
    }
}

/// Resolved shape of one stream invocation: ordinal to branch and input.
///
/// Built per layer by [`parse_stream`](super::parse_stream) and merged across
/// layers before the step builder reads branch declarations by name.
#[derive(Clone, Debug, Default)]
pub struct StreamShape {
    slots: BTreeMap<usize, StreamSlot>,
}

impl StreamShape {
    pub(crate) const fn from_slots(slots: BTreeMap<usize, StreamSlot>) -> Self {
        Self { slots }
    }

    /// Slot bound at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&StreamSlot> {
        self.slots.get(&index)
    }

    /// Iterate over bound ordinals in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &StreamSlot)> {
        self.slots.iter().map(|(index, slot)| (*index, slot))
    }

    /// Number of bound ordinals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` when no ordinal is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Lay `higher` over `self`. An ordinal rebound to a different branch
    /// replaces the lower binding outright.
    #[must_use]
    pub fn overlay(mut self, higher: Self) -> Self {
        for (index, upper) in higher.slots {
            match self.slots.entry(index) {
                Entry::Occupied(mut slot) if slot.get().branch == upper.branch => {
                    let lower = mem::take(&mut slot.get_mut().input);
                    slot.get_mut().input = lower.overlay(upper.input);
                }
                Entry::Occupied(mut slot) => {
                    slot.insert(upper);
                }
                Entry::Vacant(slot) => {
                    slot.insert(upper);
                }
            }
        }
        self
    }

    /// Check the bound ordinals form `0..n`.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::MissingIndex`] naming the first gap.
    pub fn validate_contiguous(&self) -> FactoryResult<()> {
        check_contiguous(self.slots.keys())
    }

    pub(crate) fn into_slots(self) -> impl Iterator<Item = (usize, StreamSlot)> {
        self.slots.into_iter()
    }
}

/// Resolved shape of one list invocation: ordinal to element input.
#[derive(Clone, Debug, Default)]
pub struct ListShape {
    slots: BTreeMap<usize, SlotInput>,
}

impl ListShape {
    pub(crate) const fn from_slots(slots: BTreeMap<usize, SlotInput>) -> Self {
        Self { slots }
    }

    /// Input bound at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SlotInput> {
        self.slots.get(&index)
    }

    /// Number of bound elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` when no element is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Lay `higher` over `self` element by element.
    #[must_use]
    pub fn overlay(mut self, higher: Self) -> Self {
        for (index, upper) in higher.slots {
            let slot = self.slots.entry(index).or_default();
            *slot = mem::take(slot).overlay(upper);
        }
        self
    }

    /// Check the bound ordinals form `0..n`.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::MissingIndex`] naming the first gap.
    pub fn validate_contiguous(&self) -> FactoryResult<()> {
        check_contiguous(self.slots.keys())
    }

    pub(crate) fn into_slots(self) -> impl Iterator<Item = (usize, SlotInput)> {
        self.slots.into_iter()
    }
}

/// Resolved shape of a struct or record invocation: field name to input.
#[derive(Clone, Debug, Default)]
pub struct StructShape {
    fields: IndexMap<String, SlotInput>,
}

impl StructShape {
    pub(crate) const fn from_fields(fields: IndexMap<String, SlotInput>) -> Self {
        Self { fields }
    }

    /// Input supplied for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SlotInput> {
        self.fields.get(name)
    }

    /// Field names in first-seen order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of fields with input.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` when no field has input.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Lay `higher` over `self` field by field.
    #[must_use]
    pub fn overlay(mut self, higher: Self) -> Self {
        for (name, upper) in higher.fields {
            let slot = self.fields.entry(name).or_default();
            *slot = mem::take(slot).overlay(upper);
        }
        self
    }

    pub(crate) fn into_fields(self) -> IndexMap<String, SlotInput> {
        self.fields
    }
}

fn check_contiguous<'a>(indices: impl Iterator<Item = &'a usize>) -> FactoryResult<()> {
    for (expected, actual) in indices.enumerate() {
        if expected != *actual {
            return Err(FactoryError::missing_index(expected));
        }
    }
    Ok(())
}
