//! Declaration parser: flat parameter keys to resolved declaration trees.
//!
//! Each compound kind has its own grammar:
//!
//! - stream: `<i>=<branch>` (default-branch marker), `<i>__<branch>=value`
//!   (scalar assignment), `<i>__<branch>__<rest>=value` (deep assignment);
//! - list: `<i>=value`, `<i>__<rest>=value`;
//! - struct and record: `<field>=value`, `<field>__<rest>=value`.
//!
//! Parsers work on one [`Layer`] at a time. Nested parameters keep the
//! provenance of the layer they came from so the nested factory can layer
//! them again; see [`crate::layering`] for the cross-layer merge.

mod key;
mod shape;

pub use shape::{ListShape, SlotInput, StreamShape, StreamSlot, StructShape};

use std::collections::BTreeMap;
use std::collections::btree_map::Entry as OrdinalEntry;
use std::mem;

use indexmap::IndexMap;
use indexmap::map::Entry as FieldEntry;
use tracing::debug;

use crate::error::{FactoryError, FactoryResult};
use crate::layering::Layer;
use crate::params::{DELIMITER, Param, Params};
use crate::value::Value;

/// How a struct or record factory treats a field name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldClass {
    /// A declared field or child block.
    Declared,
    /// The tree-parent field of a hierarchical record.
    Parent,
    /// Not declared, but accepted as a plain value (record attributes).
    Extra,
    /// Not declared and not accepted.
    Unknown,
}

/// Parameters collected for one slot within a single layer.
#[derive(Debug, Default)]
enum Entry {
    #[default]
    Marker,
    Value(Param),
    Nested(Params),
}

impl Entry {
    fn nested(rest: &str, param: &Param) -> Self {
        Self::Nested(Params::new().with(rest, param.clone()))
    }

    /// Combine two entries for the same slot, `None` when they conflict.
    fn merge(self, other: Self) -> Option<Self> {
        match (self, other) {
            (Self::Marker, entry) | (entry, Self::Marker) => Some(entry),
            (Self::Nested(mut lower), Self::Nested(upper)) => {
                lower.extend(upper);
                Some(Self::Nested(lower))
            }
            (Self::Value(_), _) | (_, Self::Value(_)) => None,
        }
    }

    fn into_input(self, layer: &Layer) -> SlotInput {
        match self {
            Self::Marker => SlotInput::Default,
            Self::Value(param) => SlotInput::Value(param),
            Self::Nested(params) => {
                SlotInput::Nested(vec![Layer::new(layer.provenance(), params)])
            }
        }
    }
}

/// Parse one layer of stream parameters.
///
/// `is_branch` reports whether the stream factory declares a branch.
///
/// # Errors
///
/// - [`FactoryError::InvalidDeclaration`] for malformed keys or markers, and
///   when one branch receives both a scalar and nested parameters;
/// - [`FactoryError::UnknownChildBlock`] for undeclared branches;
/// - [`FactoryError::DuplicateDeclaration`] when an ordinal is bound to two
///   branches.
///
/// ```rust
/// use block_factories::declaration::parse_stream;
/// use block_factories::{params, Layer};
///
/// let layer = Layer::call_time(params! {
///     "0__char_block" => "foo",
///     "1" => "struct_block",
///     "2__struct_block__title" => "bar",
/// });
/// let shape = parse_stream(&layer, |name| name.ends_with("_block"))?;
/// let branches: Vec<_> = shape.iter().map(|(_, slot)| slot.branch()).collect();
/// assert_eq!(branches, ["char_block", "struct_block", "struct_block"]);
/// # Ok::<_, block_factories::FactoryError>(())
/// ```
pub fn parse_stream<F>(layer: &Layer, is_branch: F) -> FactoryResult<StreamShape>
where
    F: Fn(&str) -> bool,
{
    let mut entries: BTreeMap<usize, (String, Entry)> = BTreeMap::new();
    for (full_key, param) in layer.params().iter() {
        let (head, rest) = key::split(full_key, full_key)?;
        let index = key::index(full_key, head)?;
        let (branch, entry) = match rest {
            None => (marker_branch(full_key, param)?, Entry::Marker),
            Some(path) => {
                let (name, sub) = key::split(full_key, path)?;
                let entry = sub.map_or_else(
                    || Entry::Value(param.clone()),
                    |sub_key| Entry::nested(sub_key, param),
                );
                (name.to_owned(), entry)
            }
        };
        if !is_branch(&branch) {
            return Err(FactoryError::unknown_child_block(branch));
        }
        bind_ordinal(&mut entries, index, branch, entry)?;
    }
    Ok(StreamShape::from_slots(
        entries
            .into_iter()
            .map(|(index, (branch, entry))| {
                (index, StreamSlot::new(branch, entry.into_input(layer)))
            })
            .collect(),
    ))
}

fn marker_branch(full_key: &str, param: &Param) -> FactoryResult<String> {
    match param {
        Param::Value(Value::Text(name)) if !name.is_empty() => Ok(name.clone()),
        Param::Lazy(_) => Err(FactoryError::invalid_declaration(
            full_key,
            "a default-branch marker must be a literal branch name",
        )),
        Param::Value(other) => Err(FactoryError::invalid_declaration(
            full_key,
            format!(
                "expected a branch name for a default-branch marker, got {}",
                other.kind_name()
            ),
        )),
    }
}

fn bind_ordinal(
    entries: &mut BTreeMap<usize, (String, Entry)>,
    index: usize,
    branch: String,
    entry: Entry,
) -> FactoryResult<()> {
    match entries.entry(index) {
        OrdinalEntry::Vacant(slot) => {
            slot.insert((branch, entry));
        }
        OrdinalEntry::Occupied(mut slot) => {
            let (existing, current) = slot.get_mut();
            if *existing != branch {
                return Err(FactoryError::duplicate(index, existing.clone(), branch));
            }
            if matches!(current, Entry::Marker) != matches!(entry, Entry::Marker) {
                debug!(index, branch = %branch, "explicit declaration replaces default-branch marker");
            }
            let merged = mem::take(current).merge(entry).ok_or_else(|| {
                FactoryError::invalid_declaration(
                    format!("{index}{DELIMITER}{branch}"),
                    "both a value and nested parameters",
                )
            })?;
            *current = merged;
        }
    }
    Ok(())
}

/// Parse one layer of list parameters.
///
/// # Errors
///
/// Returns [`FactoryError::InvalidDeclaration`] for non-numeric or empty
/// segments, or when one element receives both a value and nested
/// parameters.
pub fn parse_list(layer: &Layer) -> FactoryResult<ListShape> {
    let mut entries: BTreeMap<usize, Entry> = BTreeMap::new();
    for (full_key, param) in layer.params().iter() {
        let (head, rest) = key::split(full_key, full_key)?;
        let index = key::index(full_key, head)?;
        let entry = rest.map_or_else(
            || Entry::Value(param.clone()),
            |sub_key| Entry::nested(sub_key, param),
        );
        let slot = entries.entry(index).or_default();
        *slot = mem::take(slot).merge(entry).ok_or_else(|| {
            FactoryError::invalid_declaration(full_key, "both a value and nested parameters")
        })?;
    }
    Ok(ListShape::from_slots(
        entries
            .into_iter()
            .map(|(index, entry)| (index, entry.into_input(layer)))
            .collect(),
    ))
}

/// Parse one layer of struct or record parameters.
///
/// `factory` and `path` name the node for error messages; `classify`
/// decides how each top-level field name is treated.
///
/// # Errors
///
/// - [`FactoryError::UnknownChildBlock`] for [`FieldClass::Unknown`] names;
/// - [`FactoryError::UnknownField`] for nested parameters under an
///   [`FieldClass::Extra`] name;
/// - [`FactoryError::ParentConflict`] when the parent field receives both an
///   instance and attributes;
/// - [`FactoryError::InvalidDeclaration`] for the same conflict on other
///   fields, and for empty segments.
pub fn parse_struct<F>(
    layer: &Layer,
    factory: &str,
    path: &str,
    classify: F,
) -> FactoryResult<StructShape>
where
    F: Fn(&str) -> FieldClass,
{
    let mut entries: IndexMap<String, Entry> = IndexMap::new();
    for (full_key, param) in layer.params().iter() {
        let (name, rest) = key::split(full_key, full_key)?;
        let class = classify(name);
        match (class, rest) {
            (FieldClass::Unknown, _) => return Err(FactoryError::unknown_child_block(name)),
            (FieldClass::Extra, Some(_)) => {
                return Err(FactoryError::UnknownField {
                    factory: factory.to_owned(),
                    name: name.to_owned(),
                });
            }
            _ => {}
        }
        let entry = rest.map_or_else(
            || Entry::Value(param.clone()),
            |sub_key| Entry::nested(sub_key, param),
        );
        match entries.entry(name.to_owned()) {
            FieldEntry::Vacant(slot) => {
                slot.insert(entry);
            }
            FieldEntry::Occupied(mut slot) => {
                let current = slot.get_mut();
                *current = mem::take(current).merge(entry).ok_or_else(|| {
                    if class == FieldClass::Parent {
                        FactoryError::ParentConflict {
                            path: path.to_owned(),
                        }
                    } else {
                        FactoryError::invalid_declaration(
                            full_key,
                            "both a value and nested parameters",
                        )
                    }
                })?;
            }
        }
    }
    Ok(StructShape::from_fields(
        entries
            .into_iter()
            .map(|(name, entry)| (name, entry.into_input(layer)))
            .collect(),
    ))
}
