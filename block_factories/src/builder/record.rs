//! Record assembly and persistence.

use tracing::debug;

use crate::error::{FactoryError, FactoryResult};
use crate::hierarchy::PARENT_FIELD;
use crate::value::{Record, Value};

use super::{Mode, Resolver};

/// Where a record goes when it is persisted.
enum Placement {
    Standalone,
    Root,
    Child(Record),
}

pub(super) fn build_record(mut resolver: Resolver<'_>, model: &str) -> FactoryResult<Value> {
    let is_tree = resolver.factory().parent_decl().is_some();
    let names = resolver.field_names();
    let placement = if is_tree {
        match resolver.get(PARENT_FIELD)? {
            Value::Null => Placement::Root,
            Value::Record(parent) => Placement::Child(parent),
            other => {
                return Err(FactoryError::validation(
                    resolver.path().child(PARENT_FIELD).to_string(),
                    format!("expected a parent record or null, got {}", other.kind_name()),
                ));
            }
        }
    } else {
        Placement::Standalone
    };

    let mut record = Record::new(model);
    for name in names {
        if is_tree && name == PARENT_FIELD {
            continue;
        }
        let value = resolver.get(&name)?;
        record.set_field(name, value);
    }
    if let Placement::Child(parent) = &placement {
        record.set_parent(Some(parent.clone()));
    }
    persist(resolver.mode_mut(), record, placement)
}

fn persist(mode: &mut Mode<'_>, record: Record, placement: Placement) -> FactoryResult<Value> {
    let Mode::Create(store) = mode else {
        return Ok(Value::Record(record));
    };
    let model = record.model().to_owned();
    let saved = match placement {
        Placement::Standalone => store.save(record),
        Placement::Root => store.add_root(record),
        Placement::Child(parent) => {
            let parent_id = parent.id().ok_or_else(|| FactoryError::UnsavedParent {
                model: model.clone(),
            })?;
            store.add_child(parent_id, record)
        }
    }
    .map_err(|source| FactoryError::store(&model, source))?;
    debug!(
        model = %model,
        id = ?saved.id(),
        path = saved.tree().map(|tree| tree.path.as_str()),
        "record persisted"
    );
    Ok(Value::Record(saved))
}
