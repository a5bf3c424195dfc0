//! Flattening of nested documents into delimiter-keyed parameters.

use serde_json::Value as JsonValue;

use crate::error::{FactoryError, FactoryResult};
use crate::params::{DELIMITER, Params};
use crate::value::Value;

/// Flatten a nested document into [`Params`].
///
/// Object keys are joined with `__`; array items contribute their index as a
/// segment. Empty objects and arrays are kept as explicit empty values.
///
/// # Errors
///
/// Returns [`FactoryError::Fixture`] when the document is not an object.
pub fn flatten_document(document: &JsonValue) -> FactoryResult<Params> {
    let JsonValue::Object(map) = document else {
        return Err(FactoryError::fixture(
            "fixture documents must be tables of parameters",
        ));
    };
    let mut params = Params::new();
    for (key, value) in map {
        flatten_into(&mut params, key.clone(), value);
    }
    Ok(params)
}

fn flatten_into(params: &mut Params, prefix: String, value: &JsonValue) {
    match value {
        JsonValue::Object(map) if !map.is_empty() => {
            for (key, item) in map {
                flatten_into(params, format!("{prefix}{DELIMITER}{key}"), item);
            }
        }
        JsonValue::Array(items) if !items.is_empty() => {
            for (index, item) in items.iter().enumerate() {
                flatten_into(params, format!("{prefix}{DELIMITER}{index}"), item);
            }
        }
        leaf => {
            let _ = params.insert(prefix, Value::from(leaf.clone()));
        }
    }
}
