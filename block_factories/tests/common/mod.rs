//! Shared test fixtures for integration tests.
//!
//! `testapp` mirrors a small CMS application: struct, list and stream
//! blocks plus a page type with a stream body. Every accessor returns a
//! freshly defined factory, so sequence counters are never shared between
//! tests.

pub mod testapp;

use anyhow::{Result, anyhow};
use block_factories::{Record, StreamValue, StructValue, Value};

/// Unwrap a built record.
pub fn record(value: Value) -> Result<Record> {
    value.into_record().ok_or_else(|| anyhow!("expected a record"))
}

/// Borrow a built struct value.
pub fn structure(value: &Value) -> Result<&StructValue> {
    value.as_struct().ok_or_else(|| anyhow!("expected a struct, got {value:?}"))
}

/// Borrow a built stream value.
pub fn stream(value: &Value) -> Result<&StreamValue> {
    value.as_stream().ok_or_else(|| anyhow!("expected a stream, got {value:?}"))
}

/// The `(label, value)` item produced by the item factory.
pub fn item(label: &str, value: i64) -> Value {
    Value::Struct(StructValue::from_fields(
        Some("my_block_item".to_owned()),
        [("label", Value::from(label)), ("value", Value::from(value))],
    ))
}
