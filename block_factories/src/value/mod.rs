//! Values materialised by factory builds.
//!
//! Compound blocks produce [`StructValue`], [`Value::List`] and
//! [`StreamValue`]; record-backed factories produce [`Record`]s. Each value
//! is owned by its parent in the tree, and the only cross-links are the
//! explicit record references held by chooser blocks and tree parents.

mod record;
mod stream;
mod structure;

pub use record::{Record, RecordId, TreePosition};
pub use stream::{StreamChild, StreamValue};
pub use structure::StructValue;

use serde::Serialize;

/// A materialised value produced by a factory build.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent value; doubles as the explicit "no parent" marker.
    #[default]
    Null,
    /// Boolean leaf.
    Bool(bool),
    /// Integer leaf.
    Int(i64),
    /// Floating point leaf.
    Float(f64),
    /// Text leaf.
    Text(String),
    /// Ordered, homogeneous list block value.
    List(Vec<Value>),
    /// Struct block value.
    Struct(StructValue),
    /// Stream block value.
    Stream(StreamValue),
    /// Reference to a (possibly persisted) record.
    Record(Record),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the text content of a [`Value::Text`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the integer held by a [`Value::Int`].
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the float held by a [`Value::Float`].
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the boolean held by a [`Value::Bool`].
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Borrow the items of a [`Value::List`].
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the struct value of a [`Value::Struct`].
    #[must_use]
    pub const fn as_struct(&self) -> Option<&StructValue> {
        match self {
            Self::Struct(value) => Some(value),
            _ => None,
        }
    }

    /// Borrow the stream value of a [`Value::Stream`].
    #[must_use]
    pub const fn as_stream(&self) -> Option<&StreamValue> {
        match self {
            Self::Stream(value) => Some(value),
            _ => None,
        }
    }

    /// Borrow the record of a [`Value::Record`].
    #[must_use]
    pub const fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Consume the value, returning the record of a [`Value::Record`].
    #[must_use]
    pub fn into_record(self) -> Option<Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Short name of the variant, used in validation messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::List(_) => "list",
            Self::Struct(_) => "struct",
            Self::Stream(_) => "stream",
            Self::Record(_) => "record",
        }
    }

    /// Strip persisted identity (record ids and tree positions) recursively.
    ///
    /// Two values built from the same parameters with the build and create
    /// strategies compare equal once both have been stripped.
    #[must_use]
    pub fn without_identity(self) -> Self {
        match self {
            Self::List(items) => Self::List(items.into_iter().map(Self::without_identity).collect()),
            Self::Struct(value) => Self::Struct(value.map_values(Self::without_identity)),
            Self::Stream(value) => Self::Stream(value.map_values(Self::without_identity)),
            Self::Record(record) => Self::Record(record.without_identity()),
            leaf => leaf,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u64> for Value {
    /// Sequence numbers beyond `i64::MAX` saturate.
    fn from(value: u64) -> Self {
        Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Self::Record(value)
    }
}

impl From<StructValue> for Value {
    fn from(value: StructValue) -> Self {
        Self::Struct(value)
    }
}

impl From<StreamValue> for Value {
    fn from(value: StreamValue) -> Self {
        Self::Stream(value)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(flag) => Self::Bool(flag),
            serde_json::Value::Number(number) => number.as_i64().map_or_else(
                || {
                    number
                        .as_f64()
                        .map_or_else(|| Self::Text(number.to_string()), Self::Float)
                },
                Self::Int,
            ),
            serde_json::Value::String(text) => Self::Text(text),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => Self::Struct(StructValue::from_fields(
                None,
                map.into_iter().map(|(key, item)| (key, Self::from(item))),
            )),
        }
    }
}
