//! Leaf blocks and their cleaning rules.

use crate::value::Value;

const REQUIRED: &str = "This field is required.";

/// Scalar type of an [`AtomicBlock`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AtomicKind {
    /// Single-line text.
    Char,
    /// Multi-line text.
    Text,
    /// Whole number.
    Integer,
    /// Floating point number.
    Float,
    /// True/false flag.
    Boolean,
}

/// Scalar leaf block.
#[derive(Clone, Debug, PartialEq)]
pub struct AtomicBlock {
    kind: AtomicKind,
    required: bool,
    max_length: Option<usize>,
    default: Value,
}

impl AtomicBlock {
    /// A required block of `kind` with no default.
    #[must_use]
    pub const fn new(kind: AtomicKind) -> Self {
        Self {
            kind,
            required: true,
            max_length: None,
            default: Value::Null,
        }
    }

    /// Single-line text block.
    #[must_use]
    pub const fn char() -> Self {
        Self::new(AtomicKind::Char)
    }

    /// Multi-line text block.
    #[must_use]
    pub const fn text() -> Self {
        Self::new(AtomicKind::Text)
    }

    /// Whole number block.
    #[must_use]
    pub const fn integer() -> Self {
        Self::new(AtomicKind::Integer)
    }

    /// Floating point block.
    #[must_use]
    pub const fn float() -> Self {
        Self::new(AtomicKind::Float)
    }

    /// Boolean block. Unlike the other kinds it is optional by default, as
    /// a required boolean would reject `false`.
    #[must_use]
    pub const fn boolean() -> Self {
        Self {
            kind: AtomicKind::Boolean,
            required: false,
            max_length: None,
            default: Value::Null,
        }
    }

    /// Set whether a value must be supplied.
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Limit text values to `max_length` characters.
    #[must_use]
    pub const fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Set the block's default value.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = value.into();
        self
    }

    /// Scalar type of the block.
    #[must_use]
    pub const fn kind(&self) -> AtomicKind {
        self.kind
    }

    /// Whether a value must be supplied.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// The block's default value.
    #[must_use]
    pub fn default_value(&self) -> Value {
        self.default.clone()
    }

    /// Clean `value` against the block's type.
    ///
    /// # Errors
    ///
    /// Returns a human-readable message when the value is missing for a
    /// required block or cannot be coerced to the block's type.
    pub fn clean(&self, value: Value) -> Result<Value, String> {
        if value.is_null() {
            return if self.required {
                Err(REQUIRED.to_owned())
            } else {
                Ok(Value::Null)
            };
        }
        match self.kind {
            AtomicKind::Char | AtomicKind::Text => self.clean_text(value),
            AtomicKind::Integer => clean_integer(value),
            AtomicKind::Float => clean_float(value),
            AtomicKind::Boolean => clean_boolean(value),
        }
    }

    fn clean_text(&self, value: Value) -> Result<Value, String> {
        let text = match value {
            Value::Text(text) => text,
            Value::Int(number) => number.to_string(),
            Value::Float(number) => number.to_string(),
            Value::Bool(flag) => flag.to_string(),
            other => return Err(format!("Expected text, got {}.", other.kind_name())),
        };
        if self.required && text.is_empty() {
            return Err(REQUIRED.to_owned());
        }
        let length = text.chars().count();
        match self.max_length {
            Some(max) if length > max => Err(format!(
                "Ensure this value has at most {max} characters (it has {length})."
            )),
            _ => Ok(Value::Text(text)),
        }
    }
}

fn clean_integer(value: Value) -> Result<Value, String> {
    match value {
        Value::Int(number) => Ok(Value::Int(number)),
        Value::Text(text) => text
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| "Enter a whole number.".to_owned()),
        _ => Err("Enter a whole number.".to_owned()),
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "integers are accepted for float blocks as the host form field does"
)]
fn clean_float(value: Value) -> Result<Value, String> {
    match value {
        Value::Float(number) => Ok(Value::Float(number)),
        Value::Int(number) => Ok(Value::Float(number as f64)),
        Value::Text(text) => text
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| "Enter a number.".to_owned()),
        _ => Err("Enter a number.".to_owned()),
    }
}

fn clean_boolean(value: Value) -> Result<Value, String> {
    match value {
        Value::Bool(flag) => Ok(Value::Bool(flag)),
        Value::Int(0) => Ok(Value::Bool(false)),
        Value::Int(1) => Ok(Value::Bool(true)),
        Value::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "on" => Ok(Value::Bool(true)),
            "false" | "0" | "off" | "" => Ok(Value::Bool(false)),
            _ => Err("Enter a valid boolean.".to_owned()),
        },
        _ => Err("Enter a valid boolean.".to_owned()),
    }
}

/// Block holding a reference to a record of another model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChooserBlock {
    model: String,
    required: bool,
}

impl ChooserBlock {
    /// A required chooser for records of `model`.
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            required: true,
        }
    }

    /// Set whether a record must be chosen.
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Model of the records this block references.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Clean a chosen record.
    ///
    /// # Errors
    ///
    /// Returns a message when the value is not a record of the expected
    /// model, or is missing for a required chooser.
    pub fn clean(&self, value: Value) -> Result<Value, String> {
        match value {
            Value::Null if self.required => Err(REQUIRED.to_owned()),
            Value::Null => Ok(Value::Null),
            Value::Record(record) if record.model() == self.model => Ok(Value::Record(record)),
            Value::Record(record) => Err(format!(
                "Expected a {} record, got a {} record.",
                self.model,
                record.model()
            )),
            other => Err(format!(
                "Expected a {} record, got {}.",
                self.model,
                other.kind_name()
            )),
        }
    }
}
