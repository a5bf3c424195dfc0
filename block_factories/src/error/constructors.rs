//! Shorthand constructors for `FactoryError`.

use crate::store::StoreError;

use super::FactoryError;

impl FactoryError {
    /// Construct an [`FactoryError::InvalidDeclaration`].
    ///
    /// # Examples
    ///
    /// ```
    /// use block_factories::FactoryError;
    /// let err = FactoryError::invalid_declaration("x__", "empty segment");
    /// assert_eq!(err.to_string(), "invalid declaration 'x__': empty segment");
    /// ```
    #[must_use]
    pub fn invalid_declaration(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDeclaration {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Construct a [`FactoryError::DuplicateDeclaration`] naming both branches.
    #[must_use]
    pub fn duplicate(index: usize, existing: impl Into<String>, got: impl Into<String>) -> Self {
        Self::DuplicateDeclaration {
            index,
            existing: existing.into(),
            got: got.into(),
        }
    }

    /// Construct a [`FactoryError::UnknownChildBlock`].
    #[must_use]
    pub fn unknown_child_block(name: impl Into<String>) -> Self {
        Self::UnknownChildBlock { name: name.into() }
    }

    /// Construct a [`FactoryError::MissingIndex`].
    #[must_use]
    pub const fn missing_index(index: usize) -> Self {
        Self::MissingIndex { index }
    }

    /// Construct a [`FactoryError::Validation`] for the field at `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use block_factories::FactoryError;
    /// let err = FactoryError::validation("body.0.char_block", "This field is required.");
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Validation failed for 'body.0.char_block': This field is required."
    /// );
    /// ```
    #[must_use]
    pub fn validation(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Wrap a store failure raised while persisting a `model` record.
    #[must_use]
    pub fn store(model: impl Into<String>, source: StoreError) -> Self {
        Self::Store {
            model: model.into(),
            source,
        }
    }

    /// Construct a fixture error from a plain message.
    #[must_use]
    pub fn fixture(message: impl Into<String>) -> Self {
        Self::Fixture(Box::new(figment::Error::from(message.into())))
    }
}
