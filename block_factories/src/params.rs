//! Flat, delimiter-keyed factory parameters.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::value::Value;

/// Separator between path segments of a flat parameter key.
pub const DELIMITER: &str = "__";

/// Deferred computation producing a value when its slot is resolved.
pub type LazyFn = Arc<dyn Fn() -> Value + Send + Sync>;

/// A single parameter value: a literal or a deferred computation.
#[derive(Clone)]
pub enum Param {
    /// A literal value.
    Value(Value),
    /// Evaluated when the slot receiving it is resolved, not when declared.
    Lazy(LazyFn),
}

impl Param {
    /// Wrap a closure as a lazily evaluated parameter.
    #[must_use]
    pub fn lazy<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self::Lazy(Arc::new(f))
    }

    /// Produce the parameter's value, running the closure for lazy params.
    #[must_use]
    pub fn evaluate(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Lazy(f) => f(),
        }
    }

    /// Borrow the literal value, if this is not a lazy parameter.
    #[must_use]
    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Lazy(_) => None,
        }
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Lazy(_) => f.write_str("Lazy(<fn>)"),
        }
    }
}

impl<T: Into<Value>> From<T> for Param {
    fn from(value: T) -> Self {
        Self::Value(value.into())
    }
}

/// Insertion-ordered map of flat parameter keys to values.
///
/// Keys encode a path through the nested structure, e.g.
/// `body__0__struct_block__title`. Numeric segments address stream or list
/// ordinals; other segments name fields or branches.
#[derive(Clone, Debug, Default)]
pub struct Params {
    entries: IndexMap<String, Param>,
}

impl Params {
    /// Create an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter, returning any value previously stored at `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Param>) -> Option<Param> {
        self.entries.insert(key.into(), value.into())
    }

    /// Builder-style variant of [`Params::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Param>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Look up a parameter by its full key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Param> {
        self.entries.get(key)
    }

    /// Returns `true` when `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove a parameter, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Param> {
        self.entries.shift_remove(key)
    }

    /// Iterate over `(key, param)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Param)> {
        self.entries.iter().map(|(key, param)| (key.as_str(), param))
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prefix every key with `prefix` and the delimiter.
    #[must_use]
    pub fn nest_under(self, prefix: &str) -> Self {
        self.entries
            .into_iter()
            .map(|(key, param)| (format!("{prefix}{DELIMITER}{key}"), param))
            .collect()
    }
}

impl<K: Into<String>, V: Into<Param>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Param>> Extend<(K, V)> for Params {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.entries.insert(key.into(), value.into());
        }
    }
}

impl IntoIterator for Params {
    type Item = (String, Param);
    type IntoIter = indexmap::map::IntoIter<String, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Build a [`Params`] from `key => value` pairs.
///
/// Pairs are inserted in order, so a repeated key keeps its first position
/// and takes the last value.
///
/// ```rust
/// use block_factories::{Value, params};
///
/// let params = params! {
///     "title" => "x",
///     "item__value" => 5,
///     "title" => "y",
/// };
/// assert_eq!(params.len(), 2);
/// let title = params.get("title").and_then(|param| param.as_value());
/// assert_eq!(title, Some(&Value::from("y")));
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::Params::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut params = $crate::Params::new();
        $(
            let _ = params.insert($key, $value);
        )+
        params
    }};
}
