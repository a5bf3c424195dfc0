//! Nested fixture documents as factory parameters.
//!
//! Parameters for large content trees are easier to read as nested
//! documents than as long `__`-joined keys. Documents are read through
//! `figment` providers, extracted as JSON and flattened back into
//! [`Params`]:
//!
//! ```rust
//! use block_factories::fixtures::fixture_params;
//! use figment::{Figment, providers::Serialized};
//!
//! let figment = Figment::from(Serialized::defaults(serde_json::json!({
//!     "title": "x",
//!     "body": { "0": { "char_block": "foo" }, "1": "struct_block" },
//! })));
//! let params = fixture_params(&figment)?;
//! let keys: Vec<_> = params.keys().collect();
//! assert_eq!(keys, ["body__0__char_block", "body__1", "title"]);
//! # Ok::<_, block_factories::FactoryError>(())
//! ```

mod flatten;

pub use flatten::flatten_document;

use camino::Utf8Path;
use figment::Figment;
use figment::providers::Env;
#[cfg(any(feature = "json", feature = "toml"))]
use figment::providers::Format;
#[cfg(feature = "json")]
use figment::providers::Json;
#[cfg(feature = "toml")]
use figment::providers::Toml;
use tracing::debug;

use crate::error::{FactoryError, FactoryResult};
use crate::params::{DELIMITER, Params};

/// Extract the merged document of `figment` and flatten it.
///
/// # Errors
///
/// Returns [`FactoryError::Fixture`] when extraction fails or the document
/// is not a table.
pub fn fixture_params(figment: &Figment) -> FactoryResult<Params> {
    let document: serde_json::Value = figment.extract()?;
    flatten_document(&document)
}

/// Load a fixture file, choosing the format by extension (`.toml` or
/// `.json`).
///
/// # Errors
///
/// Returns [`FactoryError::Fixture`] when the file is missing, has an
/// unsupported extension, or does not parse.
pub fn load_fixture(path: &Utf8Path) -> FactoryResult<Params> {
    if !path.is_file() {
        return Err(FactoryError::fixture(format!(
            "fixture file '{path}' does not exist"
        )));
    }
    debug!(path = %path, "loading fixture");
    let figment = match path.extension() {
        #[cfg(feature = "toml")]
        Some("toml") => Figment::from(Toml::file(path)),
        #[cfg(feature = "json")]
        Some("json") => Figment::from(Json::file(path)),
        _ => {
            return Err(FactoryError::fixture(format!(
                "unsupported fixture format for '{path}'"
            )));
        }
    };
    fixture_params(&figment)
}

/// Read parameters from environment variables starting with `prefix`,
/// nesting on `__` (`FIX_BODY__0__CHAR_BLOCK=foo` becomes
/// `body__0__char_block`).
///
/// # Errors
///
/// Returns [`FactoryError::Fixture`] when extraction fails.
pub fn env_fixture(prefix: &str) -> FactoryResult<Params> {
    fixture_params(&Figment::from(Env::prefixed(prefix).split(DELIMITER)))
}
