//! Splitting of flat parameter keys into path segments.

use crate::error::{FactoryError, FactoryResult};
use crate::params::DELIMITER;

/// Split `segment` (a suffix of `key`) into its first segment and the rest.
///
/// Errors name the full `key` so callers see the parameter they passed.
pub(super) fn split<'k>(key: &str, segment: &'k str) -> FactoryResult<(&'k str, Option<&'k str>)> {
    let (head, rest) = segment
        .split_once(DELIMITER)
        .map_or((segment, None), |(head, rest)| (head, Some(rest)));
    if head.is_empty() || rest.is_some_and(str::is_empty) {
        return Err(FactoryError::invalid_declaration(key, "empty path segment"));
    }
    Ok((head, rest))
}

/// Parse an ordinal segment.
pub(super) fn index(key: &str, segment: &str) -> FactoryResult<usize> {
    if !segment.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(FactoryError::invalid_declaration(
            key,
            format!("expected a numeric index, got '{segment}'"),
        ));
    }
    segment
        .parse()
        .map_err(|_| FactoryError::invalid_declaration(key, "index out of range"))
}
