//! Tests for error rendering and conversions.

use rstest::rstest;

use super::FactoryError;
use crate::store::StoreError;
use crate::value::RecordId;

#[rstest]
#[case::duplicate(
    FactoryError::duplicate(0, "char_block", "struct_block"),
    "duplicate declaration for index 0: got struct_block, already have char_block"
)]
#[case::unknown_block(
    FactoryError::unknown_child_block("foo"),
    "No factory defined for block 'foo'"
)]
#[case::missing_index(
    FactoryError::missing_index(0),
    "invalid declaration: missing required index 0"
)]
#[case::store(
    FactoryError::store("page", StoreError::UnknownRecord { id: RecordId::new(99) }),
    "Failed to persist 'page': record #99 does not exist"
)]
fn errors_render_their_context(#[case] err: FactoryError, #[case] expected: &str) {
    assert_eq!(err.to_string(), expected);
}

#[test]
fn figment_errors_become_fixture_errors() {
    let err: FactoryError = figment::Error::from("bad document".to_owned()).into();
    assert!(matches!(err, FactoryError::Fixture(_)));
    assert!(err.to_string().contains("bad document"));
}

#[test]
fn store_errors_keep_their_source() {
    let err = FactoryError::store("page", StoreError::NotATreeNode { id: RecordId::new(3) });
    let source = std::error::Error::source(&err).map(ToString::to_string);
    assert!(source.is_some_and(|message| message.contains("#3")));
}
