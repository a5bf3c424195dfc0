//! Struct and list block factories.

mod common;

use anyhow::{Result, ensure};
use block_factories::{FactoryError, Value, params};
use common::{item, structure, testapp};
use rstest::rstest;

#[rstest]
fn nested_fields_and_empty_lists() -> Result<()> {
    let built = testapp::my_block().build(params! {
        "title" => "x",
        "item__value" => 5,
    })?;
    let value = structure(&built)?;
    ensure!(value.block_type() == Some("my_block"));
    ensure!(value.get("title") == Some(&Value::from("x")));
    ensure!(value.get("item") == Some(&item("my-label", 5)));
    ensure!(value.get("items") == Some(&Value::List(Vec::new())));
    ensure!(
        value
            .get("image")
            .and_then(Value::as_record)
            .is_some_and(|image| image.model() == "image")
    );
    Ok(())
}

#[rstest]
fn list_elements_take_values_and_nested_parameters() -> Result<()> {
    let built = testapp::my_block().build(params! {
        "items__0__label" => "a",
        "items__1__value" => 3,
    })?;
    let items = structure(&built)?
        .get("items")
        .and_then(Value::as_list)
        .map(<[Value]>::to_vec);
    ensure!(items == Some(vec![item("a", 100), item("my-label", 3)]));
    Ok(())
}

#[rstest]
fn lazy_attributes_read_siblings() -> Result<()> {
    let factory = testapp::struct_with_lazy_attribute();
    let defaults = factory.build(params! {})?;
    ensure!(structure(&defaults)?.get("title") == Some(&Value::from("lazy function foobar")));
    let relabelled = factory.build(params! { "label" => "baz" })?;
    ensure!(structure(&relabelled)?.get("title") == Some(&Value::from("lazy function baz")));
    Ok(())
}

#[rstest]
#[case::bad_integer(params! { "item__value" => "abc" }, "item.value", "Enter a whole number.")]
#[case::bad_list_element(
    params! { "items__0__value" => "x" },
    "items.0.value",
    "Enter a whole number."
)]
fn validation_errors_name_the_field(
    #[case] params: block_factories::Params,
    #[case] path: &str,
    #[case] message: &str,
) {
    let err = testapp::my_block().build(params).expect_err("validation");
    match err {
        FactoryError::Validation {
            path: got_path,
            message: got_message,
        } => {
            assert_eq!(got_path, path);
            assert_eq!(got_message, message);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
fn unknown_fields_are_rejected() {
    let err = testapp::my_block()
        .build(params! { "nope" => 1 })
        .expect_err("unknown field");
    assert!(matches!(err, FactoryError::UnknownChildBlock { name } if name == "nope"));
}
