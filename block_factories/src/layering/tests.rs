//! Unit tests for cross-layer merging.

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;

use super::{Layer, compose_list, compose_stream};
use crate::declaration::SlotInput;
use crate::error::FactoryError;
use crate::params;
use crate::params::Param;
use crate::value::Value;

fn any_block(name: &str) -> bool {
    name.ends_with("_block")
}

fn literal(input: &SlotInput) -> Option<Value> {
    match input {
        SlotInput::Value(Param::Value(value)) => Some(value.clone()),
        _ => None,
    }
}

#[test]
fn higher_layers_fill_and_override_ordinals() -> Result<()> {
    let layers = [
        Layer::definition(params! {
            "0__char_block" => "meta default text",
            "1__struct_block__title" => "struct block title",
        }),
        Layer::call_site(params! { "0__char_block" => "overridden text" }),
    ];
    let shape = compose_stream(&layers, any_block)?;
    let first = shape.get(0).ok_or_else(|| anyhow!("missing ordinal 0"))?;
    ensure!(literal(first.input()) == Some(Value::from("overridden text")));
    let second = shape.get(1).ok_or_else(|| anyhow!("missing ordinal 1"))?;
    let SlotInput::Nested(nested) = second.input() else {
        anyhow::bail!("definition-level nested group should survive");
    };
    ensure!(nested.len() == 1);
    Ok(())
}

#[test]
fn nested_groups_stack_across_layers() -> Result<()> {
    let layers = [
        Layer::call_site(params! { "0__struct_block__title" => "site" }),
        Layer::call_time(params! { "0__struct_block__item__value" => 5 }),
    ];
    let shape = compose_stream(&layers, any_block)?;
    let slot = shape.get(0).ok_or_else(|| anyhow!("missing ordinal 0"))?;
    let SlotInput::Nested(nested) = slot.input() else {
        anyhow::bail!("expected nested input");
    };
    ensure!(nested.len() == 2, "both layers should be forwarded");
    Ok(())
}

#[test]
fn marker_in_higher_layer_keeps_lower_content() -> Result<()> {
    let layers = [
        Layer::definition(params! { "0__char_block" => "kept" }),
        Layer::call_time(params! { "0" => "char_block" }),
    ];
    let shape = compose_stream(&layers, any_block)?;
    let slot = shape.get(0).ok_or_else(|| anyhow!("missing ordinal 0"))?;
    ensure!(literal(slot.input()) == Some(Value::from("kept")));
    Ok(())
}

#[test]
fn different_branch_in_higher_layer_replaces_binding() -> Result<()> {
    let layers = [
        Layer::definition(params! { "0__struct_block__title" => "lower" }),
        Layer::call_time(params! { "0__char_block" => "upper" }),
    ];
    let shape = compose_stream(&layers, any_block)?;
    let slot = shape.get(0).ok_or_else(|| anyhow!("missing ordinal 0"))?;
    ensure!(slot.branch() == "char_block");
    ensure!(literal(slot.input()) == Some(Value::from("upper")));
    Ok(())
}

#[rstest]
#[case::gap_at_start(&["1", "3"], 0)]
#[case::gap_in_middle(&["0", "2"], 1)]
fn gaps_report_first_missing_ordinal(#[case] indices: &[&str], #[case] missing: usize) {
    let params = indices
        .iter()
        .map(|index| ((*index).to_owned(), Value::from("char_block")))
        .collect();
    let err = compose_stream(&[Layer::call_time(params)], any_block).expect_err("gap");
    assert!(matches!(err, FactoryError::MissingIndex { index } if index == missing));
}

#[test]
fn gaps_may_be_filled_by_another_layer() -> Result<()> {
    let layers = [
        Layer::definition(params! { "0" => "x" }),
        Layer::call_time(params! { "1" => "y" }),
    ];
    let shape = compose_list(&layers)?;
    ensure!(shape.len() == 2);
    Ok(())
}

#[test]
fn empty_layers_produce_empty_shapes() -> Result<()> {
    let shape = compose_stream(&[], any_block)?;
    ensure!(shape.is_empty());
    Ok(())
}
