//! Unit tests for the step builder and resolver.

use anyhow::{Result, ensure};
use rstest::rstest;

use super::FieldPath;
use crate::blocks::{AtomicBlock, StructBlockDef};
use crate::error::FactoryError;
use crate::factory::Factory;
use crate::params;
use crate::value::Value;

#[rstest]
#[case::root(FieldPath::root(), "page")]
#[case::nested(FieldPath::root().child("body").child(0).child("char_block"), "body.0.char_block")]
fn paths_render_dotted(#[case] path: FieldPath, #[case] expected: &str) {
    assert_eq!(path.describe("page"), expected);
}

#[test]
fn lazy_attributes_reading_each_other_are_cyclic() {
    let factory = Factory::structure("loop")
        .lazy_attribute("a", |resolver| resolver.get("b"))
        .lazy_attribute("b", |resolver| resolver.get("a"))
        .finish();
    let err = factory.build(params! {}).expect_err("cycle");
    assert!(
        matches!(&err, FactoryError::CyclicDeclaration { cycle } if cycle == "a -> b -> a"),
        "unexpected error {err:?}"
    );
}

#[test]
fn abstract_factories_refuse_to_build() {
    let factory = Factory::structure("base").mark_abstract().finish();
    let err = factory.build(params! {}).expect_err("abstract");
    assert_eq!(
        err.to_string(),
        "factory 'base' is abstract and cannot build values"
    );
}

#[test]
fn extended_factories_override_by_name_and_keep_order() -> Result<()> {
    let base = Factory::structure("base")
        .declare("title", "base title")
        .declare("count", 1)
        .mark_abstract()
        .finish();
    let child = Factory::extend("child", &base).declare("title", "child title").finish();
    let built = child.build(params! {})?;
    let value = built
        .as_struct()
        .ok_or_else(|| anyhow::anyhow!("expected a struct"))?;
    let names: Vec<_> = value.names().collect();
    ensure!(names == ["title", "count"], "unexpected order {names:?}");
    ensure!(value.get("title") == Some(&Value::from("child title")));
    Ok(())
}

#[test]
fn one_sequence_number_per_build() -> Result<()> {
    let factory = Factory::structure("numbered")
        .sequenced("a", Value::from)
        .sequenced("b", |n| Value::from(format!("item-{n}")))
        .finish();
    factory.sequence().reset_to(7);
    let first = factory.build(params! {})?;
    let second = factory.build(params! {})?;
    let field = |value: &Value, name: &str| value.as_struct().and_then(|s| s.get(name)).cloned();
    ensure!(field(&first, "a") == Some(Value::from(7_u32)));
    ensure!(field(&first, "b") == Some(Value::from("item-7")));
    ensure!(field(&second, "a") == Some(Value::from(8_u32)));
    Ok(())
}

#[test]
fn validation_errors_carry_the_field_path() {
    let item = Factory::leaf("char_block", AtomicBlock::char().max_length(3)).finish();
    let block = Factory::structure("holder")
        .block(StructBlockDef::named("holder").child("label", AtomicBlock::char().max_length(3)))
        .sub_factory("label", &item)
        .finish();
    let err = block
        .build(params! { "label" => "too long" })
        .expect_err("validation");
    assert_eq!(
        err.to_string(),
        "Validation failed for 'label': Ensure this value has at most 3 characters (it has 8)."
    );
}

#[test]
fn struct_blocks_only_emit_their_children() -> Result<()> {
    let factory = Factory::structure("titled")
        .block(StructBlockDef::named("titled").child("title", AtomicBlock::char()))
        .declare("prefix", "pre")
        .lazy_attribute("title", |resolver| {
            let prefix = resolver.get("prefix")?;
            Ok(Value::from(format!("{} title", prefix.as_str().unwrap_or_default())))
        })
        .finish();
    for (params, expected) in [
        (params! {}, "pre title"),
        (params! { "prefix" => "post" }, "post title"),
    ] {
        let built = factory.build(params)?;
        let value = built
            .as_struct()
            .ok_or_else(|| anyhow::anyhow!("expected a struct"))?;
        let names: Vec<_> = value.names().collect();
        ensure!(names == ["title"], "unexpected fields {names:?}");
        ensure!(value.get("title") == Some(&Value::from(expected)));
    }
    Ok(())
}

#[test]
fn explicit_nulls_fall_back_to_block_defaults() -> Result<()> {
    let factory = Factory::structure("counts")
        .block(
            StructBlockDef::named("counts")
                .child("undeclared", AtomicBlock::integer().with_default(3))
                .child("declared", AtomicBlock::integer().with_default(3)),
        )
        .declare("declared", 1)
        .finish();
    let built = factory.build(params! {
        "undeclared" => Value::Null,
        "declared" => Value::Null,
    })?;
    let value = built
        .as_struct()
        .ok_or_else(|| anyhow::anyhow!("expected a struct"))?;
    ensure!(value.get("undeclared") == Some(&Value::from(3)));
    ensure!(value.get("declared") == Some(&Value::from(3)));
    Ok(())
}
