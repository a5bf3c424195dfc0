//! Precedence of definition, call-site and call-time stream parameters.
//!
//! `stream_holder` reaches `defaulted_stream` with a call-site default for
//! the item's value; the stream's definition fills index 0 with a char
//! block and labels the item at index 1.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, ensure};
use block_factories::{Factory, FactoryError, Param, Params, Value, params};
use common::{item, stream, structure, testapp};
use rstest::rstest;

fn body(params: Params) -> Result<Vec<(String, Value)>> {
    let built = testapp::stream_holder().build(params)?;
    let holder = structure(&built)?;
    let body = holder
        .get("body")
        .ok_or_else(|| anyhow::anyhow!("holder has no body"))?;
    Ok(stream(body)?
        .iter()
        .map(|child| (child.block_type().to_owned(), child.value().clone()))
        .collect())
}

fn entry(branch: &str, value: Value) -> (String, Value) {
    (branch.to_owned(), value)
}

#[rstest]
#[case::layers_merge(
    params! {},
    vec![
        entry("char_block", Value::from("definition")),
        entry("struct_block", item("definition label", 7)),
    ]
)]
#[case::call_time_value_wins(
    params! { "body__0__char_block" => "call" },
    vec![
        entry("char_block", Value::from("call")),
        entry("struct_block", item("definition label", 7)),
    ]
)]
#[case::other_branch_replaces(
    params! { "body__0" => "struct_block" },
    vec![
        entry("struct_block", item("my-label", 100)),
        entry("struct_block", item("definition label", 7)),
    ]
)]
#[case::same_branch_marker_keeps_content(
    params! { "body__0" => "char_block" },
    vec![
        entry("char_block", Value::from("definition")),
        entry("struct_block", item("definition label", 7)),
    ]
)]
#[case::nested_groups_stack(
    params! { "body__1__struct_block__label" => "call" },
    vec![
        entry("char_block", Value::from("definition")),
        entry("struct_block", item("call", 7)),
    ]
)]
#[case::call_time_beats_call_site(
    params! { "body__1__struct_block__value" => 9 },
    vec![
        entry("char_block", Value::from("definition")),
        entry("struct_block", item("definition label", 9)),
    ]
)]
#[case::new_indices_append(
    params! { "body__2__char_block" => "extra" },
    vec![
        entry("char_block", Value::from("definition")),
        entry("struct_block", item("definition label", 7)),
        entry("char_block", Value::from("extra")),
    ]
)]
fn stream_parameters_layer_by_index(
    #[case] params: Params,
    #[case] expected: Vec<(String, Value)>,
) -> Result<()> {
    let got = body(params)?;
    ensure!(got == expected, "unexpected body {got:?}");
    Ok(())
}

#[rstest]
fn gaps_are_checked_after_merging() {
    let err = testapp::stream_holder()
        .build(params! { "body__3__char_block" => "gap" })
        .expect_err("index 2 is missing");
    assert!(matches!(err, FactoryError::MissingIndex { index: 2 }));
}

#[rstest]
fn definition_defaults_apply_to_records() -> Result<()> {
    let built = testapp::blog_page().build(params! {
        "parent" => Value::Null,
        "body__1__struct_block__label" => "second",
    })?;
    let page = common::record(built)?;
    let body = page
        .field("body")
        .ok_or_else(|| anyhow::anyhow!("page has no body"))?;
    let entries = stream(body)?;
    ensure!(entries.block_types() == ["char_block", "struct_block"]);
    ensure!(entries.get(0).map(|child| child.value()) == Some(&Value::from("intro")));
    ensure!(entries.get(1).map(|child| child.value()) == Some(&item("second", 100)));
    Ok(())
}

/// Lazy parameter counting how often it is evaluated.
fn counted(calls: &Arc<AtomicUsize>, value: &'static str) -> Param {
    let counter = Arc::clone(calls);
    Param::lazy(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Value::from(value)
    })
}

/// Item stream whose definition fills index 0 lazily.
fn lazily_defaulted_stream(calls: &Arc<AtomicUsize>) -> Arc<Factory> {
    Factory::extend("lazily_defaulted_stream", &testapp::my_stream())
        .defaults(params! { "0__char_block" => counted(calls, "lazy") })
        .finish()
}

fn first_value(built: &Value) -> Result<Option<Value>> {
    Ok(stream(built)?.get(0).map(|child| child.value().clone()))
}

#[rstest]
fn lazy_definition_defaults_run_once_per_build() -> Result<()> {
    let calls = Arc::new(AtomicUsize::new(0));
    let factory = lazily_defaulted_stream(&calls);
    ensure!(calls.load(Ordering::SeqCst) == 0, "evaluated at definition time");
    for expected in 1..=2 {
        let built = factory.build(params! {})?;
        ensure!(first_value(&built)? == Some(Value::from("lazy")));
        ensure!(calls.load(Ordering::SeqCst) == expected);
    }
    Ok(())
}

#[rstest]
fn overridden_lazy_definition_defaults_never_run() -> Result<()> {
    let calls = Arc::new(AtomicUsize::new(0));
    let factory = lazily_defaulted_stream(&calls);

    let called = factory.build(params! { "0__char_block" => "call" })?;
    ensure!(first_value(&called)? == Some(Value::from("call")));

    let holder = Factory::structure("lazy_holder")
        .sub_factory_with("body", &factory, params! { "0__char_block" => "site" })
        .finish();
    let built = holder.build(params! {})?;
    let body = structure(&built)?
        .get("body")
        .ok_or_else(|| anyhow::anyhow!("holder has no body"))?;
    ensure!(first_value(body)? == Some(Value::from("site")));
    ensure!(calls.load(Ordering::SeqCst) == 0);
    Ok(())
}

#[rstest]
fn lazy_call_site_defaults_run_at_resolution() -> Result<()> {
    let calls = Arc::new(AtomicUsize::new(0));
    let holder = Factory::structure("lazy_site_holder")
        .sub_factory_with(
            "body",
            &testapp::my_stream(),
            params! { "0__char_block" => counted(&calls, "site") },
        )
        .finish();
    ensure!(calls.load(Ordering::SeqCst) == 0);
    let defaulted = holder.build(params! {})?;
    let body = structure(&defaulted)?
        .get("body")
        .ok_or_else(|| anyhow::anyhow!("holder has no body"))?;
    ensure!(first_value(body)? == Some(Value::from("site")));
    ensure!(calls.load(Ordering::SeqCst) == 1);
    holder.build(params! { "body__0__char_block" => "call" })?;
    ensure!(calls.load(Ordering::SeqCst) == 1);
    Ok(())
}

#[rstest]
#[case::call_site_beats_definition(params! {}, 7)]
#[case::call_time_beats_both(params! { "body__1__struct_block__value" => 9 }, 9)]
fn call_site_and_definition_defaults_on_one_key(
    #[case] params: Params,
    #[case] expected: i64,
) -> Result<()> {
    let stream_factory = Factory::extend("valued_stream", &testapp::defaulted_stream())
        .defaults(params! { "1__struct_block__value" => 1 })
        .finish();
    let holder = Factory::structure("valued_holder")
        .sub_factory_with(
            "body",
            &stream_factory,
            params! { "1__struct_block__value" => 7 },
        )
        .finish();
    let definition_only = stream_factory.build(params! {})?;
    ensure!(
        stream(&definition_only)?.get(1).map(|child| child.value())
            == Some(&item("definition label", 1))
    );
    let built = holder.build(params)?;
    let body = structure(&built)?
        .get("body")
        .ok_or_else(|| anyhow::anyhow!("holder has no body"))?;
    ensure!(
        stream(body)?.get(1).map(|child| child.value())
            == Some(&item("definition label", expected))
    );
    Ok(())
}
