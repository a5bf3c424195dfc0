//! Tree assembly for page records.

mod common;

use anyhow::{Result, anyhow, ensure};
use block_factories::models::{PageFactoryRegistry, page_factory};
use block_factories::{FactoryError, InMemoryStore, Record, Value, params};
use common::{record, testapp};
use rstest::{fixture, rstest};

#[fixture]
fn store() -> InMemoryStore {
    InMemoryStore::new()
}

fn slug(page: &Record) -> Option<&str> {
    page.field("slug").and_then(Value::as_str)
}

#[rstest]
fn parent_attributes_create_the_parent_first(mut store: InMemoryStore) -> Result<()> {
    let child = record(page_factory().create(
        &mut store,
        params! {
            "parent__slug" => "root",
            "parent__parent" => Value::Null,
            "slug" => "child",
        },
    )?)?;
    ensure!(slug(&child) == Some("child"));
    let parent = child.parent().ok_or_else(|| anyhow!("child has no parent"))?;
    ensure!(slug(parent) == Some("root"));
    ensure!(parent.parent().is_none());

    let child_id = child.id().ok_or_else(|| anyhow!("child was not persisted"))?;
    let stored_parent = store
        .parent_of(child_id)
        .ok_or_else(|| anyhow!("store lost the parent"))?;
    ensure!(slug(stored_parent) == Some("root"));
    ensure!(store.roots("page").len() == 1);
    ensure!(child.tree().is_some_and(|tree| tree.depth == 2));
    let root_id = stored_parent.id().ok_or_else(|| anyhow!("root has no id"))?;
    ensure!(store.get(root_id).and_then(Record::tree).is_some_and(|tree| tree.numchild == 1));
    ensure!(store.count_model("page") == 2);
    Ok(())
}

#[rstest]
fn existing_parents_are_attached(mut store: InMemoryStore) -> Result<()> {
    let root = record(page_factory().create(&mut store, params! { "parent" => Value::Null })?)?;
    let root_id = root.id().ok_or_else(|| anyhow!("root was not persisted"))?;
    for title in ["First", "Second"] {
        let _ = page_factory().create(&mut store, params! { "parent" => root.clone(), "title" => title })?;
    }
    let children = store.children_of(root_id);
    let slugs: Vec<_> = children.iter().filter_map(|page| slug(page)).collect();
    ensure!(slugs == ["first", "second"], "unexpected children {slugs:?}");
    let paths: Vec<_> = children
        .iter()
        .filter_map(|page| page.tree().map(|tree| tree.path.clone()))
        .collect();
    ensure!(paths == ["00010001", "00010002"], "unexpected paths {paths:?}");
    Ok(())
}

#[rstest]
fn instance_and_attributes_conflict_before_persisting(mut store: InMemoryStore) {
    let parent = Record::new("page");
    let err = page_factory()
        .create(
            &mut store,
            params! { "parent" => parent, "parent__title" => "other" },
        )
        .expect_err("conflicting parent");
    assert!(matches!(err, FactoryError::ParentConflict { .. }));
    assert_eq!(store.count(), 0);
}

#[rstest]
fn unsaved_parents_cannot_be_created_under(mut store: InMemoryStore) {
    let err = page_factory()
        .create(&mut store, params! { "parent" => Record::new("page") })
        .expect_err("unsaved parent");
    assert!(matches!(err, FactoryError::UnsavedParent { model } if model == "page"));
    assert_eq!(store.count(), 0);
}

#[rstest]
fn built_pages_keep_unsaved_parents() -> Result<()> {
    let parent = Record::new("page").with_field("slug", "draft");
    let child = record(page_factory().build(params! { "parent" => parent.clone() })?)?;
    ensure!(child.parent() == Some(&parent));
    ensure!(!child.is_persisted());
    Ok(())
}

#[rstest]
fn parents_can_come_from_another_factory(mut store: InMemoryStore) -> Result<()> {
    let event = record(testapp::event_page().create(
        &mut store,
        params! { "parent__parent" => Value::Null },
    )?)?;
    let parent = event.parent().ok_or_else(|| anyhow!("event has no parent"))?;
    ensure!(parent.model() == "page");
    ensure!(parent.field("title") == Some(&Value::from("Test page")));
    ensure!(event.tree().is_some_and(|tree| tree.depth == 2));
    Ok(())
}

#[rstest]
fn root_by_default_needs_no_parent(mut store: InMemoryStore) -> Result<()> {
    let home = record(testapp::home_page().create(&mut store, params! {})?)?;
    ensure!(home.parent().is_none());
    ensure!(home.tree().is_some_and(|tree| tree.path == "0001"));
    Ok(())
}

#[rstest]
fn non_record_parents_are_rejected() {
    let err = page_factory()
        .build(params! { "parent" => "home" })
        .expect_err("text parent");
    assert!(matches!(err, FactoryError::Validation { path, .. } if path == "parent"));
}

#[rstest]
fn registry_creates_one_root_per_autotest_factory(mut store: InMemoryStore) -> Result<()> {
    let mut registry = PageFactoryRegistry::with_builtin();
    registry.register(&testapp::blog_page(), true)?;
    registry.register(&testapp::event_page(), false)?;
    let pages = registry.create_autotest_pages(&mut store)?;
    let models: Vec<_> = pages.iter().map(Record::model).collect();
    ensure!(models == ["page", "blog_page"], "unexpected models {models:?}");
    ensure!(pages.iter().all(|page| page.tree().is_some_and(|tree| tree.depth == 1)));
    ensure!(registry.page_factories().count() == 3);
    Ok(())
}
