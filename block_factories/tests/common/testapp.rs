//! Block and page factories of the test application.

use std::sync::Arc;

use block_factories::blocks::{
    AtomicBlock, ChooserBlock, ListBlockDef, StreamBlockDef, StructBlockDef,
};
use block_factories::models::{char_block_factory, image_chooser_block_factory};
use block_factories::{Factory, ParentDecl, Value, params};

pub fn my_block_item_def() -> StructBlockDef {
    StructBlockDef::named("my_block_item")
        .child("label", AtomicBlock::char())
        .child("value", AtomicBlock::integer())
}

pub fn my_block_def() -> StructBlockDef {
    StructBlockDef::named("my_block")
        .child("title", AtomicBlock::char().max_length(255))
        .child("item", my_block_item_def())
        .child("items", ListBlockDef::of(my_block_item_def()))
        .child("image", ChooserBlock::new("image").required(false))
}

/// Item with `label = "my-label"` and `value = 100`.
pub fn my_block_item() -> Arc<Factory> {
    Factory::structure("my_block_item")
        .block(my_block_item_def())
        .declare("label", "my-label")
        .declare("value", 100)
        .finish()
}

/// Struct with a title, one nested item, a list of items and an image
/// chooser building a fresh image.
pub fn my_block() -> Arc<Factory> {
    let item = my_block_item();
    Factory::structure("my_block")
        .block(my_block_def())
        .declare("title", "my title")
        .sub_factory("item", &item)
        .sub_factory("items", &Factory::list("items", &item).finish())
        .sub_factory("image", &image_chooser_block_factory())
        .finish()
}

/// Struct whose title is computed from its label.
pub fn struct_with_lazy_attribute() -> Arc<Factory> {
    Factory::structure("struct_block_with_lazy_attr")
        .block(
            StructBlockDef::named("struct_block_with_lazy_attr")
                .child("label", AtomicBlock::char())
                .child("title", AtomicBlock::char()),
        )
        .declare("label", "foobar")
        .lazy_attribute("title", |resolver| {
            let label = resolver.get("label")?;
            Ok(Value::from(format!(
                "lazy function {}",
                label.as_str().unwrap_or_default()
            )))
        })
        .finish()
}

pub fn my_stream_def() -> StreamBlockDef {
    StreamBlockDef::named("my_stream_block")
        .child("struct_block", my_block_item_def())
        .child("char_block", AtomicBlock::char().max_length(10))
}

/// Stream with an item branch and a char branch.
pub fn my_stream() -> Arc<Factory> {
    Factory::stream("my_stream_block")
        .block(my_stream_def())
        .sub_factory("struct_block", &my_block_item())
        .sub_factory("char_block", &char_block_factory())
        .finish()
}

/// Stream whose struct branch is the full [`my_block`].
pub fn content_stream() -> Arc<Factory> {
    Factory::stream("content_stream")
        .block(
            StreamBlockDef::named("content_stream")
                .child("char_block", AtomicBlock::char())
                .child("struct_block", my_block_def()),
        )
        .sub_factory("char_block", &char_block_factory())
        .sub_factory("struct_block", &my_block())
        .finish()
}

/// Stream whose definition already fills index 0 with a char block and
/// index 1 with a labelled item.
pub fn defaulted_stream() -> Arc<Factory> {
    Factory::extend("defaulted_stream", &my_stream())
        .defaults(params! {
            "0__char_block" => "definition",
            "1__struct_block__label" => "definition label",
        })
        .finish()
}

/// Struct holding [`defaulted_stream`] with a call-site default for the
/// item's value.
pub fn stream_holder() -> Arc<Factory> {
    Factory::structure("stream_holder")
        .sub_factory_with(
            "body",
            &defaulted_stream(),
            params! { "1__struct_block__value" => 7 },
        )
        .finish()
}

/// Stream nesting an inline struct block and an inline stream block.
///
/// The nested factories carry no block definitions of their own; the
/// definitions reach them from this stream's block.
pub fn outer_stream() -> Arc<Factory> {
    let section = Factory::structure("section")
        .declare("heading", "Section")
        .finish();
    let inner = Factory::stream("inner")
        .sub_factory("char_block", &char_block_factory())
        .finish();
    Factory::stream("outer")
        .block(
            StreamBlockDef::anonymous()
                .child(
                    "section",
                    StructBlockDef::named("section_block")
                        .child("heading", AtomicBlock::char().max_length(10)),
                )
                .child(
                    "inner",
                    StreamBlockDef::anonymous().child("char_block", AtomicBlock::char()),
                ),
        )
        .sub_factory("section", &section)
        .sub_factory("inner", &inner)
        .finish()
}

/// Stream whose char blocks are numbered by the leaf factory's sequence and
/// whose `stamp` branch is computed lazily.
pub fn numbered_stream() -> Arc<Factory> {
    let numbered = Factory::leaf("numbered_char_block", AtomicBlock::char())
        .sequenced("value", |n| Value::from(format!("block {n}")))
        .finish();
    Factory::stream("numbered_stream")
        .sub_factory("char_block", &numbered)
        .lazy("stamp", || Value::from("2024-01-01"))
        .finish()
}

/// Page type with a stream body and an introduction in its definition
/// defaults.
pub fn blog_page() -> Arc<Factory> {
    Factory::record("blog_page", "blog_page")
        .parent(ParentDecl::new())
        .declare("title", "Blog page")
        .sub_factory("body", &my_stream())
        .defaults(params! { "body__0__char_block" => "intro" })
        .finish()
}

/// Page type whose parents are built as plain pages.
pub fn event_page() -> Arc<Factory> {
    Factory::record("event_page", "event_page")
        .parent(ParentDecl::new().built_by(&block_factories::models::page_factory()))
        .declare("title", "Event")
        .finish()
}

/// Page type that becomes a root when no parent is given.
pub fn home_page() -> Arc<Factory> {
    Factory::record("home_page", "home_page")
        .parent(ParentDecl::new().root_by_default())
        .declare("title", "Home")
        .finish()
}
