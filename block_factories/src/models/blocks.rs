//! Leaf and chooser block factories.

use std::sync::{Arc, LazyLock};

use crate::blocks::{AtomicBlock, ChooserBlock};
use crate::factory::Factory;
use crate::params;

use super::records::{document_factory, image_factory, page_factory};

static CHAR_BLOCK: LazyLock<Arc<Factory>> =
    LazyLock::new(|| Factory::leaf("char_block", AtomicBlock::char()).finish());
static TEXT_BLOCK: LazyLock<Arc<Factory>> =
    LazyLock::new(|| Factory::leaf("text_block", AtomicBlock::text()).finish());
static INTEGER_BLOCK: LazyLock<Arc<Factory>> =
    LazyLock::new(|| Factory::leaf("integer_block", AtomicBlock::integer()).finish());
static FLOAT_BLOCK: LazyLock<Arc<Factory>> =
    LazyLock::new(|| Factory::leaf("float_block", AtomicBlock::float()).finish());
static BOOLEAN_BLOCK: LazyLock<Arc<Factory>> =
    LazyLock::new(|| Factory::leaf("boolean_block", AtomicBlock::boolean()).finish());

static IMAGE_CHOOSER_BLOCK: LazyLock<Arc<Factory>> = LazyLock::new(|| {
    Factory::chooser("image_chooser_block", "image", ChooserBlock::new("image"))
        .sub_factory("image", &image_factory())
        .finish()
});

static PAGE_CHOOSER_BLOCK: LazyLock<Arc<Factory>> = LazyLock::new(|| {
    Factory::chooser("page_chooser_block", "page", ChooserBlock::new("page"))
        .sub_factory_with("page", &page_factory(), params! { "parent" => None::<&str> })
        .finish()
});

static DOCUMENT_CHOOSER_BLOCK: LazyLock<Arc<Factory>> = LazyLock::new(|| {
    Factory::chooser(
        "document_chooser_block",
        "document",
        ChooserBlock::new("document"),
    )
    .sub_factory("document", &document_factory())
    .finish()
});

/// Single-line text block.
#[must_use]
pub fn char_block_factory() -> Arc<Factory> {
    Arc::clone(&CHAR_BLOCK)
}

/// Multi-line text block.
#[must_use]
pub fn text_block_factory() -> Arc<Factory> {
    Arc::clone(&TEXT_BLOCK)
}

/// Whole number block.
#[must_use]
pub fn integer_block_factory() -> Arc<Factory> {
    Arc::clone(&INTEGER_BLOCK)
}

/// Floating point block.
#[must_use]
pub fn float_block_factory() -> Arc<Factory> {
    Arc::clone(&FLOAT_BLOCK)
}

/// Boolean block.
#[must_use]
pub fn boolean_block_factory() -> Arc<Factory> {
    Arc::clone(&BOOLEAN_BLOCK)
}

/// Image chooser building a fresh image unless one is passed.
#[must_use]
pub fn image_chooser_block_factory() -> Arc<Factory> {
    Arc::clone(&IMAGE_CHOOSER_BLOCK)
}

/// Page chooser building a fresh root page unless one is passed.
#[must_use]
pub fn page_chooser_block_factory() -> Arc<Factory> {
    Arc::clone(&PAGE_CHOOSER_BLOCK)
}

/// Document chooser building a fresh document unless one is passed.
#[must_use]
pub fn document_chooser_block_factory() -> Arc<Factory> {
    Arc::clone(&DOCUMENT_CHOOSER_BLOCK)
}
