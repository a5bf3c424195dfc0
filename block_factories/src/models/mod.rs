//! Built-in factories for common block and record types.
//!
//! Each constructor returns a shared handle to a process-wide definition, so
//! sequence counters keep counting across calls until reset.

mod blocks;
mod records;
mod registry;

pub use blocks::{
    boolean_block_factory, char_block_factory, document_chooser_block_factory,
    float_block_factory, image_chooser_block_factory, integer_block_factory,
    page_chooser_block_factory, text_block_factory,
};
pub use records::{
    collection_factory, document_factory, image_factory, page_factory, site_factory, slugify,
};
pub use registry::{PageFactoryRegistry, RegisteredPage};
