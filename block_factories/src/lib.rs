//! Declarative fixture factories for CMS content trees.
//!
//! Factories turn flat, `__`-delimited keyword parameters into nested block
//! values (struct, list and stream blocks) and persisted records (pages,
//! collections, media assets). A call such as
//!
//! ```rust
//! use block_factories::{params, models};
//!
//! let page = models::page_factory()
//!     .build(params! { "parent" => None::<&str>, "title" => "About us" })
//!     .expect("page builds");
//! let record = page.as_record().expect("pages are records");
//! assert_eq!(record.field("slug").and_then(|v| v.as_str()), Some("about-us"));
//! ```
//!
//! resolves every declaration of the factory, recursing into nested
//! factories for compound blocks, and either returns the value in memory
//! ([`Strategy::Build`]) or persists it through a [`RecordStore`]
//! ([`Strategy::Create`]).

pub mod blocks;
mod builder;
pub mod declaration;
mod error;
pub mod factory;
pub mod fixtures;
pub mod hierarchy;
pub mod layering;
pub mod models;
mod params;
pub mod store;
pub mod value;

pub use builder::{FieldPath, Resolver, Strategy};
pub use error::{FactoryError, FactoryResult};
pub use factory::{
    Declaration, Factory, FactoryBuilder, FactoryKind, LazyAttributeFn, Sequence, SequenceFn,
    SubFactory,
};
pub use hierarchy::ParentDecl;
pub use layering::{Layer, LayerComposer, LayerProvenance};
pub use params::{DELIMITER, LazyFn, Param, Params};
pub use store::{InMemoryStore, RecordStore, StoreError};
pub use value::{Record, RecordId, StreamChild, StreamValue, StructValue, TreePosition, Value};

/// Re-export of `serde_json` so fixture documents can be written with
/// [`serde_json::json!`] without an extra dependency.
pub use serde_json;
