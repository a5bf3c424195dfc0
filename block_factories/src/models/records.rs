//! Record factories for pages, collections, media and sites.

use std::sync::{Arc, LazyLock};

use camino::Utf8PathBuf;

use crate::factory::Factory;
use crate::hierarchy::ParentDecl;
use crate::params;
use crate::value::Value;

static COLLECTION: LazyLock<Arc<Factory>> = LazyLock::new(|| {
    Factory::record("collection", "collection")
        .parent(ParentDecl::new())
        .declare("name", "Test collection")
        .finish()
});

static PAGE: LazyLock<Arc<Factory>> = LazyLock::new(|| {
    Factory::record("page", "page")
        .parent(ParentDecl::new())
        .declare("title", "Test page")
        .lazy_attribute("slug", |resolver| {
            let title = resolver.get("title")?;
            Ok(Value::from(slugify(title.as_str().unwrap_or_default())))
        })
        .finish()
});

static IMAGE: LazyLock<Arc<Factory>> = LazyLock::new(|| {
    Factory::record("image", "image")
        .declare("title", "An image")
        .sub_factory_with(
            "collection",
            &collection_factory(),
            params! { "parent" => None::<&str> },
        )
        .sequenced("file", |n| media_file("original_images", &format!("example_{n}.jpg")))
        .declare("width", 640)
        .declare("height", 480)
        .finish()
});

static DOCUMENT: LazyLock<Arc<Factory>> = LazyLock::new(|| {
    Factory::record("document", "document")
        .declare("title", "A document")
        .sub_factory_with(
            "collection",
            &collection_factory(),
            params! { "parent" => None::<&str> },
        )
        .sequenced("file", |n| media_file("documents", &format!("example_{n}.pdf")))
        .finish()
});

static SITE: LazyLock<Arc<Factory>> = LazyLock::new(|| {
    Factory::record("site", "site")
        .declare("hostname", "localhost")
        .declare("port", 80)
        .sub_factory_with("root_page", &page_factory(), params! { "parent" => None::<&str> })
        .declare("is_default_site", false)
        .finish()
});

fn media_file(directory: &str, name: &str) -> Value {
    Value::from(Utf8PathBuf::from(directory).join(name).into_string())
}

/// Lower-case `text`, replacing runs of other characters with single
/// hyphens.
///
/// ```rust
/// use block_factories::models::slugify;
///
/// assert_eq!(slugify("Test page"), "test-page");
/// assert_eq!(slugify("  Hello, World!  "), "hello-world");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Tree of collections. The parent must be given explicitly.
#[must_use]
pub fn collection_factory() -> Arc<Factory> {
    Arc::clone(&COLLECTION)
}

/// Tree of pages titled "Test page", with the slug derived from the title.
/// The parent must be given explicitly.
#[must_use]
pub fn page_factory() -> Arc<Factory> {
    Arc::clone(&PAGE)
}

/// Image in a fresh root collection, 640x480.
#[must_use]
pub fn image_factory() -> Arc<Factory> {
    Arc::clone(&IMAGE)
}

/// Document in a fresh root collection.
#[must_use]
pub fn document_factory() -> Arc<Factory> {
    Arc::clone(&DOCUMENT)
}

/// Site served from `localhost:80` with a fresh root page.
#[must_use]
pub fn site_factory() -> Arc<Factory> {
    Arc::clone(&SITE)
}
