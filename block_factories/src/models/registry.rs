//! Registry of page factories for smoke testing.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{FactoryError, FactoryResult};
use crate::factory::Factory;
use crate::hierarchy::PARENT_FIELD;
use crate::params::Params;
use crate::store::RecordStore;
use crate::value::{Record, Value};

use super::page_factory;

/// A registered page factory.
#[derive(Clone, Debug)]
pub struct RegisteredPage {
    factory: Arc<Factory>,
    autotest: bool,
}

impl RegisteredPage {
    /// The page factory.
    #[must_use]
    pub const fn factory(&self) -> &Arc<Factory> {
        &self.factory
    }

    /// Whether smoke tests should create a page with this factory.
    #[must_use]
    pub const fn autotest(&self) -> bool {
        self.autotest
    }
}

/// Named collection of page factories.
///
/// ```rust
/// use block_factories::models::{PageFactoryRegistry, page_factory};
/// use block_factories::{Factory, InMemoryStore};
///
/// let mut registry = PageFactoryRegistry::with_builtin();
/// let landing = Factory::extend("landing_page", &page_factory())
///     .declare("title", "Landing")
///     .finish();
/// registry.register(&landing, true)?;
///
/// let mut store = InMemoryStore::new();
/// let pages = registry.create_autotest_pages(&mut store)?;
/// assert_eq!(pages.len(), 2);
/// assert_eq!(store.roots("page").len(), 2);
/// # Ok::<_, block_factories::FactoryError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct PageFactoryRegistry {
    entries: IndexMap<String, RegisteredPage>,
}

impl PageFactoryRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in [`page_factory`], marked for
    /// smoke testing.
    #[must_use]
    pub fn with_builtin() -> Self {
        let page = page_factory();
        let mut entries = IndexMap::new();
        entries.insert(
            page.name().to_owned(),
            RegisteredPage {
                factory: page,
                autotest: true,
            },
        );
        Self { entries }
    }

    /// Register a page factory under its name, replacing any previous
    /// registration.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::InvalidDeclaration`] when `factory` does not
    /// build tree records.
    pub fn register(&mut self, factory: &Arc<Factory>, autotest: bool) -> FactoryResult<()> {
        if factory.model().is_none() || factory.parent_decl().is_none() {
            return Err(FactoryError::invalid_declaration(
                factory.name(),
                "only tree record factories can be registered as page factories",
            ));
        }
        self.entries.insert(
            factory.name().to_owned(),
            RegisteredPage {
                factory: Arc::clone(factory),
                autotest,
            },
        );
        Ok(())
    }

    /// Look up a registration by factory name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RegisteredPage> {
        self.entries.get(name)
    }

    /// All registrations in registration order.
    pub fn page_factories(&self) -> impl Iterator<Item = &RegisteredPage> {
        self.entries.values()
    }

    /// Registrations marked for smoke testing.
    pub fn autotest_factories(&self) -> impl Iterator<Item = &Arc<Factory>> {
        self.entries
            .values()
            .filter(|entry| entry.autotest)
            .map(|entry| &entry.factory)
    }

    /// Create one root page per autotest factory.
    ///
    /// # Errors
    ///
    /// Stops at the first factory that fails to create.
    pub fn create_autotest_pages(&self, store: &mut dyn RecordStore) -> FactoryResult<Vec<Record>> {
        let mut pages = Vec::new();
        for factory in self.autotest_factories() {
            debug!(factory = factory.name(), "creating autotest page");
            let params = Params::new().with(PARENT_FIELD, Value::Null);
            let created = factory.create(&mut *store, params)?;
            if let Value::Record(record) = created {
                pages.push(record);
            }
        }
        Ok(pages)
    }
}
