//! In-memory page store for tests and embedding.

use std::sync::RwLock;

use crate::error::StoreError;
use crate::page::{Page, PageRow};
use crate::rows::RowTable;
use crate::store::{PageOrder, PageStore};

/// In-memory page store.
///
/// Rows are held in the persisted [`PageRow`] shape, so the delimited
/// crumb-list codec is exercised on every save and load exactly as it is by
/// the file-backed store. Use the builder method to seed test data.
///
/// # Example
///
/// ```
/// use cms_store::{MemoryPageStore, Page, PageStore};
///
/// let store = MemoryPageStore::new().with_page(Page {
///     title: "About".to_owned(),
///     alias: "about".to_owned(),
///     crumb_label: "About".to_owned(),
///     content: "<p>About us</p>".to_owned(),
///     ..Page::default()
/// });
///
/// let page = store.find_by_id(1).unwrap().unwrap();
/// assert_eq!(page.alias, "about");
/// ```
#[derive(Debug, Default)]
pub struct MemoryPageStore {
    table: RwLock<RowTable>,
}

impl MemoryPageStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a page, assigning the next free id when `page.id` is 0. A page
    /// with an explicit id is inserted as-is.
    ///
    /// # Panics
    ///
    /// Panics on alias collision or a poisoned lock; intended for test setup.
    #[must_use]
    pub fn with_page(self, mut page: Page) -> Self {
        {
            let mut table = self.table.write().unwrap();
            if page.id == 0 {
                table.save(&mut page).expect("seed page must not collide");
            } else {
                table.seed(&page);
            }
        }
        self
    }

    /// Snapshot of the persisted rows, delimited crumb strings included.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn rows(&self) -> Vec<PageRow> {
        self.table.read().unwrap().rows().to_vec()
    }
}

impl PageStore for MemoryPageStore {
    fn find_by_id(&self, id: i64) -> Result<Option<Page>, StoreError> {
        Ok(self.table.read().unwrap().find_by_id(id))
    }

    fn find_all(&self, order: PageOrder) -> Result<Vec<Page>, StoreError> {
        Ok(self.table.read().unwrap().find_all(order))
    }

    fn alias_in_use(&self, alias: &str, exclude_id: Option<i64>) -> Result<bool, StoreError> {
        Ok(self.table.read().unwrap().alias_in_use(alias, exclude_id))
    }

    fn save(&self, page: &mut Page) -> Result<(), StoreError> {
        self.table.write().unwrap().save(page)
    }

    fn delete(&self, id: i64) -> Result<(), StoreError> {
        self.table.write().unwrap().delete(id)
    }
}
