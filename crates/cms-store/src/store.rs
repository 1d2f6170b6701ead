//! The [`PageStore`] trait.

use crate::error::StoreError;
use crate::page::Page;

/// Ordering for [`PageStore::find_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOrder {
    /// Ascending by title.
    Title,
    /// Ascending by the manual ordering weight, ties by id.
    Ordering,
}

/// Storage abstraction for page records.
///
/// Backends own the legacy delimited crumb-list format: pages handed out by
/// `find_*` always carry materialized `Vec<i64>` lists, and `save` encodes
/// them back. Alias uniqueness is enforced atomically inside `save`.
pub trait PageStore: Send + Sync {
    /// Look up a page by id. `Ok(None)` when absent.
    fn find_by_id(&self, id: i64) -> Result<Option<Page>, StoreError>;

    /// Return all pages in the requested order.
    fn find_all(&self, order: PageOrder) -> Result<Vec<Page>, StoreError>;

    /// Check whether an alias is taken by a page other than `exclude_id`.
    fn alias_in_use(&self, alias: &str, exclude_id: Option<i64>) -> Result<bool, StoreError>;

    /// Insert or update a page.
    ///
    /// Inserts assign a fresh id into `page.id`. Updates require an existing
    /// record.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreErrorKind::DuplicateAlias`](crate::StoreErrorKind::DuplicateAlias)
    /// error when the alias collides with another page, and
    /// [`StoreErrorKind::NotFound`](crate::StoreErrorKind::NotFound) when
    /// updating a missing id.
    fn save(&self, page: &mut Page) -> Result<(), StoreError>;

    /// Delete a page by id.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreErrorKind::NotFound`](crate::StoreErrorKind::NotFound)
    /// error when the id does not exist.
    fn delete(&self, id: i64) -> Result<(), StoreError>;
}
