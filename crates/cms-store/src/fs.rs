//! File-backed page store.
//!
//! Persists the whole page table as one JSON file of [`PageRow`]s. Rows are
//! loaded eagerly at construction and the file is rewritten atomically
//! (write-then-rename) after every mutation.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::debug;

use crate::error::{StoreError, StoreErrorKind};
use crate::page::{Page, PageRow};
use crate::rows::RowTable;
use crate::store::{PageOrder, PageStore};

/// JSON-file page store.
///
/// A missing file is treated as an empty store; the file is created on the
/// first mutation.
#[derive(Debug)]
pub struct JsonPageStore {
    path: PathBuf,
    table: RwLock<RowTable>,
}

impl JsonPageStore {
    /// Open a store at `path`, loading existing rows if the file exists.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the file exists but cannot be read, or an
    /// `InvalidData` error when it cannot be decoded.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let rows = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str::<Vec<PageRow>>(&raw).map_err(|err| {
                StoreError::new(StoreErrorKind::InvalidData)
                    .with_detail(path.display().to_string())
                    .with_source(err)
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                return Err(StoreError::io(err).with_detail(path.display().to_string()));
            }
        };
        debug!(path = %path.display(), pages = rows.len(), "opened page store");
        Ok(Self {
            path,
            table: RwLock::new(RowTable::new(rows)),
        })
    }

    /// Rewrite the backing file from the given table snapshot.
    fn persist(&self, table: &RowTable) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(table.rows()).map_err(|err| {
            StoreError::new(StoreErrorKind::InvalidData).with_source(err)
        })?;

        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json)
            .map_err(|err| StoreError::io(err).with_detail(tmp.display().to_string()))?;
        std::fs::rename(&tmp, &self.path)
            .map_err(|err| StoreError::io(err).with_detail(self.path.display().to_string()))?;
        Ok(())
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PageStore for JsonPageStore {
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
        let mut table = self.table.write().unwrap();
        table.save(page)?;
        self.persist(&table)
    }

    fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut table = self.table.write().unwrap();
        table.delete(id)?;
        self.persist(&table)
    }
}
