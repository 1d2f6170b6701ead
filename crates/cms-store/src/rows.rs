//! Shared row-table logic for the bundled backends.

use crate::error::StoreError;
use crate::page::{Page, PageRow};
use crate::store::PageOrder;

/// Plain table of persisted rows.
///
/// Both bundled backends keep their rows in one of these behind a lock, so
/// alias-uniqueness checks and id assignment happen atomically with the
/// mutation itself.
#[derive(Debug, Default)]
pub(crate) struct RowTable {
    rows: Vec<PageRow>,
}

impl RowTable {
    pub(crate) fn new(rows: Vec<PageRow>) -> Self {
        Self { rows }
    }

    pub(crate) fn rows(&self) -> &[PageRow] {
        &self.rows
    }

    pub(crate) fn find_by_id(&self, id: i64) -> Option<Page> {
        self.rows
            .iter()
            .find(|row| row.id == id)
            .cloned()
            .map(PageRow::into_page)
    }

    pub(crate) fn find_all(&self, order: PageOrder) -> Vec<Page> {
        let mut pages: Vec<Page> = self
            .rows
            .iter()
            .cloned()
            .map(PageRow::into_page)
            .collect();
        match order {
            PageOrder::Title => pages.sort_by(|a, b| a.title.cmp(&b.title)),
            PageOrder::Ordering => pages.sort_by_key(|p| (p.ordering, p.id)),
        }
        pages
    }

    pub(crate) fn alias_in_use(&self, alias: &str, exclude_id: Option<i64>) -> bool {
        self.rows
            .iter()
            .any(|row| row.alias == alias && Some(row.id) != exclude_id)
    }

    pub(crate) fn save(&mut self, page: &mut Page) -> Result<(), StoreError> {
        if page.id == 0 {
            if self.alias_in_use(&page.alias, None) {
                return Err(StoreError::duplicate_alias(&page.alias));
            }
            page.id = self.rows.iter().map(|row| row.id).max().unwrap_or(0) + 1;
            self.rows.push(PageRow::from_page(page));
            return Ok(());
        }

        if self.alias_in_use(&page.alias, Some(page.id)) {
            return Err(StoreError::duplicate_alias(&page.alias));
        }
        let row = self
            .rows
            .iter_mut()
            .find(|row| row.id == page.id)
            .ok_or_else(|| StoreError::not_found(page.id))?;
        *row = PageRow::from_page(page);
        Ok(())
    }

    /// Insert a row as-is, keeping its id. Test seeding only.
    pub(crate) fn seed(&mut self, page: &Page) {
        self.rows.push(PageRow::from_page(page));
    }

    pub(crate) fn delete(&mut self, id: i64) -> Result<(), StoreError> {
        let before = self.rows.len();
        self.rows.retain(|row| row.id != id);
        if self.rows.len() == before {
            return Err(StoreError::not_found(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(alias: &str, title: &str) -> Page {
        Page {
            title: title.to_owned(),
            alias: alias.to_owned(),
            crumb_label: title.to_owned(),
            content: "x".to_owned(),
            ..Page::default()
        }
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let mut table = RowTable::default();
        let mut a = page("a", "A");
        let mut b = page("b", "B");
        table.save(&mut a).unwrap();
        table.save(&mut b).unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[test]
    fn test_id_not_reused_after_delete() {
        let mut table = RowTable::default();
        let mut a = page("a", "A");
        let mut b = page("b", "B");
        table.save(&mut a).unwrap();
        table.save(&mut b).unwrap();
        table.delete(1).unwrap();
        let mut c = page("c", "C");
        table.save(&mut c).unwrap();
        assert_eq!(c.id, 3);
    }

    #[test]
    fn test_duplicate_alias_on_insert() {
        let mut table = RowTable::default();
        table.save(&mut page("a", "A")).unwrap();
        let err = table.save(&mut page("a", "Other")).unwrap_err();
        assert_eq!(err.kind, crate::StoreErrorKind::DuplicateAlias);
    }

    #[test]
    fn test_update_keeps_own_alias() {
        let mut table = RowTable::default();
        let mut a = page("a", "A");
        table.save(&mut a).unwrap();
        a.title = "A2".to_owned();
        table.save(&mut a).unwrap();
        assert_eq!(table.find_by_id(a.id).unwrap().title, "A2");
    }

    #[test]
    fn test_update_missing_id() {
        let mut table = RowTable::default();
        let mut ghost = page("g", "G");
        ghost.id = 99;
        let err = table.save(&mut ghost).unwrap_err();
        assert_eq!(err.kind, crate::StoreErrorKind::NotFound);
    }

    #[test]
    fn test_find_all_by_title() {
        let mut table = RowTable::default();
        table.save(&mut page("b", "Beta")).unwrap();
        table.save(&mut page("a", "Alpha")).unwrap();
        let titles: Vec<String> = table
            .find_all(PageOrder::Title)
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_find_all_by_ordering() {
        let mut table = RowTable::default();
        let mut first = page("a", "A");
        first.ordering = 5;
        let mut second = page("b", "B");
        second.ordering = 1;
        table.save(&mut first).unwrap();
        table.save(&mut second).unwrap();
        let aliases: Vec<String> = table
            .find_all(PageOrder::Ordering)
            .into_iter()
            .map(|p| p.alias)
            .collect();
        assert_eq!(aliases, vec!["b", "a"]);
    }
}
