//! Breadcrumb trail construction.

use cms_store::{Page, PageStore, StoreError};
use tracing::debug;

use crate::INDEX_ALIAS;
use crate::alias::AliasResolver;

/// One rendered breadcrumb entry.
///
/// The trailing entry for the current page has no URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    /// Link target; `None` for the current page.
    pub url: Option<String>,
    /// Display text.
    pub label: String,
}

/// Build the rendered breadcrumb trail for a page.
///
/// Each stored ancestor id is resolved through the store; ids that no longer
/// exist are skipped without error. Order is preserved as stored. Unless the
/// page is the front page, a final non-linked entry for the page itself is
/// appended.
pub fn build_breadcrumbs(
    page: &Page,
    store: &dyn PageStore,
    resolver: &AliasResolver,
) -> Result<Vec<Breadcrumb>, StoreError> {
    let mut trail = Vec::with_capacity(page.breadcrumb_ancestors.len() + 1);

    for &ancestor_id in &page.breadcrumb_ancestors {
        match store.find_by_id(ancestor_id)? {
            Some(ancestor) => trail.push(Breadcrumb {
                url: Some(resolver.resolve(&ancestor.alias)),
                label: ancestor.crumb_label,
            }),
            None => {
                // Dangling reference; possibly a deleted page. Kept silent
                // towards the caller, pending product review.
                debug!(page_id = page.id, ancestor_id, "skipping missing breadcrumb ancestor");
            }
        }
    }

    if page.alias != INDEX_ALIAS {
        trail.push(Breadcrumb {
            url: None,
            label: page.crumb_label.clone(),
        });
    }

    Ok(trail)
}
