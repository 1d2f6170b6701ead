//! The page lifecycle pipeline.
//!
//! What the source framework ran as implicit model hooks is an explicit,
//! deterministically ordered pipeline here:
//!
//! - save: stamp author/timestamps, validate, apply pre-persist rules,
//!   write through the store (which encodes the crumb lists)
//! - load: read through the store (which decodes the crumb lists)
//! - delete: remove the record, then clear menu references to it

use std::sync::Arc;

use cms_content::ContentRewriter;
use cms_store::{Page, PageOrder, PageStore, StoreError};
use tracing::debug;

use crate::alias::{AliasResolver, alias_by_id};
use crate::breadcrumbs::{Breadcrumb, build_breadcrumbs};
use crate::config::Config;
use crate::context::{Clock, Identity, MenuRegistry, RequestContext, SystemClock, UrlBuilder};
use crate::validate::{ValidationError, validate};

/// Error saving a page.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// A validation rule failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The storage layer rejected the write.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Request-scoped page operations.
///
/// Holds the storage layer and the injected collaborators; each method is a
/// single self-contained operation with no shared mutable state of its own.
pub struct PageService {
    store: Arc<dyn PageStore>,
    identity: Arc<dyn Identity>,
    menu: Arc<dyn MenuRegistry>,
    request: Arc<dyn RequestContext>,
    clock: Arc<dyn Clock>,
    resolver: AliasResolver,
    rewriter: ContentRewriter,
}

impl PageService {
    /// Wire up a service from its collaborators and the site config.
    #[must_use]
    pub fn new(
        store: Arc<dyn PageStore>,
        identity: Arc<dyn Identity>,
        menu: Arc<dyn MenuRegistry>,
        request: Arc<dyn RequestContext>,
        url_builder: Arc<dyn UrlBuilder>,
        config: &Config,
    ) -> Self {
        let suffix = config.site.url_suffix.clone();
        Self {
            store,
            identity,
            menu,
            request,
            clock: Arc::new(SystemClock),
            resolver: AliasResolver::new(url_builder, suffix.clone()),
            rewriter: ContentRewriter::new(suffix),
        }
    }

    /// Replace the time source, for tests.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Validate and persist a page, inserting when `page.id` is 0.
    ///
    /// Runs the full save pipeline; a failed validation leaves the store
    /// untouched. Storage constraint violations (duplicate alias) are
    /// surfaced unchanged.
    pub fn save(&self, page: &mut Page) -> Result<(), SaveError> {
        let is_new = page.id == 0;
        validate(
            page,
            is_new,
            self.store.as_ref(),
            self.identity.as_ref(),
            self.clock.as_ref(),
        )?;

        // Auto-generated pages carry no share affordances.
        if page.is_auto_generated != 0 {
            page.is_shareable = 0;
        }

        self.store.save(page)?;
        debug!(page_id = page.id, alias = %page.alias, is_new, "page saved");
        Ok(())
    }

    /// Load a page by id; crumb lists arrive materialized.
    pub fn load(&self, id: i64) -> Result<Option<Page>, StoreError> {
        self.store.find_by_id(id)
    }

    /// Delete a page, then clear any menu entries referencing it.
    pub fn delete(&self, id: i64) -> Result<(), StoreError> {
        self.store.delete(id)?;
        self.menu.clear_page_references(id)?;
        debug!(page_id = id, "page deleted, menu references cleared");
        Ok(())
    }

    /// Rendered breadcrumb trail for a page.
    pub fn breadcrumbs(&self, page: &Page) -> Result<Vec<Breadcrumb>, StoreError> {
        build_breadcrumbs(page, self.store.as_ref(), &self.resolver)
    }

    /// Page body with every anchor href canonicalized.
    #[must_use]
    pub fn rewritten_content(&self, page: &Page) -> String {
        self.rewriter.rewrite_links(&page.content, &self.resolver)
    }

    /// Preview image URL for a page, absolute against the current host.
    /// Empty when the body has no image.
    #[must_use]
    pub fn first_image(&self, page: &Page) -> String {
        self.rewriter
            .extract_first_image(&page.content, &self.request.current_host())
    }

    /// Alias of a page by id, or `"#"` when unknown.
    #[must_use]
    pub fn alias_by_id(&self, page_id: i64) -> String {
        alias_by_id(self.store.as_ref(), page_id)
    }

    /// (id, title) pairs of all pages ordered by title, for admin pickers.
    pub fn title_index(&self) -> Result<Vec<(i64, String)>, StoreError> {
        Ok(self
            .store
            .find_all(PageOrder::Title)?
            .into_iter()
            .map(|page| (page.id, page.title))
            .collect())
    }

    /// The alias resolver wired into this service.
    #[must_use]
    pub fn resolver(&self) -> &AliasResolver {
        &self.resolver
    }
}
