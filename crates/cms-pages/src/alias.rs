//! Alias normalization and canonical URL resolution.

use std::sync::Arc;

use cms_content::LinkResolver;
use cms_store::PageStore;
use tracing::warn;

use crate::INDEX_ALIAS;
use crate::context::UrlBuilder;

/// Placeholder link for unresolved page references.
const MISSING_LINK: &str = "#";

/// Maps raw alias/path fragments to canonical URLs.
///
/// Cleaning removes the site's URL format suffix and surrounding slashes;
/// the cleaned alias is routed to `/` (empty or the front page) or
/// `/{alias}`, and the injected [`UrlBuilder`] produces the final URL.
#[derive(Clone)]
pub struct AliasResolver {
    url_builder: Arc<dyn UrlBuilder>,
    suffix: String,
}

impl AliasResolver {
    /// Create a resolver for the given URL suffix convention.
    #[must_use]
    pub fn new(url_builder: Arc<dyn UrlBuilder>, suffix: impl Into<String>) -> Self {
        Self {
            url_builder,
            suffix: suffix.into(),
        }
    }

    /// Canonical URL for a raw alias or stored path fragment.
    #[must_use]
    pub fn resolve(&self, raw: &str) -> String {
        let cleaned = self.clean(raw);
        self.canonical(&cleaned)
    }

    /// Strip the format suffix and surrounding slashes.
    fn clean(&self, raw: &str) -> String {
        let stripped = if self.suffix.is_empty() {
            raw.to_owned()
        } else {
            raw.replace(&self.suffix, "")
        };
        stripped.trim_matches('/').to_owned()
    }
}

impl LinkResolver for AliasResolver {
    fn canonical(&self, cleaned: &str) -> String {
        let route = if cleaned.is_empty() || cleaned == INDEX_ALIAS {
            "/".to_owned()
        } else {
            format!("/{cleaned}")
        };
        self.url_builder.build_url(&route)
    }
}

/// Alias of the page with the given id, or the `"#"` placeholder when the
/// page does not exist.
///
/// Never fails: store errors degrade to the placeholder as well, since the
/// callers only need something renderable as a link target.
#[must_use]
pub fn alias_by_id(store: &dyn PageStore, page_id: i64) -> String {
    match store.find_by_id(page_id) {
        Ok(Some(page)) => page.alias,
        Ok(None) => MISSING_LINK.to_owned(),
        Err(err) => {
            warn!(page_id, error = %err, "alias lookup failed");
            MISSING_LINK.to_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use cms_store::{MemoryPageStore, Page};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::context::SuffixUrlBuilder;

    fn resolver() -> AliasResolver {
        AliasResolver::new(Arc::new(SuffixUrlBuilder::new(".html")), ".html")
    }

    #[test]
    fn test_resolve_bare_alias() {
        assert_eq!(resolver().resolve("about"), "/about.html");
    }

    #[test]
    fn test_resolve_strips_suffix_and_slashes() {
        assert_eq!(resolver().resolve("/about.html/"), "/about.html");
    }

    #[test]
    fn test_resolve_index_is_root() {
        assert_eq!(resolver().resolve("index"), "/");
        assert_eq!(resolver().resolve("/index.html"), "/");
        assert_eq!(resolver().resolve(""), "/");
    }

    #[test]
    fn test_resolve_nested_path() {
        assert_eq!(resolver().resolve("services/web.html"), "/services/web.html");
    }

    #[test]
    fn test_resolve_stable_under_recleaning() {
        let resolver = resolver();
        for raw in ["about", "/about.html/", "index", "a/b"] {
            let url = resolver.resolve(raw);
            assert_eq!(resolver.resolve(&url), url);
        }
    }

    #[test]
    fn test_alias_by_id_found() {
        let store = MemoryPageStore::new().with_page(Page {
            title: "About".to_owned(),
            alias: "about".to_owned(),
            crumb_label: "About".to_owned(),
            content: "x".to_owned(),
            ..Page::default()
        });
        assert_eq!(alias_by_id(&store, 1), "about");
    }

    #[test]
    fn test_alias_by_id_missing_is_placeholder() {
        let store = MemoryPageStore::new();
        assert_eq!(alias_by_id(&store, 42), "#");
    }
}
