//! Collaborator traits for the page lifecycle.
//!
//! The hosting application supplies these; the simple implementations here
//! cover tests, CLIs, and single-tenant setups. No operation in this crate
//! reads ambient global state.

use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use cms_store::StoreError;

/// Identity of the acting user, consulted during validation.
pub trait Identity: Send + Sync {
    /// Id of the current actor.
    fn current_user_id(&self) -> i64;
}

/// Builds final URLs from canonical internal routes (`/` or `/{alias}`).
///
/// Implementations must be stable under re-cleaning: stripping the site's
/// URL suffix and surrounding slashes from a built URL and rebuilding must
/// return the same URL. Link rewriting relies on this for idempotence.
pub trait UrlBuilder: Send + Sync {
    /// Final URL for a canonical route.
    fn build_url(&self, route: &str) -> String;
}

/// Per-request data consumed by content post-processing.
pub trait RequestContext: Send + Sync {
    /// Scheme + host of the current request, no trailing slash
    /// (e.g. `https://example.com`).
    fn current_host(&self) -> String;
}

/// Menu collaborator notified after a page is deleted.
pub trait MenuRegistry: Send + Sync {
    /// Clear (not delete) every menu entry referencing `page_id`,
    /// resetting the reference to 0.
    fn clear_page_references(&self, page_id: i64) -> Result<(), StoreError>;
}

/// Time source for validation stamping.
pub trait Clock: Send + Sync {
    /// Current time, epoch seconds.
    fn now(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
    }
}

/// Clock frozen at a fixed instant, for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}

/// Identity with a fixed user id.
#[derive(Debug, Clone, Copy)]
pub struct FixedIdentity(pub i64);

impl Identity for FixedIdentity {
    fn current_user_id(&self) -> i64 {
        self.0
    }
}

/// Request context with a fixed host.
#[derive(Debug, Clone)]
pub struct StaticHost(String);

impl StaticHost {
    /// Create a host context (e.g. `https://example.com`).
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self(host.into())
    }
}

impl RequestContext for StaticHost {
    fn current_host(&self) -> String {
        self.0.clone()
    }
}

/// URL builder that appends the site's format suffix to every route except
/// the root.
#[derive(Debug, Clone)]
pub struct SuffixUrlBuilder {
    suffix: String,
}

impl SuffixUrlBuilder {
    /// Create a builder for the given format suffix (e.g. `.html`).
    #[must_use]
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }
}

impl UrlBuilder for SuffixUrlBuilder {
    fn build_url(&self, route: &str) -> String {
        if route == "/" {
            "/".to_owned()
        } else {
            format!("{route}{}", self.suffix)
        }
    }
}

/// Menu entry referencing a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    /// Entry id.
    pub id: i64,
    /// Referenced page id; 0 = no page.
    pub page_id: i64,
}

/// In-memory menu registry.
#[derive(Debug, Default)]
pub struct MemoryMenu {
    entries: Mutex<Vec<MenuEntry>>,
}

impl MemoryMenu {
    /// Create an empty menu.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a menu entry.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_entry(self, id: i64, page_id: i64) -> Self {
        self.entries.lock().unwrap().push(MenuEntry { id, page_id });
        self
    }

    /// Snapshot of all entries.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn entries(&self) -> Vec<MenuEntry> {
        self.entries.lock().unwrap().clone()
    }
}

impl MenuRegistry for MemoryMenu {
    fn clear_page_references(&self, page_id: i64) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap();
        for entry in entries.iter_mut().filter(|e| e.page_id == page_id) {
            entry.page_id = 0;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_url_builder() {
        let builder = SuffixUrlBuilder::new(".html");
        assert_eq!(builder.build_url("/about"), "/about.html");
        assert_eq!(builder.build_url("/"), "/");
    }

    #[test]
    fn test_memory_menu_clears_not_deletes() {
        let menu = MemoryMenu::new().with_entry(1, 5).with_entry(2, 9);
        menu.clear_page_references(5).unwrap();

        let entries = menu.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], MenuEntry { id: 1, page_id: 0 });
        assert_eq!(entries[1], MenuEntry { id: 2, page_id: 9 });
    }

    #[test]
    fn test_system_clock_monotonic_enough() {
        assert!(SystemClock.now() > 1_600_000_000);
    }
}
