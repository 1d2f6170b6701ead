//! Page model core: validation lifecycle, breadcrumbs, alias resolution.
//!
//! This crate ties the storage layer to the content post-processor and owns
//! the page lifecycle rules:
//! - [`validate`]: field rules plus the mandatory author/timestamp stamping
//! - [`PageService`]: the explicit save/load/delete pipeline
//! - [`build_breadcrumbs`]: ancestor-id trail to rendered (url, label) pairs
//! - [`AliasResolver`]: normalizes stored link fragments to canonical URLs
//!
//! Framework globals (current user, URL manager, request host) are modeled
//! as injected traits in [`context`]; nothing here reads ambient state.
//!
//! # Quick start
//!
//! ```
//! use std::sync::Arc;
//! use cms_pages::config::Config;
//! use cms_pages::context::{FixedIdentity, MemoryMenu, StaticHost, SuffixUrlBuilder};
//! use cms_pages::PageService;
//! use cms_store::{MemoryPageStore, Page};
//!
//! let config = Config::default();
//! let service = PageService::new(
//!     Arc::new(MemoryPageStore::new()),
//!     Arc::new(FixedIdentity(1)),
//!     Arc::new(MemoryMenu::new()),
//!     Arc::new(StaticHost::new("https://example.com")),
//!     Arc::new(SuffixUrlBuilder::new(".html")),
//!     &config,
//! );
//!
//! let mut page = Page {
//!     title: "About".to_owned(),
//!     alias: "about".to_owned(),
//!     crumb_label: "About".to_owned(),
//!     content: "<p>About us</p>".to_owned(),
//!     ..Page::default()
//! };
//! service.save(&mut page).unwrap();
//! assert!(page.id != 0);
//! ```

pub mod config;
pub mod context;

mod alias;
mod breadcrumbs;
mod service;
mod validate;

pub use alias::{AliasResolver, alias_by_id};
pub use breadcrumbs::{Breadcrumb, build_breadcrumbs};
pub use service::{PageService, SaveError};
pub use validate::{ValidationError, validate};

/// Alias of the site's front page. The front page needs no crumb label and
/// never appears as a trailing breadcrumb entry.
pub const INDEX_ALIAS: &str = "index";
