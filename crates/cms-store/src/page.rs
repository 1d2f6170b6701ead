//! Page record and the delimited crumb-list codec.

use serde::{Deserialize, Serialize};

/// Delimiter used by the persisted crumb-list format.
const CRUMB_DELIMITER: char = ';';

/// A content page with materialized breadcrumb lists.
///
/// This is the in-memory shape handed out by storage backends. The two crumb
/// lists are always `Vec<i64>` here; the delimited string form lives only in
/// [`PageRow`].
///
/// Integer flags default to 0 except `is_shareable`, which defaults to 1.
/// An id of 0 marks a record that has not been inserted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Storage-assigned identifier (0 = unsaved).
    pub id: i64,
    /// Id of the user who last validated the record.
    pub author_id: i64,
    /// Page title (H1).
    pub title: String,
    /// URL slug, globally unique.
    pub alias: String,
    /// Display text within a breadcrumb trail.
    pub crumb_label: String,
    /// HTML body.
    pub content: String,
    /// Meta title (empty = absent).
    pub meta_title: String,
    /// Meta keywords (empty = absent).
    pub meta_keywords: String,
    /// Meta description (empty = absent).
    pub meta_description: String,
    /// Primary trail of ancestor page ids, root first.
    pub breadcrumb_ancestors: Vec<i64>,
    /// Auxiliary trail of ancestor page ids.
    pub secondary_crumbs: Vec<i64>,
    /// Creation time, epoch seconds. Set once on first save.
    pub created_at: i64,
    /// Last modification time, epoch seconds.
    pub modified_at: i64,
    /// View counter.
    pub view_count: i64,
    /// Manual ordering weight.
    pub ordering: i64,
    /// Publication status flag.
    pub status: i64,
    /// Whether the page appears in the sitemap.
    pub is_sitemap_eligible: i64,
    /// Whether the content is produced by another process.
    pub is_auto_generated: i64,
    /// Whether share affordances are shown. Forced to 0 for
    /// auto-generated pages on save.
    pub is_shareable: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            id: 0,
            author_id: 0,
            title: String::new(),
            alias: String::new(),
            crumb_label: String::new(),
            content: String::new(),
            meta_title: String::new(),
            meta_keywords: String::new(),
            meta_description: String::new(),
            breadcrumb_ancestors: Vec::new(),
            secondary_crumbs: Vec::new(),
            created_at: 0,
            modified_at: 0,
            view_count: 0,
            ordering: 0,
            status: 0,
            is_sitemap_eligible: 0,
            is_auto_generated: 0,
            is_shareable: 1,
        }
    }
}

/// Persisted page shape with crumb lists in the legacy delimited format.
///
/// Conversion to and from [`Page`] applies the codec, so the string form
/// never escapes the storage layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRow {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub alias: String,
    pub crumb_label: String,
    pub content: String,
    #[serde(default)]
    pub meta_title: String,
    #[serde(default)]
    pub meta_keywords: String,
    #[serde(default)]
    pub meta_description: String,
    /// Primary trail, `;`-joined ids.
    #[serde(default)]
    pub breadcrumbs: String,
    /// Auxiliary trail, `;`-joined ids.
    #[serde(default)]
    pub secondary_crumbs: String,
    pub created_at: i64,
    pub modified_at: i64,
    #[serde(default)]
    pub view_count: i64,
    #[serde(default)]
    pub ordering: i64,
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub is_sitemap_eligible: i64,
    #[serde(default)]
    pub is_auto_generated: i64,
    #[serde(default)]
    pub is_shareable: i64,
}

impl PageRow {
    /// Build the persisted row for a page, encoding both crumb lists.
    #[must_use]
    pub fn from_page(page: &Page) -> Self {
        Self {
            id: page.id,
            author_id: page.author_id,
            title: page.title.clone(),
            alias: page.alias.clone(),
            crumb_label: page.crumb_label.clone(),
            content: page.content.clone(),
            meta_title: page.meta_title.clone(),
            meta_keywords: page.meta_keywords.clone(),
            meta_description: page.meta_description.clone(),
            breadcrumbs: encode_crumbs(&page.breadcrumb_ancestors),
            secondary_crumbs: encode_crumbs(&page.secondary_crumbs),
            created_at: page.created_at,
            modified_at: page.modified_at,
            view_count: page.view_count,
            ordering: page.ordering,
            status: page.status,
            is_sitemap_eligible: page.is_sitemap_eligible,
            is_auto_generated: page.is_auto_generated,
            is_shareable: page.is_shareable,
        }
    }

    /// Materialize the in-memory page, decoding both crumb lists.
    #[must_use]
    pub fn into_page(self) -> Page {
        Page {
            id: self.id,
            author_id: self.author_id,
            title: self.title,
            alias: self.alias,
            crumb_label: self.crumb_label,
            content: self.content,
            meta_title: self.meta_title,
            meta_keywords: self.meta_keywords,
            meta_description: self.meta_description,
            breadcrumb_ancestors: decode_crumbs(&self.breadcrumbs),
            secondary_crumbs: decode_crumbs(&self.secondary_crumbs),
            created_at: self.created_at,
            modified_at: self.modified_at,
            view_count: self.view_count,
            ordering: self.ordering,
            status: self.status,
            is_sitemap_eligible: self.is_sitemap_eligible,
            is_auto_generated: self.is_auto_generated,
            is_shareable: self.is_shareable,
        }
    }
}

/// Encode an ordered id list into the `;`-delimited persisted form.
///
/// Zero ids are dropped; an empty list encodes to an empty string.
#[must_use]
pub fn encode_crumbs(ids: &[i64]) -> String {
    let parts: Vec<String> = ids
        .iter()
        .filter(|&&id| id != 0)
        .map(ToString::to_string)
        .collect();
    parts.join(&CRUMB_DELIMITER.to_string())
}

/// Decode the `;`-delimited persisted form into an ordered id list.
///
/// Empty, unparseable, and zero tokens are dropped; order is preserved.
#[must_use]
pub fn decode_crumbs(encoded: &str) -> Vec<i64> {
    encoded
        .split(CRUMB_DELIMITER)
        .filter_map(|token| token.trim().parse::<i64>().ok())
        .filter(|&id| id != 0)
        .collect()
}
