//! Page validation and lifecycle stamping.

use cms_store::{Page, PageStore, StoreError};

use crate::INDEX_ALIAS;
use crate::context::{Clock, Identity};

/// Maximum length of `title`, `alias`, and `crumb_label`, in characters.
const FIELD_MAX: usize = 200;
/// Maximum length of the meta fields, in characters.
const META_MAX: usize = 250;

/// Validation failure, surfaced to the caller as a field-level message.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// A required field is empty.
    #[error("{field} is required")]
    FieldRequired {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A field exceeds its length ceiling.
    #[error("{field} must be at most {max} characters")]
    FieldTooLong {
        /// Name of the offending field.
        field: &'static str,
        /// Length ceiling in characters.
        max: usize,
    },
    /// Another page already owns the alias.
    #[error("Такая ссылка уже занята")]
    DuplicateAlias {
        /// The contested alias.
        alias: String,
    },
    /// The uniqueness check could not be performed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Validate a page for insert (`is_new`) or update.
///
/// Checks run in a fixed order: required fields, the conditional
/// crumb-label and content rules, alias uniqueness, then length ceilings.
///
/// Validation is not a pure check: it always overwrites `author_id` with
/// the current actor and stamps `created_at` (new records) or `modified_at`
/// (existing records) before the rules run. Callers must not bypass it.
pub fn validate(
    page: &mut Page,
    is_new: bool,
    store: &dyn PageStore,
    identity: &dyn Identity,
    clock: &dyn Clock,
) -> Result<(), ValidationError> {
    page.author_id = identity.current_user_id();
    if is_new {
        page.created_at = clock.now();
    } else {
        page.modified_at = clock.now();
    }

    require("title", &page.title)?;
    require("alias", &page.alias)?;

    if page.alias != INDEX_ALIAS {
        require("crumb_label", &page.crumb_label)?;
    }

    if page.is_auto_generated == 0 {
        require("content", &page.content)?;
    }

    let exclude = if is_new { None } else { Some(page.id) };
    if store.alias_in_use(&page.alias, exclude)? {
        return Err(ValidationError::DuplicateAlias {
            alias: page.alias.clone(),
        });
    }

    // Integer fields need no runtime coercion: the record type carries the
    // defaults (0 everywhere, is_shareable = 1).

    limit("title", &page.title, FIELD_MAX)?;
    limit("alias", &page.alias, FIELD_MAX)?;
    limit("crumb_label", &page.crumb_label, FIELD_MAX)?;
    limit("meta_title", &page.meta_title, META_MAX)?;
    limit("meta_keywords", &page.meta_keywords, META_MAX)?;
    limit("meta_description", &page.meta_description, META_MAX)?;

    Ok(())
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::FieldRequired { field });
    }
    Ok(())
}

fn limit(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::FieldTooLong { field, max });
    }
    Ok(())
}
