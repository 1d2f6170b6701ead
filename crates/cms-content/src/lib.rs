//! HTML content post-processing for the CMS page model.
//!
//! Persisted page bodies accumulate stale link forms (format suffixes,
//! stray slashes) and need preview thumbnails. This crate provides:
//! - [`ContentRewriter::rewrite_links`]: canonicalize every anchor `href`
//!   through a [`LinkResolver`]
//! - [`ContentRewriter::extract_first_image`]: first `img` URL, made
//!   absolute against the current host
//!
//! Parsing is best-effort: malformed markup never aborts an operation. Link
//! rewriting falls back to returning the input unchanged, image extraction
//! to an empty string.

mod dom;
mod entities;
mod rewrite;

pub use rewrite::{ContentRewriter, LinkResolver};
