//! Page storage abstraction for the CMS page model.
//!
//! This crate provides:
//! - [`Page`]: the in-memory page record with materialized crumb lists
//! - [`PageStore`]: the storage trait with alias-uniqueness enforcement
//! - [`MemoryPageStore`]: in-memory backend for tests and embedding
//! - [`JsonPageStore`]: single-file JSON backend
//!
//! # Crumb list encoding
//!
//! Breadcrumb ancestor lists are persisted as `;`-delimited id strings for
//! compatibility with existing data. The delimited form exists only inside
//! storage backends ([`PageRow`]); loaded pages always carry `Vec<i64>`.

mod error;
mod fs;
mod memory;
mod page;
mod rows;
mod store;

pub use error::{StoreError, StoreErrorKind};
pub use fs::JsonPageStore;
pub use memory::MemoryPageStore;
pub use page::{Page, PageRow, decode_crumbs, encode_crumbs};
pub use store::{PageOrder, PageStore};
