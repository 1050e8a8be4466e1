//! Document storage gateway for Shelf.
//!
//! This crate owns the connection to the backing document store and exposes
//! single-document CRUD primitives over [`Item`](shelf_types::Item)s keyed by
//! [`ItemId`](shelf_types::ItemId).
//!
//! # Storage Backends
//!
//! All backends implement the [`ItemStore`] trait and are obtained through
//! [`connect`], which selects a backend from the URI scheme:
//!
//! - `memory://` -- [`InMemoryItemStore`], a process-local collection
//! - `file://<path>` -- [`FileItemStore`], a collection persisted as a JSON
//!   snapshot
//!
//! # Design Rules
//!
//! 1. Ids are assigned by the store, exactly once, at creation.
//! 2. A missing document is `Ok(None)`, never an error.
//! 3. Handles are shared across concurrent requests; last write wins.
//! 4. The store never validates field contents.
//! 5. All I/O errors are propagated, never silently ignored.

pub mod connect;
pub mod documents;
pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use connect::{connect, StoreUri};
pub use error::{ConnectionError, StoreError, StoreResult};
pub use file::FileItemStore;
pub use memory::InMemoryItemStore;
pub use traits::{parse_id, ItemStore};
