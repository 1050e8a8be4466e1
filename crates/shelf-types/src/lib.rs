//! Foundation types for Shelf.
//!
//! Every other Shelf crate depends on `shelf-types`.
//!
//! # Key Types
//!
//! - [`ItemId`] — Storage-assigned document identifier (12 bytes, 24 hex chars)
//! - [`ItemFields`] — The validated `name`/`description` pair a store persists
//! - [`Item`] — A stored document: id plus fields

pub mod error;
pub mod id;
pub mod item;

pub use error::TypeError;
pub use id::ItemId;
pub use item::{Item, ItemFields};
