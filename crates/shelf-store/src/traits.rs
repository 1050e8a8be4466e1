use async_trait::async_trait;
use shelf_types::{Item, ItemFields, ItemId};

use crate::error::StoreResult;

/// Item document store.
///
/// All implementations must satisfy these invariants:
/// - `create` assigns a fresh, unique [`ItemId`]; ids never change afterwards.
/// - Lookups, updates and deletes of an absent id return `Ok(None)`.
/// - `update` replaces both fields wholesale and never creates a document.
/// - `list_all` returns documents in insertion order.
/// - A handle may be shared between concurrently running tasks.
/// - After `close`, every operation fails with [`StoreError::Closed`].
///
/// [`StoreError::Closed`]: crate::StoreError::Closed
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Short backend name, for logs.
    fn backend(&self) -> &'static str;

    /// Store a new item and return it with its assigned id.
    async fn create(&self, fields: ItemFields) -> StoreResult<Item>;

    /// Every stored item.
    async fn list_all(&self) -> StoreResult<Vec<Item>>;

    /// Look up a single item.
    async fn get(&self, id: &ItemId) -> StoreResult<Option<Item>>;

    /// Replace the fields of an existing item and return the updated item.
    async fn update(&self, id: &ItemId, fields: ItemFields) -> StoreResult<Option<Item>>;

    /// Remove an item and return what was removed.
    async fn delete(&self, id: &ItemId) -> StoreResult<Option<Item>>;

    /// Release the connection, flushing any pending state.
    async fn close(&self) -> StoreResult<()>;
}

/// Parse a caller-supplied id into the store's id shape.
///
/// A malformed id is a [`StoreError::MalformedId`](crate::StoreError::MalformedId),
/// not a missing document.
pub fn parse_id(raw: &str) -> StoreResult<ItemId> {
    Ok(raw.parse()?)
}
