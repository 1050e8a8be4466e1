use async_trait::async_trait;
use shelf_types::{Item, ItemFields, ItemId};
use tokio::sync::RwLock;

use crate::documents::Documents;
use crate::error::{StoreError, StoreResult};
use crate::traits::ItemStore;

/// In-memory item store.
///
/// Intended for tests, demos and embedding. Documents live behind an async
/// `RwLock`; `None` marks a closed connection.
pub struct InMemoryItemStore {
    docs: RwLock<Option<Documents>>,
}

impl InMemoryItemStore {
    /// Create a new empty, open store.
    pub fn new() -> Self {
        Self {
            docs: RwLock::new(Some(Documents::new())),
        }
    }

    /// Number of items currently stored. Zero once closed.
    pub async fn len(&self) -> usize {
        self.docs.read().await.as_ref().map_or(0, Documents::len)
    }

    /// Returns `true` if the store holds no items.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryItemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, fields: ItemFields) -> StoreResult<Item> {
        let mut guard = self.docs.write().await;
        let docs = guard.as_mut().ok_or(StoreError::Closed)?;
        Ok(docs.insert(fields))
    }

    async fn list_all(&self) -> StoreResult<Vec<Item>> {
        let guard = self.docs.read().await;
        let docs = guard.as_ref().ok_or(StoreError::Closed)?;
        Ok(docs.list())
    }

    async fn get(&self, id: &ItemId) -> StoreResult<Option<Item>> {
        let guard = self.docs.read().await;
        let docs = guard.as_ref().ok_or(StoreError::Closed)?;
        Ok(docs.get(id))
    }

    async fn update(&self, id: &ItemId, fields: ItemFields) -> StoreResult<Option<Item>> {
        let mut guard = self.docs.write().await;
        let docs = guard.as_mut().ok_or(StoreError::Closed)?;
        Ok(docs.replace(id, fields).map(|(item, _)| item))
    }

    async fn delete(&self, id: &ItemId) -> StoreResult<Option<Item>> {
        let mut guard = self.docs.write().await;
        let docs = guard.as_mut().ok_or(StoreError::Closed)?;
        Ok(docs.remove(id).map(|(_, item)| item))
    }

    async fn close(&self) -> StoreResult<()> {
        self.docs.write().await.take();
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryItemStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryItemStore").finish_non_exhaustive()
    }
}
