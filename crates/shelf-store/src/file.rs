use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use shelf_types::{Item, ItemFields, ItemId};
use tokio::sync::RwLock;

use crate::documents::{Documents, Snapshot};
use crate::error::{ConnectionError, StoreError, StoreResult};
use crate::traits::ItemStore;

/// Item store persisted as a JSON snapshot on disk.
///
/// Every mutation rewrites the snapshot atomically (temp file in the same
/// directory, then rename) while holding the write lock, so the file always
/// reflects a committed state. If the write fails the in-memory change is
/// rolled back and the error is returned.
pub struct FileItemStore {
    path: PathBuf,
    docs: RwLock<Option<Documents>>,
}

impl FileItemStore {
    /// Open the snapshot at `path`, starting empty if it does not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, ConnectionError> {
        let path = path.into();
        let docs = match tokio::fs::read(&path).await {
            Ok(bytes) => decode(&path, &bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let parent = parent_dir(&path);
                if !tokio::fs::try_exists(parent).await.unwrap_or(false) {
                    return Err(ConnectionError::Io {
                        path: parent.to_path_buf(),
                        source: std::io::Error::new(
                            std::io::ErrorKind::NotFound,
                            "parent directory does not exist",
                        ),
                    });
                }
                Documents::new()
            }
            Err(source) => return Err(ConnectionError::Io { path, source }),
        };
        tracing::debug!(path = %path.display(), items = docs.len(), "opened file store");
        Ok(Self {
            path,
            docs: RwLock::new(Some(docs)),
        })
    }

    /// Location of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, docs: &Documents) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(&docs.to_snapshot())
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomic(&path, &bytes))
            .await
            .map_err(|e| StoreError::Io(std::io::Error::other(e)))??;
        Ok(())
    }
}

fn decode(path: &Path, bytes: &[u8]) -> Result<Documents, ConnectionError> {
    let snapshot: Snapshot =
        serde_json::from_slice(bytes).map_err(|e| ConnectionError::Corrupt {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    Documents::from_snapshot(snapshot).map_err(|id| ConnectionError::Corrupt {
        path: path.to_path_buf(),
        reason: format!("duplicate item id {id}"),
    })
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut tmp = tempfile::NamedTempFile::new_in(parent_dir(path))?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[async_trait]
impl ItemStore for FileItemStore {
    fn backend(&self) -> &'static str {
        "file"
    }

    async fn create(&self, fields: ItemFields) -> StoreResult<Item> {
        let mut guard = self.docs.write().await;
        let docs = guard.as_mut().ok_or(StoreError::Closed)?;
        let item = docs.insert(fields);
        if let Err(e) = self.persist(docs).await {
            docs.forget(&item.id);
            return Err(e);
        }
        Ok(item)
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
        let Some((item, previous)) = docs.replace(id, fields) else {
            return Ok(None);
        };
        if let Err(e) = self.persist(docs).await {
            docs.restore(id, previous);
            return Err(e);
        }
        Ok(Some(item))
    }

    async fn delete(&self, id: &ItemId) -> StoreResult<Option<Item>> {
        let mut guard = self.docs.write().await;
        let docs = guard.as_mut().ok_or(StoreError::Closed)?;
        let Some((index, item)) = docs.remove(id) else {
            return Ok(None);
        };
        if let Err(e) = self.persist(docs).await {
            docs.reinsert(index, item);
            return Err(e);
        }
        Ok(Some(item))
    }

    async fn close(&self) -> StoreResult<()> {
        let mut guard = self.docs.write().await;
        if let Some(docs) = guard.as_ref() {
            self.persist(docs).await?;
            tracing::debug!(path = %self.path.display(), "flushed file store");
        }
        guard.take();
        Ok(())
    }
}

impl std::fmt::Debug for FileItemStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileItemStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> ItemFields {
        ItemFields::new("Widget", "A thing")
    }

    #[tokio::test]
    async fn missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileItemStore::open(dir.path().join("items.json")).await.unwrap();
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_parent_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileItemStore::open(dir.path().join("nope").join("items.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConnectionError::Io { .. }));
    }

    #[tokio::test]
    async fn mutations_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");

        let store = FileItemStore::open(&path).await.unwrap();
        assert_eq!(store.path(), path.as_path());
        let a = store.create(widget()).await.unwrap();
        let b = store.create(ItemFields::new("Gadget", "Other")).await.unwrap();
        store
            .update(&a.id, ItemFields::new("Widget2", "A thing"))
            .await
            .unwrap();
        store.delete(&b.id).await.unwrap();
        drop(store);

        let reopened = FileItemStore::open(&path).await.unwrap();
        let items = reopened.list_all().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, a.id);
        assert_eq!(items[0].name(), "Widget2");
    }

    #[tokio::test]
    async fn snapshot_is_readable_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");
        let store = FileItemStore::open(&path).await.unwrap();
        let item = store.create(widget()).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["items"][0]["id"], item.id.to_hex());
        assert_eq!(value["items"][0]["name"], "Widget");
    }

    #[tokio::test]
    async fn corrupt_snapshot_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");
        std::fs::write(&path, b"{ not json").unwrap();
        let err = FileItemStore::open(&path).await.unwrap_err();
        assert!(matches!(err, ConnectionError::Corrupt { .. }));
    }

    #[tokio::test]
    async fn missing_ids_are_not_errors() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileItemStore::open(dir.path().join("items.json")).await.unwrap();
        let id = ItemId::generate();
        assert!(store.get(&id).await.unwrap().is_none());
        assert!(store.update(&id, widget()).await.unwrap().is_none());
        assert!(store.delete(&id).await.unwrap().is_none());
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn close_flushes_and_disconnects() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");
        let store = FileItemStore::open(&path).await.unwrap();
        store.close().await.unwrap();
        assert!(path.exists());
        assert!(matches!(store.get(&ItemId::generate()).await, Err(StoreError::Closed)));
    }
}
