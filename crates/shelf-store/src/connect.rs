use std::path::PathBuf;
use std::sync::Arc;

use crate::error::ConnectionError;
use crate::file::FileItemStore;
use crate::memory::InMemoryItemStore;
use crate::traits::ItemStore;

/// A parsed store connection string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreUri {
    /// `memory://`
    Memory,
    /// `file://<path>`
    File(PathBuf),
}

impl StoreUri {
    pub fn parse(uri: &str) -> Result<Self, ConnectionError> {
        let uri = uri.trim();
        if uri.is_empty() {
            return Err(ConnectionError::MissingUri);
        }
        let (scheme, rest) = uri.split_once("://").ok_or_else(|| ConnectionError::InvalidUri {
            uri: uri.to_string(),
            reason: "expected <scheme>://".into(),
        })?;
        match scheme.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" if rest.is_empty() => Err(ConnectionError::InvalidUri {
                uri: uri.to_string(),
                reason: "missing file path".into(),
            }),
            "file" => Ok(Self::File(PathBuf::from(rest))),
            other => Err(ConnectionError::UnsupportedScheme(other.to_string())),
        }
    }
}

/// Establish a store connection from a URI.
///
/// Called once at startup; a failure here is not recoverable.
pub async fn connect(uri: &str) -> Result<Arc<dyn ItemStore>, ConnectionError> {
    let store: Arc<dyn ItemStore> = match StoreUri::parse(uri)? {
        StoreUri::Memory => Arc::new(InMemoryItemStore::new()),
        StoreUri::File(path) => Arc::new(FileItemStore::open(path).await?),
    };
    tracing::info!(backend = store.backend(), "store connected");
    Ok(store)
}
