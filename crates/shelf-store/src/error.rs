use std::path::PathBuf;

use shelf_types::TypeError;

/// Errors from per-request store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The supplied id does not have the store's id shape.
    #[error("malformed item id: {0}")]
    MalformedId(#[from] TypeError),

    /// The connection has been released.
    #[error("store connection is closed")]
    Closed,

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot encoding failure.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised while establishing a store connection.
///
/// These are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("no store URI configured")]
    MissingUri,

    #[error("invalid store URI {uri:?}: {reason}")]
    InvalidUri { uri: String, reason: String },

    #[error("unsupported store scheme: {0}")]
    UnsupportedScheme(String),

    #[error("cannot open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt snapshot {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },
}
