use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

use crate::payload::ValidationError;

/// Errors that stop the server from starting or running.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("store connection failed: {0}")]
    Connection(#[from] shelf_store::ConnectionError),

    #[error("store error: {0}")]
    Store(#[from] shelf_store::StoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// The item operation a request was performing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Create,
    List,
    Fetch,
    Update,
    Delete,
}

impl Operation {
    /// Client-facing message reported when the operation fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::Create => "Error creating item",
            Self::List => "Error fetching items",
            Self::Fetch => "Error fetching item",
            Self::Update => "Error updating item",
            Self::Delete => "Error deleting item",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Create => "create",
            Self::List => "list",
            Self::Fetch => "fetch",
            Self::Update => "update",
            Self::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Per-request failure, rendered as an HTTP response.
///
/// Missing items are 404. Everything else, from a malformed id to an
/// unavailable backend, is 400 with the operation's message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("item not found")]
    NotFound,

    #[error("{op} failed: {cause}")]
    Failed { op: Operation, cause: String },
}

impl ApiError {
    pub fn failed(op: Operation, cause: impl std::fmt::Display) -> Self {
        Self::Failed {
            op,
            cause: cause.to_string(),
        }
    }

    pub fn store(op: Operation, err: shelf_store::StoreError) -> Self {
        tracing::warn!(%op, error = %err, "store operation failed");
        Self::failed(op, err)
    }

    pub fn validation(op: Operation, err: ValidationError) -> Self {
        tracing::debug!(%op, error = %err, "rejected request body");
        Self::failed(op, err)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Failed { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::NotFound => json!({ "message": "Item not found" }),
            Self::Failed { op, cause } => json!({
                "message": op.failure_message(),
                "error": cause,
            }),
        };
        (status, Json(body)).into_response()
    }
}
