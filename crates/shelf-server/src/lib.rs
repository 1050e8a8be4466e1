//! HTTP server for Shelf.
//!
//! Maps item CRUD routes onto an [`ItemStore`](shelf_store::ItemStore) and
//! translates store outcomes into HTTP status codes.

pub mod config;
pub mod error;
pub mod handler;
pub mod payload;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, Operation, ServerError, ServerResult};
pub use payload::{ItemPayload, ValidationError};
pub use router::build_router;
pub use server::ShelfServer;
pub use state::AppState;
