use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use shelf_types::{Item, ItemId};

use crate::error::{ApiError, Operation};
use crate::payload::{validate_body, ItemPayload};
use crate::state::AppState;

pub const DELETED_MESSAGE: &str = "Item deleted successfully";

/// `{"message": ...}` confirmation body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

type ItemBody = Result<Json<ItemPayload>, JsonRejection>;
type ItemPath = Result<Path<String>, PathRejection>;

/// Resolve the `:id` segment. Undecodable segments and ids outside the
/// store's shape both fail with the operation's message.
fn item_id(op: Operation, path: ItemPath) -> Result<ItemId, ApiError> {
    let Path(raw_id) = path.map_err(|e| ApiError::failed(op, e.body_text()))?;
    shelf_store::parse_id(&raw_id).map_err(|e| ApiError::store(op, e))
}

/// Liveness handler.
pub async fn root_handler() -> &'static str {
    "Hello, World!"
}

pub async fn create_item(
    State(state): State<AppState>,
    body: ItemBody,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let op = Operation::Create;
    let fields = validate_body(body).map_err(|e| ApiError::validation(op, e))?;
    let item = state
        .store
        .create(fields)
        .await
        .map_err(|e| ApiError::store(op, e))?;
    tracing::info!(id = %item.id, "created item");
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Item>>, ApiError> {
    let items = state
        .store
        .list_all()
        .await
        .map_err(|e| ApiError::store(Operation::List, e))?;
    Ok(Json(items))
}

pub async fn get_item(
    State(state): State<AppState>,
    path: ItemPath,
) -> Result<Json<Item>, ApiError> {
    let op = Operation::Fetch;
    let id = item_id(op, path)?;
    let item = state.store.get(&id).await.map_err(|e| ApiError::store(op, e))?;
    item.map(Json).ok_or(ApiError::NotFound)
}

pub async fn update_item(
    State(state): State<AppState>,
    path: ItemPath,
    body: ItemBody,
) -> Result<Json<Item>, ApiError> {
    let op = Operation::Update;
    let id = item_id(op, path)?;
    let fields = validate_body(body).map_err(|e| ApiError::validation(op, e))?;
    let item = state
        .store
        .update(&id, fields)
        .await
        .map_err(|e| ApiError::store(op, e))?;
    item.map(Json).ok_or(ApiError::NotFound)
}

pub async fn delete_item(
    State(state): State<AppState>,
    path: ItemPath,
) -> Result<Json<MessageResponse>, ApiError> {
    let op = Operation::Delete;
    let id = item_id(op, path)?;
    let removed = state
        .store
        .delete(&id)
        .await
        .map_err(|e| ApiError::store(op, e))?
        .ok_or(ApiError::NotFound)?;
    tracing::info!(id = %removed.id, "deleted item");
    Ok(Json(MessageResponse {
        message: DELETED_MESSAGE.into(),
    }))
}
