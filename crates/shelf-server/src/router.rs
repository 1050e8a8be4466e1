use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// HTTP endpoint paths.
pub mod endpoints {
    pub const ROOT: &str = "/";
    pub const ITEMS: &str = "/items";
    pub const ITEM: &str = "/items/:id";
}

/// Build the axum router with all item endpoints.
pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(handler::root_handler))
        .route(
            endpoints::ITEMS,
            get(handler::list_items).post(handler::create_item),
        )
        .route(
            endpoints::ITEM,
            get(handler::get_item)
                .put(handler::update_item)
                .delete(handler::delete_item),
        )
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
