pub mod search;
pub mod server;

use axum::{routing::get, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: 200,
            message: "success".to_string(),
            data: Some(data),
        }
    }

    /// Data plus a non-success message, for requests that ended in a handled failure
    pub fn partial(data: T, code: i32, message: &str) -> Self {
        Self {
            code,
            message: message.to_string(),
            data: Some(data),
        }
    }
}

/// Build the application router / 构建路由
pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(search::search_page))
        .route("/search", get(search::search_page))
        .route("/api/search", get(search::search_api))
        .route("/api/health", get(server::health_check))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
