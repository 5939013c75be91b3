use axum::{
    Json, Router,
    http::{StatusCode, Uri},
    routing::get,
};
use tower_http::services::ServeDir;

use crate::response::{ApiResponse, Meta};
use crate::state::AppState;

pub mod airplane_types;
pub mod airplanes;
pub mod airports;
pub mod auth;
pub mod crews;
pub mod doc;
pub mod flights;
pub mod health;
pub mod orders;
pub mod params;
pub mod routes;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/airports", airports::router())
        .nest("/routes", routes::router())
        .nest("/airplane_types", airplane_types::router())
        .nest("/airplanes", airplanes::router())
        .nest("/crews", crews::router())
        .nest("/flights", flights::router())
        .nest("/orders", orders::router())
        .nest("/auth", auth::router())
}

/// The full application router: API under `/api`, health probe, docs UI and
/// read-only media serving.
pub fn build_router(state: AppState) -> Router {
    let media_dir = ServeDir::new(&state.media_root);
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", create_api_router())
        .merge(doc::scalar_docs())
        .nest_service("/media", media_dir)
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiResponse<serde_json::Value>>) {
    let body = ApiResponse::success(
        "Not Found",
        serde_json::json!({ "path": uri.path() }),
        Some(Meta::empty()),
    );
    (StatusCode::NOT_FOUND, Json(body))
}
