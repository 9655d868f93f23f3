//! Rutas HTTP
//!
//! Todas cuelgan de `/api/v1`. Las rutas que exigen sesión lo declaran
//! recibiendo el extractor `AuthUser`.

pub mod client_routes;
pub mod sale_routes;
pub mod user_routes;
pub mod vehicle_routes;

use axum::{
    http::{StatusCode, Uri},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::state::AppState;

pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/cars", vehicle_routes::create_vehicle_router())
        .nest("/clients", client_routes::create_client_router())
        .nest("/sales", sale_routes::create_sale_router())
        .nest("/users", user_routes::create_user_router())
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

pub async fn route_not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "message": "Route not found",
            "path": uri.path(),
        })),
    )
}

pub fn health_router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
