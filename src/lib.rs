//! Concesionario API
//!
//! API REST de un concesionario: coches, clientes, ventas y usuarios.
//! El núcleo es la coherencia entre inventario, clientes y ventas
//! (ver `controllers::sale_controller`).

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod seeds;
pub mod services;
pub mod state;
pub mod utils;

use std::time::Duration;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::EnvironmentConfig;
use crate::middleware::cors_layer;
use crate::state::AppState;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Router completo con la configuración del entorno
pub fn build_router(state: AppState, config: &EnvironmentConfig) -> Router {
    router_with(
        state,
        &config.cors_origins,
        Duration::from_secs(config.request_timeout_secs),
    )
}

/// Router con CORS permisivo y timeout por defecto
pub fn app(state: AppState) -> Router {
    router_with(state, &[], DEFAULT_REQUEST_TIMEOUT)
}

fn router_with(state: AppState, cors_origins: &[String], timeout: Duration) -> Router {
    Router::new()
        .merge(routes::health_router())
        .nest("/api/v1", routes::create_api_router())
        .fallback(routes::route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(timeout))
                .layer(cors_layer(cors_origins)),
        )
        .with_state(state)
}
