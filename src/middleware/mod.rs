//! Middleware del sistema
//!
//! Este módulo contiene la autenticación (como extractor) y el CORS.

pub mod auth;
pub mod cors;

pub use auth::AuthUser;
pub use cors::cors_layer;
