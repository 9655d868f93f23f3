//! Sistema de manejo de errores
//!
//! Este módulo define los errores de la API del concesionario
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    /// Violación de unicidad (vin, email, id de venta...)
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Borrado bloqueado por una referencia viva
    #[error("Referenced entity: {0}")]
    ReferencedEntity(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Efecto secundario best-effort (p.ej. borrar una imagen) que falló
    #[error("Dependency failure: {0}")]
    DependencyFailure(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
    code: &'static str,
}

impl AppError {
    /// Código HTTP asociado a cada tipo de error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::DuplicateKey(_)
            | AppError::ReferencedEntity(_)
            | AppError::Validation(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::DependencyFailure(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::DuplicateKey(_) => "DUPLICATE_KEY",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ReferencedEntity(_) => "REFERENCED_ENTITY",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::DependencyFailure(_) => "DEPENDENCY_FAILURE",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Database(_) => "DB_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            AppError::DuplicateKey(_) => "Duplicate Key",
            AppError::NotFound(_) => "Not Found",
            AppError::ReferencedEntity(_) => "Referenced Entity",
            AppError::Validation(_) => "Validation Error",
            AppError::DependencyFailure(_) => "Dependency Failure",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::BadRequest(_) => "Bad Request",
            AppError::Database(_) => "Database Error",
            AppError::Internal(_) => "Internal Server Error",
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Los detalles internos solo van al log, nunca al cliente
        let message = match &self {
            AppError::Database(e) => {
                error!("❌ Error de base de datos: {}", e);
                "Error de servidor".to_string()
            }
            AppError::Internal(msg) => {
                error!("❌ Error interno: {}", msg);
                "Error de servidor".to_string()
            }
            AppError::DependencyFailure(msg) => {
                warn!("⚠️ Fallo de dependencia: {}", msg);
                "Error comunicando con un servicio externo".to_string()
            }
            AppError::DuplicateKey(msg)
            | AppError::NotFound(msg)
            | AppError::ReferencedEntity(msg)
            | AppError::Validation(msg)
            | AppError::Unauthorized(msg)
            | AppError::BadRequest(msg) => msg.clone(),
        };

        let body = ErrorResponse {
            error: self.label(),
            message,
            code: self.code(),
        };

        (status, Json(body)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Traduce errores de sqlx, convirtiendo violaciones de unicidad en `DuplicateKey`
pub fn map_unique_violation(e: sqlx::Error, message: &str) -> AppError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return AppError::DuplicateKey(message.to_string());
        }
    }
    AppError::Database(e)
}
