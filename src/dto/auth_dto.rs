use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::User;
use crate::utils::validation::validate_not_blank;

// Request de login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(custom = "validate_not_blank")]
    pub email: String,
    #[validate(custom = "validate_not_blank")]
    pub password: String,
}

// Response de login: token de sesión y usuario (sin contraseña)
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

// Response simple con mensaje
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
