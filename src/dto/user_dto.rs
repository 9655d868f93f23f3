use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::validate_not_blank;

// Request para registrar un usuario
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(custom = "validate_not_blank", length(max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 4, message = "La contraseña tiene que tener al menos 4 caracteres"))]
    pub password: String,
}

// Request para actualizar un usuario. Un campo `password` en el cuerpo se ignora.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(custom = "validate_not_blank", length(max = 100))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

// Request para cambiar la contraseña
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    pub old_password: String,
    #[validate(length(min = 4, message = "La contraseña tiene que tener al menos 4 caracteres"))]
    pub new_password: String,
}
