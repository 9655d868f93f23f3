use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::validate_not_blank;

// Request para registrar un cliente (el id lo asigna el sistema)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateClientRequest {
    #[validate(custom = "validate_not_blank", length(max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 500))]
    pub preferences: Option<String>,
}

// Request para actualizar un cliente
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateClientRequest {
    #[validate(custom = "validate_not_blank", length(max = 100))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 500))]
    pub preferences: Option<String>,
}
