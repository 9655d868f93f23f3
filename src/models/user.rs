//! Modelo de User
//!
//! Usuarios del concesionario (empleados que inician sesión).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::dto::user_dto::UpdateUserRequest;

/// User - mapea a la tabla users
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// Nunca toca la contraseña; para eso existe el cambio de contraseña
    pub fn apply_changes(&mut self, changes: &UpdateUserRequest) {
        if let Some(name) = &changes.name {
            self.name = name.trim().to_string();
        }
        if let Some(email) = &changes.email {
            self.email = email.trim().to_string();
        }
        self.updated_at = Utc::now();
    }
}
