//! Modelo de Client

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::dto::client_dto::UpdateClientRequest;

/// Cliente del concesionario - mapea a la tabla clients.
///
/// El `id` lo asigna el almacén como `max(id) + 1`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub preferences: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Client {
    pub fn apply_changes(&mut self, changes: &UpdateClientRequest) {
        if let Some(name) = &changes.name {
            self.name = name.trim().to_string();
        }
        if let Some(email) = &changes.email {
            self.email = email.trim().to_string();
        }
        if let Some(preferences) = &changes.preferences {
            self.preferences = Some(preferences.trim().to_string());
        }
        self.updated_at = Utc::now();
    }
}
