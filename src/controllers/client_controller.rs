use std::sync::Arc;

use tracing::info;

use crate::dto::client_dto::{CreateClientRequest, UpdateClientRequest};
use crate::models::Client;
use crate::repositories::{ClientStore, CLIENT_DUPLICATE, CLIENT_NOT_FOUND};
use crate::services::reference_guard::ReferentialIntegrityGuard;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub struct ClientController {
    clients: Arc<dyn ClientStore>,
    guard: ReferentialIntegrityGuard,
}

impl ClientController {
    pub fn new(state: &AppState) -> Self {
        Self {
            clients: state.clients.clone(),
            guard: ReferentialIntegrityGuard::new(state.sales.clone()),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<Client>> {
        self.clients.find_all().await
    }

    pub async fn get(&self, id: i32) -> AppResult<Client> {
        self.clients
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(CLIENT_NOT_FOUND.to_string()))
    }

    pub async fn create(&self, request: CreateClientRequest) -> AppResult<Client> {
        if self.clients.email_in_use(request.email.trim(), None).await? {
            return Err(AppError::DuplicateKey(CLIENT_DUPLICATE.to_string()));
        }

        let client = self.clients.create(&request).await?;
        info!("👤 Cliente {} creado", client.id);
        Ok(client)
    }

    pub async fn update(&self, id: i32, changes: UpdateClientRequest) -> AppResult<Client> {
        self.get(id).await?;

        if let Some(email) = &changes.email {
            if self.clients.email_in_use(email.trim(), Some(id)).await? {
                return Err(AppError::DuplicateKey(CLIENT_DUPLICATE.to_string()));
            }
        }

        self.clients.update(id, &changes).await
    }

    /// Solo se borra si ninguna venta referencia al cliente
    pub async fn delete(&self, id: i32) -> AppResult<Client> {
        self.get(id).await?;
        self.guard.ensure_client_unreferenced(id).await?;

        let deleted = self.clients.delete(id).await?;
        info!("🗑️ Cliente {} eliminado", deleted.id);
        Ok(deleted)
    }
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    use crate::dto::client_dto::CreateClientRequest;

    pub fn client_request(name: &str, email: &str) -> CreateClientRequest {
        CreateClientRequest {
            name: name.to_string(),
            email: email.to_string(),
            preferences: Some("SUV familiar".into()),
        }
    }
}
