use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::warn;

use super::{ClientStore, CLIENT_DUPLICATE, CLIENT_NOT_FOUND};
use crate::dto::client_dto::{CreateClientRequest, UpdateClientRequest};
use crate::models::Client;
use crate::utils::errors::{map_unique_violation, AppError, AppResult};

/// Reintentos si dos altas concurrentes calculan el mismo id
const MAX_ID_ATTEMPTS: usize = 5;
const CLIENTS_PKEY: &str = "clients_pkey";

pub struct PgClientRepository {
    pool: PgPool,
}

impl PgClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_id_collision(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Database(db) => {
            db.is_unique_violation() && db.constraint() == Some(CLIENTS_PKEY)
        }
        _ => false,
    }
}

#[async_trait]
impl ClientStore for PgClientRepository {
    async fn find_all(&self) -> AppResult<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>("SELECT * FROM clients ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(clients)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Client>> {
        let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(client)
    }

    async fn email_in_use(&self, email: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM clients WHERE email = $1 AND ($2::INTEGER IS NULL OR id <> $2))",
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    async fn create(&self, request: &CreateClientRequest) -> AppResult<Client> {
        let now = Utc::now();
        let preferences = request.preferences.as_deref().map(str::trim);

        // El siguiente id se calcula dentro del propio INSERT; si otra alta
        // concurrente se lleva el mismo id, la PK lo rechaza y se reintenta.
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let result = sqlx::query_as::<_, Client>(
                r#"
                INSERT INTO clients (id, name, email, preferences, created_at, updated_at)
                SELECT COALESCE(MAX(id), 0) + 1, $1, $2, $3, $4, $4 FROM clients
                RETURNING *
                "#,
            )
            .bind(request.name.trim())
            .bind(request.email.trim())
            .bind(preferences)
            .bind(now)
            .fetch_one(&self.pool)
            .await;

            match result {
                Ok(client) => return Ok(client),
                Err(e) if is_id_collision(&e) => {
                    warn!("⚠️ Colisión de id de cliente (intento {}), reintentando", attempt);
                }
                Err(e) => return Err(map_unique_violation(e, CLIENT_DUPLICATE)),
            }
        }

        Err(AppError::Internal(
            "No se pudo asignar un id de cliente".to_string(),
        ))
    }

    async fn update(&self, id: i32, changes: &UpdateClientRequest) -> AppResult<Client> {
        let mut tx = self.pool.begin().await?;

        let mut client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(CLIENT_NOT_FOUND.to_string()))?;

        client.apply_changes(changes);

        let updated = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET name = $2, email = $3, preferences = $4, updated_at = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(client.id)
        .bind(&client.name)
        .bind(&client.email)
        .bind(&client.preferences)
        .bind(client.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, CLIENT_DUPLICATE))?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete(&self, id: i32) -> AppResult<Client> {
        sqlx::query_as::<_, Client>("DELETE FROM clients WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(CLIENT_NOT_FOUND.to_string()))
    }
}
