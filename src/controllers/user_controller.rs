use std::sync::Arc;

use bcrypt::{hash, verify};
use tracing::{info, warn};
use uuid::Uuid;

use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::dto::user_dto::{RegisterUserRequest, UpdatePasswordRequest, UpdateUserRequest};
use crate::models::User;
use crate::repositories::{UserStore, USER_DUPLICATE, USER_NOT_FOUND};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::jwt::{generate_token, JwtConfig};

const BAD_CREDENTIALS: &str = "Contraseña o usuario incorrectos";
const WRONG_PASSWORD: &str = "La contraseña es incorrecta";

pub struct UserController {
    users: Arc<dyn UserStore>,
    jwt: JwtConfig,
    password_cost: u32,
}

impl UserController {
    pub fn new(state: &AppState) -> Self {
        Self {
            users: state.users.clone(),
            jwt: state.jwt.clone(),
            password_cost: state.password_cost,
        }
    }

    fn hash_password(&self, password: &str) -> AppResult<String> {
        hash(password, self.password_cost)
            .map_err(|e| AppError::Internal(format!("Error hasheando contraseña: {}", e)))
    }

    /// Solo el propio usuario puede modificarse o borrarse
    fn ensure_owner(caller: &User, id: Uuid) -> AppResult<()> {
        if caller.id != id {
            warn!("🚫 Usuario {} intentó modificar al usuario {}", caller.id, id);
            return Err(AppError::Unauthorized("Unauthorized".to_string()));
        }
        Ok(())
    }

    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.users.find_all().await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))
    }

    pub async fn register(&self, request: RegisterUserRequest) -> AppResult<User> {
        let email = request.email.trim();
        if self.users.find_by_email(email).await?.is_some() {
            return Err(AppError::DuplicateKey(USER_DUPLICATE.to_string()));
        }

        let password_hash = self.hash_password(&request.password)?;
        let user = self
            .users
            .create(&User::new(request.name, email.to_string(), password_hash))
            .await?;

        info!("👤 Usuario {} registrado", user.email);
        Ok(user)
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        let user = self
            .users
            .find_by_email(request.email.trim())
            .await?
            .ok_or_else(|| AppError::BadRequest(BAD_CREDENTIALS.to_string()))?;

        // Un hash corrupto cuenta como credenciales incorrectas
        if !verify(&request.password, &user.password_hash).unwrap_or(false) {
            return Err(AppError::BadRequest(BAD_CREDENTIALS.to_string()));
        }

        let token = generate_token(user.id, &self.jwt)?;
        info!("🔐 Login correcto de {}", user.email);
        Ok(LoginResponse { token, user })
    }

    /// Actualiza nombre y email; la contraseña nunca se toca aquí
    pub async fn update(&self, caller: &User, id: Uuid, changes: UpdateUserRequest) -> AppResult<User> {
        Self::ensure_owner(caller, id)?;
        self.get(id).await?;

        if let Some(email) = &changes.email {
            if let Some(other) = self.users.find_by_email(email.trim()).await? {
                if other.id != id {
                    return Err(AppError::DuplicateKey(USER_DUPLICATE.to_string()));
                }
            }
        }

        self.users.update(id, &changes).await
    }

    pub async fn change_password(
        &self,
        caller: &User,
        id: Uuid,
        request: UpdatePasswordRequest,
    ) -> AppResult<User> {
        Self::ensure_owner(caller, id)?;
        let user = self.get(id).await?;

        if !verify(&request.old_password, &user.password_hash).unwrap_or(false) {
            return Err(AppError::BadRequest(WRONG_PASSWORD.to_string()));
        }

        let password_hash = self.hash_password(&request.new_password)?;
        let updated = self.users.update_password(id, &password_hash).await?;
        info!("🔑 Contraseña actualizada para {}", updated.email);
        Ok(updated)
    }

    pub async fn delete(&self, caller: &User, id: Uuid) -> AppResult<User> {
        Self::ensure_owner(caller, id)?;
        let deleted = self.users.delete(id).await?;
        info!("🗑️ Usuario {} eliminado", deleted.email);
        Ok(deleted)
    }
}
