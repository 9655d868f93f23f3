use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::UserController;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, MessageResponse};
use crate::dto::user_dto::{RegisterUserRequest, UpdatePasswordRequest, UpdateUserRequest};
use crate::middleware::AuthUser;
use crate::models::User;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{ValidatedJson, ValidatedPath};

pub fn create_user_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/", get(list_users))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/:id/password", put(update_password))
}

async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    Ok(Json(UserController::new(&state).login(request).await?))
}

// Solo un usuario con sesión puede dar de alta a otro
async fn register(
    State(state): State<AppState>,
    _user: AuthUser,
    ValidatedJson(request): ValidatedJson<RegisterUserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = UserController::new(&state).register(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn list_users(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(UserController::new(&state).list().await?))
}

async fn get_user(
    State(state): State<AppState>,
    _user: AuthUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<User>, AppError> {
    Ok(Json(UserController::new(&state).get(id).await?))
}

async fn update_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(changes): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<User>, AppError> {
    Ok(Json(UserController::new(&state).update(&caller, id, changes).await?))
}

async fn update_password(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdatePasswordRequest>,
) -> Result<Json<User>, AppError> {
    let user = UserController::new(&state)
        .change_password(&caller, id, request)
        .await?;
    Ok(Json(user))
}

async fn delete_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let deleted = UserController::new(&state).delete(&caller, id).await?;
    Ok(Json(MessageResponse::new(format!(
        "Se ha eliminado el usuario {}",
        deleted.email
    ))))
}
