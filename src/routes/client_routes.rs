use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::ClientController;
use crate::dto::client_dto::{CreateClientRequest, UpdateClientRequest};
use crate::middleware::AuthUser;
use crate::models::Client;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{ValidatedJson, ValidatedPath};

pub fn create_client_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_clients).post(create_client))
        .route(
            "/:id",
            get(get_client).put(update_client).delete(delete_client),
        )
}

async fn list_clients(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<Vec<Client>>, AppError> {
    Ok(Json(ClientController::new(&state).list().await?))
}

async fn get_client(
    State(state): State<AppState>,
    _user: AuthUser,
    ValidatedPath(id): ValidatedPath<i32>,
) -> Result<Json<Client>, AppError> {
    Ok(Json(ClientController::new(&state).get(id).await?))
}

async fn create_client(
    State(state): State<AppState>,
    _user: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateClientRequest>,
) -> Result<(StatusCode, Json<Client>), AppError> {
    let client = ClientController::new(&state).create(request).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

async fn update_client(
    State(state): State<AppState>,
    _user: AuthUser,
    ValidatedPath(id): ValidatedPath<i32>,
    ValidatedJson(changes): ValidatedJson<UpdateClientRequest>,
) -> Result<Json<Client>, AppError> {
    Ok(Json(ClientController::new(&state).update(id, changes).await?))
}

async fn delete_client(
    State(state): State<AppState>,
    _user: AuthUser,
    ValidatedPath(id): ValidatedPath<i32>,
) -> Result<Json<Client>, AppError> {
    Ok(Json(ClientController::new(&state).delete(id).await?))
}
