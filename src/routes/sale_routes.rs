use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::SaleController;
use crate::dto::sale_dto::{CreateSaleRequest, UpdateSaleRequest};
use crate::middleware::AuthUser;
use crate::models::{Sale, SaleDetail};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{ValidatedJson, ValidatedPath};

pub fn create_sale_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sales).post(create_sale))
        .route("/:id", get(get_sale).put(update_sale).delete(delete_sale))
}

async fn list_sales(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<Vec<SaleDetail>>, AppError> {
    Ok(Json(SaleController::new(&state).list().await?))
}

async fn get_sale(
    State(state): State<AppState>,
    _user: AuthUser,
    ValidatedPath(id): ValidatedPath<i32>,
) -> Result<Json<SaleDetail>, AppError> {
    Ok(Json(SaleController::new(&state).get(id).await?))
}

async fn create_sale(
    State(state): State<AppState>,
    _user: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateSaleRequest>,
) -> Result<(StatusCode, Json<SaleDetail>), AppError> {
    let sale = SaleController::new(&state).create(request).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

async fn update_sale(
    State(state): State<AppState>,
    _user: AuthUser,
    ValidatedPath(id): ValidatedPath<i32>,
    ValidatedJson(changes): ValidatedJson<UpdateSaleRequest>,
) -> Result<Json<SaleDetail>, AppError> {
    Ok(Json(SaleController::new(&state).update(id, changes).await?))
}

async fn delete_sale(
    State(state): State<AppState>,
    _user: AuthUser,
    ValidatedPath(id): ValidatedPath<i32>,
) -> Result<Json<Sale>, AppError> {
    Ok(Json(SaleController::new(&state).delete(id).await?))
}
