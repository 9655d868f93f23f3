use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::VehicleController;
use crate::dto::auth_dto::MessageResponse;
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleFilters};
use crate::middleware::AuthUser;
use crate::models::Vehicle;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{ValidatedJson, ValidatedPath, ValidatedQuery};

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route(
            "/:vin",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
}

// Listado público, filtrable por marca, tipo, estado y disponibilidad
async fn list_vehicles(
    State(state): State<AppState>,
    ValidatedQuery(filters): ValidatedQuery<VehicleFilters>,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    let controller = VehicleController::new(&state);
    Ok(Json(controller.list(&filters).await?))
}

async fn get_vehicle(
    State(state): State<AppState>,
    _user: AuthUser,
    ValidatedPath(vin): ValidatedPath<String>,
) -> Result<Json<Vehicle>, AppError> {
    let controller = VehicleController::new(&state);
    Ok(Json(controller.get(&vin).await?))
}

async fn create_vehicle(
    State(state): State<AppState>,
    _user: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<Vehicle>), AppError> {
    let controller = VehicleController::new(&state);
    let vehicle = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

async fn update_vehicle(
    State(state): State<AppState>,
    _user: AuthUser,
    ValidatedPath(vin): ValidatedPath<String>,
    ValidatedJson(changes): ValidatedJson<UpdateVehicleRequest>,
) -> Result<Json<Vehicle>, AppError> {
    let controller = VehicleController::new(&state);
    Ok(Json(controller.update(&vin, changes).await?))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    _user: AuthUser,
    ValidatedPath(vin): ValidatedPath<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let controller = VehicleController::new(&state);
    let deleted = controller.delete(&vin).await?;
    Ok(Json(MessageResponse::new(format!(
        "Coche {} eliminado",
        deleted.vin
    ))))
}
