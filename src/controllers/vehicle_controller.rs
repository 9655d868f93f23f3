use std::sync::Arc;

use tracing::info;

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleFilters};
use crate::models::Vehicle;
use crate::repositories::{UpdatedVehicle, VehicleStore, VEHICLE_DUPLICATE, VEHICLE_NOT_FOUND};
use crate::services::image_service::{release_image, ImageStore};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub struct VehicleController {
    vehicles: Arc<dyn VehicleStore>,
    images: Arc<dyn ImageStore>,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            vehicles: state.vehicles.clone(),
            images: state.images.clone(),
        }
    }

    pub async fn list(&self, filters: &VehicleFilters) -> AppResult<Vec<Vehicle>> {
        self.vehicles.find_all(filters).await
    }

    pub async fn get(&self, vin: &str) -> AppResult<Vehicle> {
        self.vehicles
            .find_by_vin(vin)
            .await?
            .ok_or_else(|| AppError::NotFound(VEHICLE_NOT_FOUND.to_string()))
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> AppResult<Vehicle> {
        // Si el vin ya existe, la imagen subida no se va a usar
        if self.vehicles.find_by_vin(request.vin.trim()).await?.is_some() {
            release_image(self.images.as_ref(), request.img.as_deref()).await;
            return Err(AppError::DuplicateKey(VEHICLE_DUPLICATE.to_string()));
        }

        let vehicle = Vehicle::new(request);
        match self.vehicles.create(&vehicle).await {
            Ok(created) => {
                info!("🚗 Coche {} creado", created.vin);
                Ok(created)
            }
            Err(e) => {
                release_image(self.images.as_ref(), vehicle.img.as_deref()).await;
                Err(e)
            }
        }
    }

    /// Actualización parcial. Una imagen nueva reemplaza la anterior y
    /// `img` vacío o null la borra. Se libera la imagen que el store
    /// reemplazó de verdad, y solo si la actualización se guardó.
    pub async fn update(&self, vin: &str, changes: UpdateVehicleRequest) -> AppResult<Vehicle> {
        let UpdatedVehicle {
            vehicle: updated,
            previous_img,
        } = match self.vehicles.update(vin, &changes).await {
            Ok(result) => result,
            Err(e) => {
                // Incluye NotFound: la imagen subida no se va a usar
                release_image(self.images.as_ref(), changes.new_image()).await;
                return Err(e);
            }
        };

        if changes.touches_image() && previous_img.is_some() && previous_img != updated.img {
            release_image(self.images.as_ref(), previous_img.as_deref()).await;
        }

        info!("✏️ Coche {} actualizado", updated.vin);
        Ok(updated)
    }

    /// Borra el coche sin mirar las ventas que lo referencian
    pub async fn delete(&self, vin: &str) -> AppResult<Vehicle> {
        let deleted = self.vehicles.delete(vin).await?;
        release_image(self.images.as_ref(), deleted.img.as_deref()).await;
        info!("🗑️ Coche {} eliminado", deleted.vin);
        Ok(deleted)
    }
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::dto::vehicle_dto::CreateVehicleRequest;
    use crate::models::{Availability, Brand, Condition, VehicleType};

    pub fn car_request(vin: &str, img: Option<&str>) -> CreateVehicleRequest {
        CreateVehicleRequest {
            vin: vin.to_string(),
            brand: Brand::Ford,
            model: Some("Focus".into()),
            car_type: VehicleType::Turismo,
            year: 2019,
            condition: Condition::Usado,
            km: 61_250,
            price: Decimal::new(1_250_000, 2),
            buyed_when: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            availability: Availability::Disponible,
            img: img.map(str::to_string),
            color: Some("gris".into()),
        }
    }
}
