//! Máquina de estados del inventario
//!
//! Estados: `disponible`, `reservado`, `vendido`. La única regla dura es que
//! una venta registrada fuerza el coche a `vendido`, sea cual sea su estado
//! anterior. Cualquier otro cambio es una edición normal del coche sin guardas.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::models::{Availability, Vehicle};
use crate::repositories::VehicleStore;
use crate::utils::errors::AppResult;

pub struct InventoryService {
    vehicles: Arc<dyn VehicleStore>,
}

impl InventoryService {
    pub fn new(vehicles: Arc<dyn VehicleStore>) -> Self {
        Self { vehicles }
    }

    /// Marca el coche como vendido tras registrar una venta
    pub async fn record_sale(&self, vehicle_id: Uuid) -> AppResult<Vehicle> {
        let vehicle = self
            .vehicles
            .set_availability(vehicle_id, Availability::Vendido)
            .await?;
        info!("🚗 Coche {} marcado como vendido", vehicle.vin);
        Ok(vehicle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::vehicle_dto::CreateVehicleRequest;
    use crate::models::{Brand, Condition, VehicleType};
    use crate::repositories::InMemoryStore;
    use crate::utils::errors::AppError;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn vehicle(vin: &str, availability: Availability) -> Vehicle {
        Vehicle::new(CreateVehicleRequest {
            vin: vin.to_string(),
            brand: Brand::Toyota,
            model: Some("Corolla".into()),
            car_type: VehicleType::Turismo,
            year: 2020,
            condition: Condition::Usado,
            km: 42_000,
            price: Decimal::new(15_000, 0),
            buyed_when: NaiveDate::from_ymd_opt(2023, 5, 1).unwrap(),
            availability,
            img: None,
            color: None,
        })
    }

    #[tokio::test]
    async fn test_sale_forces_vendido_from_any_state() {
        let store = Arc::new(InMemoryStore::new());
        let service = InventoryService::new(store.clone());

        for (vin, prior) in [
            ("VIN-D", Availability::Disponible),
            ("VIN-R", Availability::Reservado),
            ("VIN-V", Availability::Vendido),
        ] {
            let created = VehicleStore::create(store.as_ref(), &vehicle(vin, prior)).await.unwrap();
            let sold = service.record_sale(created.id).await.unwrap();
            assert_eq!(sold.availability, Availability::Vendido);
        }
    }

    #[tokio::test]
    async fn test_missing_vehicle_is_not_found() {
        let service = InventoryService::new(Arc::new(InMemoryStore::new()));
        let result = service.record_sale(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
