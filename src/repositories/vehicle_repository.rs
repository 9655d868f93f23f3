use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{UpdatedVehicle, VehicleStore, VEHICLE_DUPLICATE, VEHICLE_NOT_FOUND};
use crate::dto::vehicle_dto::{UpdateVehicleRequest, VehicleFilters};
use crate::models::{Availability, Vehicle};
use crate::utils::errors::{map_unique_violation, AppError, AppResult};

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleStore for PgVehicleRepository {
    async fn find_all(&self, filters: &VehicleFilters) -> AppResult<Vec<Vehicle>> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM cars WHERE TRUE");
        if let Some(brand) = filters.brand {
            query.push(" AND brand = ").push_bind(brand);
        }
        if let Some(car_type) = filters.car_type {
            query.push(" AND car_type = ").push_bind(car_type);
        }
        if let Some(condition) = filters.condition {
            query.push(" AND condition = ").push_bind(condition);
        }
        if let Some(availability) = filters.availability {
            query.push(" AND availability = ").push_bind(availability);
        }
        query.push(" ORDER BY created_at DESC");

        let vehicles = query
            .build_query_as::<Vehicle>()
            .fetch_all(&self.pool)
            .await?;

        Ok(vehicles)
    }

    async fn find_by_vin(&self, vin: &str) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM cars WHERE vin = $1")
            .bind(vin)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM cars WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    async fn create(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        let created = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO cars (
                id, vin, brand, model, car_type, year, condition, km, price,
                buyed_when, availability, img, color, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(vehicle.id)
        .bind(&vehicle.vin)
        .bind(vehicle.brand)
        .bind(&vehicle.model)
        .bind(vehicle.car_type)
        .bind(vehicle.year)
        .bind(vehicle.condition)
        .bind(vehicle.km)
        .bind(vehicle.price)
        .bind(vehicle.buyed_when)
        .bind(vehicle.availability)
        .bind(&vehicle.img)
        .bind(&vehicle.color)
        .bind(vehicle.created_at)
        .bind(vehicle.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, VEHICLE_DUPLICATE))?;

        Ok(created)
    }

    async fn update(
        &self,
        vin: &str,
        changes: &UpdateVehicleRequest,
    ) -> AppResult<UpdatedVehicle> {
        // Bloquear la fila mientras se aplica la actualización parcial
        let mut tx = self.pool.begin().await?;

        let mut vehicle =
            sqlx::query_as::<_, Vehicle>("SELECT * FROM cars WHERE vin = $1 FOR UPDATE")
                .bind(vin)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound(VEHICLE_NOT_FOUND.to_string()))?;

        let previous_img = vehicle.img.clone();
        vehicle.apply_changes(changes);

        let updated = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE cars
            SET brand = $2, model = $3, car_type = $4, year = $5, condition = $6, km = $7,
                price = $8, buyed_when = $9, availability = $10, img = $11, color = $12,
                updated_at = $13
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(vehicle.id)
        .bind(vehicle.brand)
        .bind(&vehicle.model)
        .bind(vehicle.car_type)
        .bind(vehicle.year)
        .bind(vehicle.condition)
        .bind(vehicle.km)
        .bind(vehicle.price)
        .bind(vehicle.buyed_when)
        .bind(vehicle.availability)
        .bind(&vehicle.img)
        .bind(&vehicle.color)
        .bind(vehicle.updated_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(UpdatedVehicle {
            vehicle: updated,
            previous_img,
        })
    }

    async fn set_availability(&self, id: Uuid, availability: Availability) -> AppResult<Vehicle> {
        sqlx::query_as::<_, Vehicle>(
            "UPDATE cars SET availability = $2, updated_at = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(availability)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(VEHICLE_NOT_FOUND.to_string()))
    }

    async fn delete(&self, vin: &str) -> AppResult<Vehicle> {
        sqlx::query_as::<_, Vehicle>("DELETE FROM cars WHERE vin = $1 RETURNING *")
            .bind(vin)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(VEHICLE_NOT_FOUND.to_string()))
    }
}
