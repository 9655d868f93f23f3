//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y los enums que lo describen.
//! Mapea a la tabla `cars`; los enums mapean a los ENUM de PostgreSQL.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest};
use crate::utils::validation::normalize_optional;

/// Marca del vehículo - mapea al ENUM car_brand
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "car_brand", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Brand {
    Acura,
    Audi,
    Bmw,
    Cadillac,
    Chevrolet,
    Dodge,
    Fiat,
    Ford,
    Gmc,
    Honda,
    Hyundai,
    Jeep,
    Lincoln,
    Mazda,
    Mercedes,
    Nissan,
    Ram,
    Tesla,
    Toyota,
    Volvo,
}

/// Tipo de vehículo - mapea al ENUM car_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "car_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    /// Turismo (pasajeros)
    Turismo,
    /// Furgoneta
    Furgoneta,
}

/// Estado del vehículo - mapea al ENUM car_condition
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "car_condition", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Usado,
    Nuevo,
}

/// Disponibilidad del vehículo - mapea al ENUM car_availability
///
/// La única transición forzada es `* -> Vendido` al registrar una venta
/// (ver `services::inventory_service`). El resto son ediciones normales.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "car_availability", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Disponible,
    Vendido,
    Reservado,
}

/// Vehicle principal - mapea a la tabla cars
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Uuid,
    pub vin: String,
    pub brand: Brand,
    pub model: Option<String>,
    #[serde(rename = "type")]
    pub car_type: VehicleType,
    pub year: i32,
    pub condition: Condition,
    pub km: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub buyed_when: NaiveDate,
    pub availability: Availability,
    pub img: Option<String>,
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    /// Construye un vehículo nuevo a partir de la petición de alta
    pub fn new(request: CreateVehicleRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            vin: request.vin.trim().to_string(),
            brand: request.brand,
            model: normalize_optional(request.model),
            car_type: request.car_type,
            year: request.year,
            condition: request.condition,
            km: request.km,
            price: request.price,
            buyed_when: request.buyed_when,
            availability: request.availability,
            img: normalize_optional(request.img),
            color: normalize_optional(request.color),
            created_at: now,
            updated_at: now,
        }
    }

    /// Aplica una actualización parcial. El `vin` es inmutable.
    pub fn apply_changes(&mut self, changes: &UpdateVehicleRequest) {
        if let Some(brand) = changes.brand {
            self.brand = brand;
        }
        if let Some(model) = &changes.model {
            self.model = normalize_optional(Some(model.clone()));
        }
        if let Some(car_type) = changes.car_type {
            self.car_type = car_type;
        }
        if let Some(year) = changes.year {
            self.year = year;
        }
        if let Some(condition) = changes.condition {
            self.condition = condition;
        }
        if let Some(km) = changes.km {
            self.km = km;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(buyed_when) = changes.buyed_when {
            self.buyed_when = buyed_when;
        }
        if let Some(availability) = changes.availability {
            self.availability = availability;
        }
        if let Some(img) = &changes.img {
            self.img = normalize_optional(img.clone());
        }
        if let Some(color) = &changes.color {
            self.color = normalize_optional(Some(color.clone()));
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::vehicle_controller::test_fixtures::car_request;

    #[test]
    fn test_enums_use_spanish_wire_values() {
        assert_eq!(serde_json::to_value(Availability::Vendido).unwrap(), "vendido");
        assert_eq!(serde_json::to_value(VehicleType::Furgoneta).unwrap(), "furgoneta");
        assert_eq!(serde_json::to_value(Brand::Mercedes).unwrap(), "mercedes");
        assert!(serde_json::from_value::<Brand>("lada".into()).is_err());
    }

    #[test]
    fn test_apply_changes_blank_text_clears_field() {
        let mut vehicle = Vehicle::new(car_request("V1", None));
        assert_eq!(vehicle.model.as_deref(), Some("Focus"));

        vehicle.apply_changes(&UpdateVehicleRequest {
            model: Some("   ".into()),
            color: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(vehicle.model, None);
        assert_eq!(vehicle.color, None);

        vehicle.apply_changes(&UpdateVehicleRequest {
            model: Some(" Fiesta ".into()),
            ..Default::default()
        });
        assert_eq!(vehicle.model.as_deref(), Some("Fiesta"));
        assert_eq!(vehicle.color, None);
    }
}
