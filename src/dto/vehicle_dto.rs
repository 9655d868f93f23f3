use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::models::vehicle::{Availability, Brand, Condition, VehicleType};
use crate::utils::validation::{deserialize_present, validate_non_negative_price, validate_not_blank};

// Request para crear un vehículo
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    #[validate(custom = "validate_not_blank", length(max = 32))]
    pub vin: String,
    pub brand: Brand,
    #[validate(length(max = 100))]
    pub model: Option<String>,
    #[serde(rename = "type")]
    pub car_type: VehicleType,
    #[validate(range(min = 1886, max = 2100))]
    pub year: i32,
    pub condition: Condition,
    #[validate(range(min = 0))]
    pub km: i32,
    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom = "validate_non_negative_price")]
    pub price: Decimal,
    pub buyed_when: NaiveDate,
    pub availability: Availability,
    pub img: Option<String>,
    #[validate(length(max = 50))]
    pub color: Option<String>,
}

// Request para actualizar un vehículo: todos los campos son opcionales.
// `img` a null o "" borra la imagen; el `vin` no se puede cambiar.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    pub brand: Option<Brand>,
    #[validate(length(max = 100))]
    pub model: Option<String>,
    #[serde(rename = "type")]
    pub car_type: Option<VehicleType>,
    #[validate(range(min = 1886, max = 2100))]
    pub year: Option<i32>,
    pub condition: Option<Condition>,
    #[validate(range(min = 0))]
    pub km: Option<i32>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[validate(custom = "validate_non_negative_price")]
    pub price: Option<Decimal>,
    pub buyed_when: Option<NaiveDate>,
    pub availability: Option<Availability>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub img: Option<Option<String>>,
    #[validate(length(max = 50))]
    pub color: Option<String>,
}

impl UpdateVehicleRequest {
    /// Nueva imagen aportada en la petición, si la hay
    pub fn new_image(&self) -> Option<&str> {
        match &self.img {
            Some(Some(img)) if !img.trim().is_empty() => Some(img.as_str()),
            _ => None,
        }
    }

    /// `true` si la petición toca la imagen (reemplazo o borrado)
    pub fn touches_image(&self) -> bool {
        self.img.is_some()
    }
}

// Filtros para el listado de vehículos
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleFilters {
    pub brand: Option<Brand>,
    #[serde(rename = "type")]
    pub car_type: Option<VehicleType>,
    pub condition: Option<Condition>,
    pub availability: Option<Availability>,
}

impl VehicleFilters {
    pub fn matches(&self, vehicle: &crate::models::Vehicle) -> bool {
        self.brand.map_or(true, |b| vehicle.brand == b)
            && self.car_type.map_or(true, |t| vehicle.car_type == t)
            && self.condition.map_or(true, |c| vehicle.condition == c)
            && self.availability.map_or(true, |a| vehicle.availability == a)
    }
}
