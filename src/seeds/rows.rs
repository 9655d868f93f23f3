//! Filas de los CSV de demostración y su limpieza
//!
//! Las cabeceras son las de las hojas exportadas por el concesionario. Los
//! importes llegan como "$15.000" y los kilometrajes como "12.345 km".

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::de::{value::StrDeserializer, DeserializeOwned, IntoDeserializer};
use serde::Deserialize;
use validator::Validate;

use crate::dto::client_dto::CreateClientRequest;
use crate::dto::sale_dto::CreateSaleRequest;
use crate::dto::vehicle_dto::CreateVehicleRequest;
use crate::models::{Client, Vehicle};
use crate::utils::validation::normalize_optional;

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

#[derive(Debug, Deserialize)]
pub struct CarRow {
    #[serde(rename = "Número de identificación del vehículo (VIN)")]
    pub vin: String,
    #[serde(rename = "Marca")]
    pub brand: String,
    #[serde(rename = "Modelo", default)]
    pub model: String,
    #[serde(rename = "Tipo de vehículo")]
    pub car_type: String,
    #[serde(rename = "Año de fabricación")]
    pub year: String,
    #[serde(rename = "Estado")]
    pub condition: String,
    #[serde(rename = "Kilometraje")]
    pub km: String,
    #[serde(rename = "Precio de venta")]
    pub price: String,
    #[serde(rename = "Fecha de adquisición")]
    pub buyed_when: String,
    #[serde(rename = "Estado del vehículo")]
    pub availability: String,
    #[serde(rename = "Imagen", default)]
    pub img: String,
    #[serde(rename = "Color", default)]
    pub color: String,
}

#[derive(Debug, Deserialize)]
pub struct ClientRow {
    #[serde(rename = "ID cliente")]
    pub id: String,
    #[serde(rename = "Nombre del cliente")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Preferencias del cliente", default)]
    pub preferences: String,
}

#[derive(Debug, Deserialize)]
pub struct SaleRow {
    #[serde(rename = "ID venta")]
    pub id: String,
    #[serde(rename = "Vehículo vendido")]
    pub vin: String,
    #[serde(rename = "Cliente asociado")]
    pub client: String,
    #[serde(rename = "Fecha de venta", default)]
    pub date: String,
    #[serde(rename = "Método de pago")]
    pub payment: String,
    #[serde(rename = "Fecha de entrega", default)]
    pub delivery: String,
}

impl CarRow {
    pub fn into_vehicle(self) -> Result<Vehicle, String> {
        let request = CreateVehicleRequest {
            vin: self.vin.trim().to_string(),
            brand: parse_enum("Marca", &self.brand)?,
            model: Some(self.model),
            car_type: parse_enum("Tipo de vehículo", &self.car_type)?,
            year: parse_integer("Año de fabricación", &self.year)?,
            condition: parse_enum("Estado", &self.condition)?,
            km: parse_km(&self.km)?,
            price: parse_price(&self.price)?,
            buyed_when: parse_date("Fecha de adquisición", &self.buyed_when)?,
            availability: parse_enum("Estado del vehículo", &self.availability)?,
            img: Some(self.img),
            color: Some(self.color),
        };
        request.validate().map_err(|e| e.to_string())?;
        Ok(Vehicle::new(request))
    }
}

impl ClientRow {
    /// El id viene en el CSV: las ventas lo referencian
    pub fn into_client(self) -> Result<Client, String> {
        let id: i32 = parse_integer("ID cliente", &self.id)?;
        if id < 1 {
            return Err(format!("ID cliente no válido: {}", id));
        }
        let request = CreateClientRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            preferences: normalize_optional(Some(self.preferences)),
        };
        request.validate().map_err(|e| e.to_string())?;

        let now = Utc::now();
        Ok(Client {
            id,
            name: request.name,
            email: request.email,
            preferences: request.preferences,
            created_at: now,
            updated_at: now,
        })
    }
}

impl SaleRow {
    /// Deja el vin sin resolver; lo traduce quien conoce los coches insertados.
    /// Sin fecha de venta o de entrega se usa la de hoy.
    pub fn into_request(self, car: uuid::Uuid) -> Result<CreateSaleRequest, String> {
        let today = Utc::now().date_naive();
        let request = CreateSaleRequest {
            id: parse_integer("ID venta", &self.id)?,
            car,
            client: parse_integer("Cliente asociado", &self.client)?,
            date: parse_optional_date("Fecha de venta", &self.date)?.unwrap_or(today),
            payment: parse_enum("Método de pago", &self.payment)?,
            delivery: parse_optional_date("Fecha de entrega", &self.delivery)?.unwrap_or(today),
        };
        request.validate().map_err(|e| e.to_string())?;
        Ok(request)
    }
}

/// Valores de enum en minúsculas, igual que en la API
pub fn parse_enum<T: DeserializeOwned>(field: &str, raw: &str) -> Result<T, String> {
    let value = raw.trim().to_lowercase();
    let deserializer: StrDeserializer<'_, serde::de::value::Error> =
        value.as_str().into_deserializer();
    T::deserialize(deserializer).map_err(|_| format!("{} desconocido: '{}'", field, raw.trim()))
}

fn parse_integer(field: &str, raw: &str) -> Result<i32, String> {
    raw.trim()
        .parse()
        .map_err(|_| format!("{} no es un número: '{}'", field, raw.trim()))
}

/// "12.345 km" -> 12345
pub fn parse_km(raw: &str) -> Result<i32, String> {
    let digits = raw.trim().trim_end_matches("km").trim().replace('.', "");
    parse_integer("Kilometraje", &digits)
}

/// "$15.000" -> 15000, "$15.000,50" -> 15000.50
pub fn parse_price(raw: &str) -> Result<Decimal, String> {
    let cleaned = raw
        .trim()
        .trim_start_matches('$')
        .trim()
        .replace('.', "")
        .replace(',', ".");
    cleaned
        .parse::<Decimal>()
        .map_err(|_| format!("Precio de venta no válido: '{}'", raw.trim()))
}

pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, String> {
    parse_optional_date(field, raw)?.ok_or_else(|| format!("{} vacía", field))
}

fn parse_optional_date(field: &str, raw: &str) -> Result<Option<NaiveDate>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .map(Some)
        .ok_or_else(|| format!("{} no es una fecha: '{}'", field, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Availability, Brand, PaymentMethod, VehicleType};

    fn car_row() -> CarRow {
        CarRow {
            vin: " 1HGCM82633A004352 ".into(),
            brand: "Honda".into(),
            model: "Civic".into(),
            car_type: "Turismo".into(),
            year: "2018".into(),
            condition: "Usado".into(),
            km: "84.500 km".into(),
            price: "$12.900".into(),
            buyed_when: "2023-03-14".into(),
            availability: "Disponible".into(),
            img: String::new(),
            color: "Azul".into(),
        }
    }

    #[test]
    fn test_car_row_is_cleaned() {
        let vehicle = car_row().into_vehicle().unwrap();
        assert_eq!(vehicle.vin, "1HGCM82633A004352");
        assert_eq!(vehicle.brand, Brand::Honda);
        assert_eq!(vehicle.car_type, VehicleType::Turismo);
        assert_eq!(vehicle.km, 84_500);
        assert_eq!(vehicle.price, Decimal::new(12_900, 0));
        assert_eq!(vehicle.availability, Availability::Disponible);
        assert_eq!(vehicle.img, None);
        assert_eq!(vehicle.color.as_deref(), Some("Azul"));
    }

    #[test]
    fn test_car_row_with_unknown_brand_fails() {
        let mut row = car_row();
        row.brand = "Lada".into();
        let err = row.into_vehicle().unwrap_err();
        assert!(err.contains("Marca"));
    }

    #[test]
    fn test_number_formats() {
        assert_eq!(parse_km("0 km").unwrap(), 0);
        assert_eq!(parse_km("1.250.000").unwrap(), 1_250_000);
        assert!(parse_km("mucho").is_err());
        assert_eq!(parse_price("$ 7.500,50").unwrap(), Decimal::new(750_050, 2));
        assert!(parse_price("gratis").is_err());
    }

    #[test]
    fn test_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();
        assert_eq!(parse_date("Fecha", "2024-05-03").unwrap(), expected);
        assert_eq!(parse_date("Fecha", "05/03/2024").unwrap(), expected);
        assert!(parse_date("Fecha", "").is_err());
        assert!(parse_date("Fecha", "ayer").is_err());
    }

    #[test]
    fn test_payment_method_keeps_accents() {
        let payment: PaymentMethod = parse_enum("Método de pago", " Transacción Bancaria ").unwrap();
        assert_eq!(payment, PaymentMethod::TransaccionBancaria);
    }

    #[test]
    fn test_sale_row_without_dates_uses_today() {
        let row = SaleRow {
            id: "4".into(),
            vin: "V1".into(),
            client: "2".into(),
            date: String::new(),
            payment: "efectivo".into(),
            delivery: String::new(),
        };
        let request = row.into_request(uuid::Uuid::new_v4()).unwrap();
        let today = Utc::now().date_naive();
        assert_eq!(request.id, 4);
        assert_eq!(request.client, 2);
        assert_eq!(request.date, today);
        assert_eq!(request.delivery, today);
    }
}
