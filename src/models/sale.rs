//! Modelo de Sale
//!
//! `Sale` es el registro persistido (referencias por identidad interna) y
//! `SaleDetail` la vista con coche y cliente expandidos que devuelve la API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use crate::dto::sale_dto::{CreateSaleRequest, UpdateSaleRequest};
use crate::models::{client::Client, vehicle::Vehicle};

/// Método de pago - mapea al ENUM payment_method
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "payment_method")]
pub enum PaymentMethod {
    #[serde(rename = "transacción bancaria")]
    #[sqlx(rename = "transacción bancaria")]
    TransaccionBancaria,
    #[serde(rename = "efectivo")]
    #[sqlx(rename = "efectivo")]
    Efectivo,
    #[serde(rename = "financiación")]
    #[sqlx(rename = "financiación")]
    Financiacion,
}

/// Venta persistida - mapea a la tabla sales
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i32,
    #[serde(rename = "car")]
    pub car_id: Uuid,
    #[serde(rename = "client")]
    pub client_id: i32,
    #[serde(rename = "date")]
    pub sale_date: NaiveDate,
    pub payment: PaymentMethod,
    pub delivery: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Sale {
    pub fn new(request: &CreateSaleRequest) -> Self {
        let now = Utc::now();
        Self {
            id: request.id,
            car_id: request.car,
            client_id: request.client,
            sale_date: request.date,
            payment: request.payment,
            delivery: request.delivery,
            created_at: now,
            updated_at: now,
        }
    }

    /// Las referencias no se revalidan al actualizar
    pub fn apply_changes(&mut self, changes: &UpdateSaleRequest) {
        if let Some(car) = changes.car {
            self.car_id = car;
        }
        if let Some(client) = changes.client {
            self.client_id = client;
        }
        if let Some(date) = changes.date {
            self.sale_date = date;
        }
        if let Some(payment) = changes.payment {
            self.payment = payment;
        }
        if let Some(delivery) = changes.delivery {
            self.delivery = delivery;
        }
        self.updated_at = Utc::now();
    }
}

/// Venta con sus referencias expandidas.
///
/// `car`/`client` son `None` si el registro referenciado ya no existe
/// (el borrado de coches no comprueba ventas).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SaleDetail {
    pub id: i32,
    pub car: Option<Vehicle>,
    pub client: Option<Client>,
    pub date: NaiveDate,
    pub payment: PaymentMethod,
    pub delivery: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SaleDetail {
    pub fn expand(sale: Sale, car: Option<Vehicle>, client: Option<Client>) -> Self {
        Self {
            id: sale.id,
            car,
            client,
            date: sale.sale_date,
            payment: sale.payment,
            delivery: sale.delivery,
            created_at: sale.created_at,
            updated_at: sale.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_wire_values() {
        assert_eq!(
            serde_json::to_value(PaymentMethod::TransaccionBancaria).unwrap(),
            "transacción bancaria"
        );
        let parsed: PaymentMethod = serde_json::from_value("financiación".into()).unwrap();
        assert_eq!(parsed, PaymentMethod::Financiacion);
        assert!(serde_json::from_value::<PaymentMethod>("bitcoin".into()).is_err());
    }
}
