use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::sale::PaymentMethod;

// Request para registrar una venta.
// `id` lo aporta quien llama; `car` es el id interno del coche y `client` el id del cliente.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSaleRequest {
    #[validate(range(min = 1))]
    pub id: i32,
    pub car: Uuid,
    #[validate(range(min = 1))]
    pub client: i32,
    pub date: NaiveDate,
    pub payment: PaymentMethod,
    pub delivery: NaiveDate,
}

// Request para actualizar una venta (las referencias no se revalidan)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSaleRequest {
    pub car: Option<Uuid>,
    #[validate(range(min = 1))]
    pub client: Option<i32>,
    pub date: Option<NaiveDate>,
    pub payment: Option<PaymentMethod>,
    pub delivery: Option<NaiveDate>,
}
