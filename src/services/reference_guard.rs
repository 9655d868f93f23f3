//! Guarda de integridad referencial
//!
//! Impide borrar un cliente mientras alguna venta lo referencie.
//! El borrado de coches no pasa por aquí.

use std::sync::Arc;

use crate::repositories::SaleStore;
use crate::utils::errors::{AppError, AppResult};

pub const CLIENT_HAS_SALES: &str = "No se puede eliminar el cliente porque tiene ventas asociadas";

pub struct ReferentialIntegrityGuard {
    sales: Arc<dyn SaleStore>,
}

impl ReferentialIntegrityGuard {
    pub fn new(sales: Arc<dyn SaleStore>) -> Self {
        Self { sales }
    }

    pub async fn ensure_client_unreferenced(&self, client_id: i32) -> AppResult<()> {
        if self.sales.exists_for_client(client_id).await? {
            return Err(AppError::ReferencedEntity(CLIENT_HAS_SALES.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PaymentMethod, Sale};
    use crate::repositories::InMemoryStore;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    #[tokio::test]
    async fn test_client_with_sales_is_referenced() {
        let store = Arc::new(InMemoryStore::new());
        let guard = ReferentialIntegrityGuard::new(store.clone());

        assert!(guard.ensure_client_unreferenced(3).await.is_ok());

        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let sale = Sale {
            id: 1,
            car_id: Uuid::new_v4(),
            client_id: 3,
            sale_date: date,
            payment: PaymentMethod::Efectivo,
            delivery: date,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        SaleStore::create(store.as_ref(), &sale).await.unwrap();

        let result = guard.ensure_client_unreferenced(3).await;
        assert!(matches!(result, Err(AppError::ReferencedEntity(_))));
        assert!(guard.ensure_client_unreferenced(4).await.is_ok());
    }
}
