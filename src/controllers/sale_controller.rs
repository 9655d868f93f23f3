//! Coordinador de ventas
//!
//! Alta de una venta, en este orden:
//! 1. `DuplicateKey` si el id de venta ya existe
//! 2. resolver el coche (`NotFound` si no existe)
//! 3. resolver el cliente (`NotFound` si no existe)
//! 4. guardar la venta
//! 5. forzar el coche a `vendido`
//!
//! No hay transacción entre 4 y 5: si el paso 5 falla la venta queda guardada,
//! el fallo se registra como error y se devuelve a quien llama. Actualizar o
//! borrar una venta no repite 2-3 ni deshace 5.

use std::sync::Arc;

use tracing::{error, info};

use crate::dto::sale_dto::{CreateSaleRequest, UpdateSaleRequest};
use crate::models::{Sale, SaleDetail};
use crate::repositories::{
    ClientStore, SaleStore, VehicleStore, CLIENT_NOT_FOUND, SALE_DUPLICATE, SALE_NOT_FOUND,
    VEHICLE_NOT_FOUND,
};
use crate::services::inventory_service::InventoryService;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub struct SaleController {
    sales: Arc<dyn SaleStore>,
    vehicles: Arc<dyn VehicleStore>,
    clients: Arc<dyn ClientStore>,
    inventory: InventoryService,
}

impl SaleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            sales: state.sales.clone(),
            vehicles: state.vehicles.clone(),
            clients: state.clients.clone(),
            inventory: InventoryService::new(state.vehicles.clone()),
        }
    }

    async fn expand(&self, sale: Sale) -> AppResult<SaleDetail> {
        let car = self.vehicles.find_by_id(sale.car_id).await?;
        let client = self.clients.find_by_id(sale.client_id).await?;
        Ok(SaleDetail::expand(sale, car, client))
    }

    pub async fn list(&self) -> AppResult<Vec<SaleDetail>> {
        let sales = self.sales.find_all().await?;
        let mut details = Vec::with_capacity(sales.len());
        for sale in sales {
            details.push(self.expand(sale).await?);
        }
        Ok(details)
    }

    pub async fn get(&self, id: i32) -> AppResult<SaleDetail> {
        let sale = self
            .sales
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(SALE_NOT_FOUND.to_string()))?;
        self.expand(sale).await
    }

    pub async fn create(&self, request: CreateSaleRequest) -> AppResult<SaleDetail> {
        if self.sales.find_by_id(request.id).await?.is_some() {
            return Err(AppError::DuplicateKey(SALE_DUPLICATE.to_string()));
        }

        self.vehicles
            .find_by_id(request.car)
            .await?
            .ok_or_else(|| AppError::NotFound(VEHICLE_NOT_FOUND.to_string()))?;

        let client = self
            .clients
            .find_by_id(request.client)
            .await?
            .ok_or_else(|| AppError::NotFound(CLIENT_NOT_FOUND.to_string()))?;

        let sale = self.sales.create(&Sale::new(&request)).await?;

        let sold = match self.inventory.record_sale(sale.car_id).await {
            Ok(vehicle) => vehicle,
            Err(e) => {
                error!(
                    "❌ Venta {} guardada pero el coche {} no se pudo marcar como vendido: {}",
                    sale.id, sale.car_id, e
                );
                return Err(e);
            }
        };

        info!("💰 Venta {} registrada (cliente {})", sale.id, client.id);
        Ok(SaleDetail::expand(sale, Some(sold), Some(client)))
    }

    pub async fn update(&self, id: i32, changes: UpdateSaleRequest) -> AppResult<SaleDetail> {
        let sale = self.sales.update(id, &changes).await?;
        self.expand(sale).await
    }

    /// Devuelve la venta borrada sin expandir; el coche sigue `vendido`
    pub async fn delete(&self, id: i32) -> AppResult<Sale> {
        let deleted = self.sales.delete(id).await?;
        info!("🗑️ Venta {} eliminada", deleted.id);
        Ok(deleted)
    }
}
