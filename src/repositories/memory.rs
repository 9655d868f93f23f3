use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    ClientStore, SaleStore, UpdatedVehicle, UserStore, VehicleStore, CLIENT_DUPLICATE,
    CLIENT_NOT_FOUND, SALE_DUPLICATE, SALE_NOT_FOUND, USER_DUPLICATE, USER_NOT_FOUND,
    VEHICLE_DUPLICATE, VEHICLE_NOT_FOUND,
};
use crate::dto::client_dto::{CreateClientRequest, UpdateClientRequest};
use crate::dto::sale_dto::UpdateSaleRequest;
use crate::dto::user_dto::UpdateUserRequest;
use crate::dto::vehicle_dto::{UpdateVehicleRequest, VehicleFilters};
use crate::models::{Availability, Client, Sale, User, Vehicle};
use crate::utils::errors::{AppError, AppResult};

#[derive(Debug, Default)]
struct Tables {
    vehicles: HashMap<Uuid, Vehicle>,
    clients: BTreeMap<i32, Client>,
    sales: BTreeMap<i32, Sale>,
    users: HashMap<Uuid, User>,
}

/// Almacén en memoria con las mismas restricciones de unicidad que el esquema SQL.
///
/// Pensado para tests/desarrollo. Cada operación toma el lock una sola vez,
/// así que es atómica a nivel de registro igual que PostgreSQL.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(message: &str) -> AppError {
    AppError::NotFound(message.to_string())
}

#[async_trait]
impl VehicleStore for InMemoryStore {
    async fn find_all(&self, filters: &VehicleFilters) -> AppResult<Vec<Vehicle>> {
        let tables = self.tables.read().await;
        let mut vehicles: Vec<Vehicle> = tables
            .vehicles
            .values()
            .filter(|v| filters.matches(v))
            .cloned()
            .collect();
        vehicles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(vehicles)
    }

    async fn find_by_vin(&self, vin: &str) -> AppResult<Option<Vehicle>> {
        let tables = self.tables.read().await;
        Ok(tables.vehicles.values().find(|v| v.vin == vin).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        Ok(self.tables.read().await.vehicles.get(&id).cloned())
    }

    async fn create(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        let mut tables = self.tables.write().await;
        let duplicate = tables.vehicles.contains_key(&vehicle.id)
            || tables.vehicles.values().any(|v| v.vin == vehicle.vin);
        if duplicate {
            return Err(AppError::DuplicateKey(VEHICLE_DUPLICATE.to_string()));
        }
        tables.vehicles.insert(vehicle.id, vehicle.clone());
        Ok(vehicle.clone())
    }

    async fn update(
        &self,
        vin: &str,
        changes: &UpdateVehicleRequest,
    ) -> AppResult<UpdatedVehicle> {
        let mut tables = self.tables.write().await;
        let vehicle = tables
            .vehicles
            .values_mut()
            .find(|v| v.vin == vin)
            .ok_or_else(|| not_found(VEHICLE_NOT_FOUND))?;
        let previous_img = vehicle.img.clone();
        vehicle.apply_changes(changes);
        Ok(UpdatedVehicle {
            vehicle: vehicle.clone(),
            previous_img,
        })
    }

    async fn set_availability(&self, id: Uuid, availability: Availability) -> AppResult<Vehicle> {
        let mut tables = self.tables.write().await;
        let vehicle = tables
            .vehicles
            .get_mut(&id)
            .ok_or_else(|| not_found(VEHICLE_NOT_FOUND))?;
        vehicle.availability = availability;
        vehicle.updated_at = Utc::now();
        Ok(vehicle.clone())
    }

    async fn delete(&self, vin: &str) -> AppResult<Vehicle> {
        let mut tables = self.tables.write().await;
        let id = tables
            .vehicles
            .values()
            .find(|v| v.vin == vin)
            .map(|v| v.id)
            .ok_or_else(|| not_found(VEHICLE_NOT_FOUND))?;
        tables
            .vehicles
            .remove(&id)
            .ok_or_else(|| not_found(VEHICLE_NOT_FOUND))
    }
}

#[async_trait]
impl ClientStore for InMemoryStore {
    async fn find_all(&self) -> AppResult<Vec<Client>> {
        Ok(self.tables.read().await.clients.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Client>> {
        Ok(self.tables.read().await.clients.get(&id).cloned())
    }

    async fn email_in_use(&self, email: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables
            .clients
            .values()
            .any(|c| c.email == email && Some(c.id) != exclude_id))
    }

    async fn create(&self, request: &CreateClientRequest) -> AppResult<Client> {
        let mut tables = self.tables.write().await;
        let email = request.email.trim();
        if tables.clients.values().any(|c| c.email == email) {
            return Err(AppError::DuplicateKey(CLIENT_DUPLICATE.to_string()));
        }

        // El id se calcula bajo el lock de escritura: no hay carrera entre altas
        let next_id = tables.clients.keys().next_back().map_or(1, |max| max + 1);
        let now = Utc::now();
        let client = Client {
            id: next_id,
            name: request.name.trim().to_string(),
            email: email.to_string(),
            preferences: request.preferences.as_ref().map(|p| p.trim().to_string()),
            created_at: now,
            updated_at: now,
        };
        tables.clients.insert(next_id, client.clone());
        Ok(client)
    }

    async fn update(&self, id: i32, changes: &UpdateClientRequest) -> AppResult<Client> {
        let mut tables = self.tables.write().await;
        if let Some(email) = &changes.email {
            let email = email.trim();
            if tables.clients.values().any(|c| c.email == email && c.id != id) {
                return Err(AppError::DuplicateKey(CLIENT_DUPLICATE.to_string()));
            }
        }
        let client = tables
            .clients
            .get_mut(&id)
            .ok_or_else(|| not_found(CLIENT_NOT_FOUND))?;
        client.apply_changes(changes);
        Ok(client.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<Client> {
        self.tables
            .write()
            .await
            .clients
            .remove(&id)
            .ok_or_else(|| not_found(CLIENT_NOT_FOUND))
    }
}

#[async_trait]
impl SaleStore for InMemoryStore {
    async fn find_all(&self) -> AppResult<Vec<Sale>> {
        Ok(self.tables.read().await.sales.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Sale>> {
        Ok(self.tables.read().await.sales.get(&id).cloned())
    }

    async fn create(&self, sale: &Sale) -> AppResult<Sale> {
        let mut tables = self.tables.write().await;
        if tables.sales.contains_key(&sale.id) {
            return Err(AppError::DuplicateKey(SALE_DUPLICATE.to_string()));
        }
        tables.sales.insert(sale.id, sale.clone());
        Ok(sale.clone())
    }

    async fn update(&self, id: i32, changes: &UpdateSaleRequest) -> AppResult<Sale> {
        let mut tables = self.tables.write().await;
        let sale = tables
            .sales
            .get_mut(&id)
            .ok_or_else(|| not_found(SALE_NOT_FOUND))?;
        sale.apply_changes(changes);
        Ok(sale.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<Sale> {
        self.tables
            .write()
            .await
            .sales
            .remove(&id)
            .ok_or_else(|| not_found(SALE_NOT_FOUND))
    }

    async fn exists_for_client(&self, client_id: i32) -> AppResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.sales.values().any(|s| s.client_id == client_id))
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn find_all(&self) -> AppResult<Vec<User>> {
        let tables = self.tables.read().await;
        let mut users: Vec<User> = tables.users.values().cloned().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(users)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: &User) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(AppError::DuplicateKey(USER_DUPLICATE.to_string()));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn update(&self, id: Uuid, changes: &UpdateUserRequest) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        if let Some(email) = &changes.email {
            let email = email.trim();
            if tables.users.values().any(|u| u.email == email && u.id != id) {
                return Err(AppError::DuplicateKey(USER_DUPLICATE.to_string()));
            }
        }
        let user = tables
            .users
            .get_mut(&id)
            .ok_or_else(|| not_found(USER_NOT_FOUND))?;
        user.apply_changes(changes);
        Ok(user.clone())
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .get_mut(&id)
            .ok_or_else(|| not_found(USER_NOT_FOUND))?;
        user.password_hash = password_hash.to_string();
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<User> {
        self.tables
            .write()
            .await
            .users
            .remove(&id)
            .ok_or_else(|| not_found(USER_NOT_FOUND))
    }
}
