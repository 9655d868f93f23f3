//! Almacén de entidades
//!
//! Cada entidad tiene un trait de almacén con las operaciones por clave
//! (`find_all`, `find_by_*`, `create`, `update`, `delete`). Todas son atómicas a
//! nivel de registro; no hay transacciones que abarquen varios registros.
//!
//! Implementaciones:
//! - `Pg*Repository`: PostgreSQL vía sqlx.
//! - `memory::InMemoryStore`: en memoria, para tests y desarrollo.

pub mod client_repository;
pub mod memory;
pub mod sale_repository;
pub mod user_repository;
pub mod vehicle_repository;

use async_trait::async_trait;
use uuid::Uuid;

use crate::dto::client_dto::{CreateClientRequest, UpdateClientRequest};
use crate::dto::sale_dto::UpdateSaleRequest;
use crate::dto::user_dto::UpdateUserRequest;
use crate::dto::vehicle_dto::{UpdateVehicleRequest, VehicleFilters};
use crate::models::{Availability, Client, Sale, User, Vehicle};
use crate::utils::errors::AppResult;

pub use client_repository::PgClientRepository;
pub use memory::InMemoryStore;
pub use sale_repository::PgSaleRepository;
pub use user_repository::PgUserRepository;
pub use vehicle_repository::PgVehicleRepository;

pub(crate) const VEHICLE_NOT_FOUND: &str = "Coche no encontrado";
pub(crate) const VEHICLE_DUPLICATE: &str = "El VIN ya existe en la base de datos";
pub(crate) const CLIENT_NOT_FOUND: &str = "Cliente no encontrado";
pub(crate) const CLIENT_DUPLICATE: &str = "El email ya está registrado";
pub(crate) const SALE_NOT_FOUND: &str = "Venta no encontrada";
pub(crate) const SALE_DUPLICATE: &str = "La venta ya existe";
pub(crate) const USER_NOT_FOUND: &str = "Usuario no encontrado";
pub(crate) const USER_DUPLICATE: &str = "El correo ya tiene una cuenta asociada";

/// Resultado de una actualización de coche: la fila guardada y la imagen
/// que tenía justo antes, leída bajo el mismo bloqueo
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatedVehicle {
    pub vehicle: Vehicle,
    pub previous_img: Option<String>,
}

#[async_trait]
pub trait VehicleStore: Send + Sync {
    async fn find_all(&self, filters: &VehicleFilters) -> AppResult<Vec<Vehicle>>;
    async fn find_by_vin(&self, vin: &str) -> AppResult<Option<Vehicle>>;
    /// Búsqueda por identidad interna (la que usan las ventas)
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>>;
    /// Falla con `DuplicateKey` si el vin ya existe
    async fn create(&self, vehicle: &Vehicle) -> AppResult<Vehicle>;
    async fn update(
        &self,
        vin: &str,
        changes: &UpdateVehicleRequest,
    ) -> AppResult<UpdatedVehicle>;
    async fn set_availability(&self, id: Uuid, availability: Availability) -> AppResult<Vehicle>;
    async fn delete(&self, vin: &str) -> AppResult<Vehicle>;
}

#[async_trait]
pub trait ClientStore: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Client>>;
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Client>>;
    /// ¿Usa otro cliente (distinto de `exclude_id`) este email?
    async fn email_in_use(&self, email: &str, exclude_id: Option<i32>) -> AppResult<bool>;
    /// Asigna `max(id) + 1` (1 si no hay clientes) en el momento de insertar
    async fn create(&self, request: &CreateClientRequest) -> AppResult<Client>;
    async fn update(&self, id: i32, changes: &UpdateClientRequest) -> AppResult<Client>;
    async fn delete(&self, id: i32) -> AppResult<Client>;
}

#[async_trait]
pub trait SaleStore: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Sale>>;
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Sale>>;
    /// Falla con `DuplicateKey` si el id ya existe
    async fn create(&self, sale: &Sale) -> AppResult<Sale>;
    async fn update(&self, id: i32, changes: &UpdateSaleRequest) -> AppResult<Sale>;
    async fn delete(&self, id: i32) -> AppResult<Sale>;
    async fn exists_for_client(&self, client_id: i32) -> AppResult<bool>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<User>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn create(&self, user: &User) -> AppResult<User>;
    async fn update(&self, id: Uuid, changes: &UpdateUserRequest) -> AppResult<User>;
    async fn update_password(&self, id: Uuid, password_hash: &str) -> AppResult<User>;
    async fn delete(&self, id: Uuid) -> AppResult<User>;
}
