//! Controladores
//!
//! Lógica de negocio por entidad. Cada controlador se construye a partir
//! del `AppState` y trabaja contra los traits de almacén.

pub mod client_controller;
pub mod sale_controller;
pub mod user_controller;
pub mod vehicle_controller;

pub use client_controller::ClientController;
pub use sale_controller::SaleController;
pub use user_controller::UserController;
pub use vehicle_controller::VehicleController;
