//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean al schema
//! PostgreSQL del concesionario.

pub mod client;
pub mod sale;
pub mod user;
pub mod vehicle;

pub use client::Client;
pub use sale::{PaymentMethod, Sale, SaleDetail};
pub use user::User;
pub use vehicle::{Availability, Brand, Condition, Vehicle, VehicleType};
