//! Services module
//!
//! Este módulo contiene las reglas que cruzan entidades (inventario,
//! integridad referencial) y las integraciones externas (imágenes).

pub mod image_service;
pub mod inventory_service;
pub mod reference_guard;

pub use image_service::{release_image, CloudinaryImageStore, DisabledImageStore, ImageStore};
pub use inventory_service::InventoryService;
pub use reference_guard::ReferentialIntegrityGuard;
