//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Los almacenes van detrás de traits para
//! poder montar la misma API sobre PostgreSQL o en memoria.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::{info, warn};

use crate::config::environment::EnvironmentConfig;
use crate::repositories::{
    ClientStore, InMemoryStore, PgClientRepository, PgSaleRepository, PgUserRepository,
    PgVehicleRepository, SaleStore, UserStore, VehicleStore,
};
use crate::services::image_service::{CloudinaryImageStore, DisabledImageStore, ImageStore};
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub vehicles: Arc<dyn VehicleStore>,
    pub clients: Arc<dyn ClientStore>,
    pub sales: Arc<dyn SaleStore>,
    pub users: Arc<dyn UserStore>,
    pub images: Arc<dyn ImageStore>,
    pub jwt: JwtConfig,
    /// Coste de bcrypt para las contraseñas
    pub password_cost: u32,
}

impl AppState {
    pub fn from_pool(pool: PgPool, config: &EnvironmentConfig) -> anyhow::Result<Self> {
        let images: Arc<dyn ImageStore> = match &config.cloudinary {
            Some(cloudinary) => {
                info!("🖼️ Borrado de imágenes vía Cloudinary ({})", cloudinary.cloud_name);
                Arc::new(CloudinaryImageStore::new(cloudinary.clone())?)
            }
            None => {
                warn!("⚠️ Cloudinary no configurado: las imágenes no se borrarán");
                Arc::new(DisabledImageStore)
            }
        };

        Ok(Self {
            vehicles: Arc::new(PgVehicleRepository::new(pool.clone())),
            clients: Arc::new(PgClientRepository::new(pool.clone())),
            sales: Arc::new(PgSaleRepository::new(pool.clone())),
            users: Arc::new(PgUserRepository::new(pool)),
            images,
            jwt: JwtConfig::from(config),
            password_cost: bcrypt::DEFAULT_COST,
        })
    }

    /// Estado completo en memoria, sin imágenes. Usado por los tests.
    pub fn in_memory(jwt: JwtConfig) -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            vehicles: store.clone(),
            clients: store.clone(),
            sales: store.clone(),
            users: store,
            images: Arc::new(DisabledImageStore),
            jwt,
            // Coste mínimo admitido por bcrypt
            password_cost: 4,
        }
    }

    pub fn with_images(mut self, images: Arc<dyn ImageStore>) -> Self {
        self.images = images;
        self
    }
}
