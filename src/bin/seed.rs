//! Carga los datos de demostración en la base de datos.
//!
//! Uso: `seed [directorio]`. Sin argumento se usa `SEED_DATA_DIR` y, si no
//! existe, `data/seeds`. Borra todos los coches, clientes, ventas y usuarios.

use std::path::PathBuf;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use concesionario_api::{
    config::{DatabaseConfig, EnvironmentConfig},
    database::DatabaseConnection,
    seeds::{seed_database, SeedData, DEFAULT_DATA_DIR, DEMO_PASSWORD_COST},
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = EnvironmentConfig::from_env().context("Configuración incompleta")?;

    let data_dir = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("SEED_DATA_DIR").ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    info!("📂 Leyendo CSV de {}", data_dir.display());

    // Leer y validar antes de conectar: un CSV roto no borra nada
    let data = SeedData::load(&data_dir, DEMO_PASSWORD_COST)
        .with_context(|| format!("Datos de {} no válidos", data_dir.display()))?;

    let db_connection = DatabaseConnection::connect(&DatabaseConfig::from(&config)).await?;
    db_connection.run_migrations().await?;

    let summary = seed_database(&db_connection.pool(), &data)
        .await
        .context("Error poblando la base de datos")?;

    info!("✅ Base de datos poblada");
    info!("   Usuarios: {}", summary.users);
    info!("   Coches:   {}", summary.vehicles);
    info!("   Clientes: {}", summary.clients);
    info!("   Ventas:   {}", summary.sales);
    Ok(())
}
