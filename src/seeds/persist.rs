//! Escritura de los datos de demostración
//!
//! Vacía las cuatro tablas e inserta todo en una sola transacción. Las
//! ventas se insertan tal cual: cargar datos no fuerza coches a `vendido`.

use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;

use super::{SeedData, SeedError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub vehicles: usize,
    pub clients: usize,
    pub sales: usize,
}

pub async fn seed_database(pool: &PgPool, data: &SeedData) -> Result<SeedSummary, SeedError> {
    let mut tx = pool.begin().await?;

    info!("🧹 Borrando datos existentes...");
    sqlx::query("TRUNCATE TABLE sales, cars, clients, users")
        .execute(&mut *tx)
        .await?;

    insert_users(&mut tx, data).await?;
    insert_vehicles(&mut tx, data).await?;
    insert_clients(&mut tx, data).await?;
    insert_sales(&mut tx, data).await?;

    tx.commit().await?;

    Ok(SeedSummary {
        users: data.users.len(),
        vehicles: data.vehicles.len(),
        clients: data.clients.len(),
        sales: data.sales.len(),
    })
}

async fn insert_users(tx: &mut Transaction<'_, Postgres>, data: &SeedData) -> Result<(), SeedError> {
    for user in &data.users {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&mut **tx)
        .await?;
    }
    info!("👤 Usuarios de prueba creados");
    Ok(())
}

async fn insert_vehicles(
    tx: &mut Transaction<'_, Postgres>,
    data: &SeedData,
) -> Result<(), SeedError> {
    for vehicle in &data.vehicles {
        sqlx::query(
            r#"
            INSERT INTO cars (
                id, vin, brand, model, car_type, year, condition, km, price,
                buyed_when, availability, img, color, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(vehicle.id)
        .bind(&vehicle.vin)
        .bind(vehicle.brand)
        .bind(&vehicle.model)
        .bind(vehicle.car_type)
        .bind(vehicle.year)
        .bind(vehicle.condition)
        .bind(vehicle.km)
        .bind(vehicle.price)
        .bind(vehicle.buyed_when)
        .bind(vehicle.availability)
        .bind(&vehicle.img)
        .bind(&vehicle.color)
        .bind(vehicle.created_at)
        .bind(vehicle.updated_at)
        .execute(&mut **tx)
        .await?;
    }
    info!("🚗 Vehículos insertados");
    Ok(())
}

async fn insert_clients(
    tx: &mut Transaction<'_, Postgres>,
    data: &SeedData,
) -> Result<(), SeedError> {
    for client in &data.clients {
        sqlx::query(
            r#"
            INSERT INTO clients (id, name, email, preferences, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(client.id)
        .bind(&client.name)
        .bind(&client.email)
        .bind(&client.preferences)
        .bind(client.created_at)
        .bind(client.updated_at)
        .execute(&mut **tx)
        .await?;
    }
    info!("👥 Clientes insertados");
    Ok(())
}

async fn insert_sales(tx: &mut Transaction<'_, Postgres>, data: &SeedData) -> Result<(), SeedError> {
    for sale in &data.sales {
        sqlx::query(
            r#"
            INSERT INTO sales (id, car_id, client_id, sale_date, payment, delivery, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(sale.id)
        .bind(sale.car_id)
        .bind(sale.client_id)
        .bind(sale.sale_date)
        .bind(sale.payment)
        .bind(sale.delivery)
        .bind(sale.created_at)
        .bind(sale.updated_at)
        .execute(&mut **tx)
        .await?;
    }
    info!("💰 Ventas insertadas");
    Ok(())
}
