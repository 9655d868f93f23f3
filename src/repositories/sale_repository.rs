use async_trait::async_trait;
use sqlx::PgPool;

use super::{SaleStore, SALE_DUPLICATE, SALE_NOT_FOUND};
use crate::dto::sale_dto::UpdateSaleRequest;
use crate::models::Sale;
use crate::utils::errors::{map_unique_violation, AppError, AppResult};

pub struct PgSaleRepository {
    pool: PgPool,
}

impl PgSaleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SaleStore for PgSaleRepository {
    async fn find_all(&self) -> AppResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>("SELECT * FROM sales ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(sales)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(sale)
    }

    async fn create(&self, sale: &Sale) -> AppResult<Sale> {
        let created = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales (id, car_id, client_id, sale_date, payment, delivery, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
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
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, SALE_DUPLICATE))?;

        Ok(created)
    }

    async fn update(&self, id: i32, changes: &UpdateSaleRequest) -> AppResult<Sale> {
        let mut tx = self.pool.begin().await?;

        let mut sale = sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(SALE_NOT_FOUND.to_string()))?;

        sale.apply_changes(changes);

        let updated = sqlx::query_as::<_, Sale>(
            r#"
            UPDATE sales
            SET car_id = $2, client_id = $3, sale_date = $4, payment = $5, delivery = $6, updated_at = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(sale.id)
        .bind(sale.car_id)
        .bind(sale.client_id)
        .bind(sale.sale_date)
        .bind(sale.payment)
        .bind(sale.delivery)
        .bind(sale.updated_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete(&self, id: i32) -> AppResult<Sale> {
        sqlx::query_as::<_, Sale>("DELETE FROM sales WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(SALE_NOT_FOUND.to_string()))
    }

    async fn exists_for_client(&self, client_id: i32) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM sales WHERE client_id = $1)")
                .bind(client_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }
}
