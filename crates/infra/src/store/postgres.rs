//! Postgres-backed product store.
//!
//! Same table shape as the SQLite store, with `BIGSERIAL`/`BIGINT` columns.
//! Every operation is a single statement; no transaction spans operations.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Row;
use tracing::instrument;

use stockroom_core::StoreError;
use stockroom_products::{Product, ProductStore};

use super::sql::{map_sqlx_error, product_from_row, SELECT_COLUMNS};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        id                  BIGSERIAL PRIMARY KEY,
        name                TEXT   NOT NULL CHECK (btrim(name) <> ''),
        description         TEXT   NOT NULL DEFAULT '',
        stock_quantity      BIGINT NOT NULL DEFAULT 0 CHECK (stock_quantity >= 0),
        low_stock_threshold BIGINT NOT NULL DEFAULT 0 CHECK (low_stock_threshold >= 0)
    )
"#;

#[derive(Debug, Clone)]
pub struct PostgresProductStore {
    pool: PgPool,
}

impl PostgresProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `url` and ensure the `products` table exists.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(5))
            .connect(url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;

        let store = Self::new(pool);
        store.ensure_schema().await?;
        tracing::info!("postgres product store ready");
        Ok(store)
    }

    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    #[instrument(skip_all, err)]
    async fn create(&self, product: &Product) -> Result<i64, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO products (name, description, stock_quantity, low_stock_threshold)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.stock_quantity)
        .bind(product.low_stock_threshold)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create", e))?;

        row.try_get::<i64, _>("id")
            .map_err(|e| map_sqlx_error("create", e))
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&self, id: i64) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query(&format!("SELECT {SELECT_COLUMNS} FROM products WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_by_id", e))?;

        row.map(|r| product_from_row(&r))
            .transpose()
            .map_err(|e| map_sqlx_error("get_by_id", e))
    }

    #[instrument(skip(self), err)]
    async fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query(&format!("SELECT {SELECT_COLUMNS} FROM products ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_all", e))?;

        rows.iter()
            .map(product_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| map_sqlx_error("list_all", e))
    }

    #[instrument(skip_all, fields(id = product.id), err)]
    async fn replace(&self, product: &Product) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $1, description = $2, stock_quantity = $3, low_stock_threshold = $4
            WHERE id = $5
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.stock_quantity)
        .bind(product.low_stock_threshold)
        .bind(product.id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("replace", e))?;

        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(self), err)]
    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_by_id", e))?;

        Ok(result.rows_affected() == 1)
    }
}
