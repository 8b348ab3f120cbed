//! SQLite-backed product store.
//!
//! The `products` table mirrors the domain invariants with CHECK constraints,
//! so a bypassed validation still cannot persist a negative quantity or a
//! blank name. Ids come from SQLite's `INTEGER PRIMARY KEY` rowid.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::instrument;

use stockroom_core::StoreError;
use stockroom_products::{Product, ProductStore};

use super::sql::{map_sqlx_error, product_from_row, SELECT_COLUMNS};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        id                  INTEGER PRIMARY KEY,
        name                TEXT    NOT NULL CHECK (trim(name) <> ''),
        description         TEXT    NOT NULL DEFAULT '',
        stock_quantity      INTEGER NOT NULL DEFAULT 0 CHECK (stock_quantity >= 0),
        low_stock_threshold INTEGER NOT NULL DEFAULT 0 CHECK (low_stock_threshold >= 0)
    )
"#;

#[derive(Debug, Clone)]
pub struct SqliteProductStore {
    pool: SqlitePool,
}

impl SqliteProductStore {
    /// Wrap an existing pool. Call [`SqliteProductStore::ensure_schema`] before use.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database at `url` and ensure the schema.
    ///
    /// `sqlite::memory:` URLs are pinned to a single, never-recycled
    /// connection: every new in-memory connection is a new empty database.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| map_sqlx_error("connect", e))?
            .create_if_missing(true);

        let pool_options = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;

        let store = Self::new(pool);
        store.ensure_schema().await?;
        tracing::info!(url, "sqlite product store ready");
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
impl ProductStore for SqliteProductStore {
    #[instrument(skip_all, err)]
    async fn create(&self, product: &Product) -> Result<i64, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO products (name, description, stock_quantity, low_stock_threshold)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.stock_quantity)
        .bind(product.low_stock_threshold)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create", e))?;

        Ok(result.last_insert_rowid())
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&self, id: i64) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query(&format!("SELECT {SELECT_COLUMNS} FROM products WHERE id = ?"))
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
            SET name = ?, description = ?, stock_quantity = ?, low_stock_threshold = ?
            WHERE id = ?
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
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_by_id", e))?;

        Ok(result.rows_affected() == 1)
    }
}
