//! Product business-rule engine.
//!
//! Every operation is a self-contained read-validate-write unit over the
//! injected [`ProductStore`]; the service keeps no state of its own.
//!
//! ## Stock adjustment and concurrency
//!
//! `increase_stock` / `decrease_stock` read the product, compute the new
//! quantity and write the full row back as two separate store calls. There is
//! no transaction or compare-and-swap between them, so two concurrent
//! adjustments of the same product can both read the same starting quantity
//! and the later write wins (a lost update). Callers needing strict
//! accounting under contention must serialize adjustments per product.

use tracing::instrument;

use stockroom_core::{DomainError, DomainResult};

use crate::product::Product;
use crate::store::ProductStore;

#[derive(Debug, Clone)]
pub struct ProductService<S> {
    store: S,
}

impl<S: ProductStore> ProductService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate and persist a new product, returning its assigned id.
    #[instrument(skip_all)]
    pub async fn create(&self, candidate: Option<&Product>) -> DomainResult<i64> {
        let product = candidate.ok_or(DomainError::NilEntity)?;
        product.validate_fields()?;

        let id = self.store.create(product).await?;
        tracing::info!(id, name = %product.name, "product created");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> DomainResult<Product> {
        ensure_id(id)?;
        self.load(id).await
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> DomainResult<Vec<Product>> {
        Ok(self.store.list_all().await?)
    }

    /// Full replace of an existing product; every field is overwritten.
    #[instrument(skip_all, fields(id = candidate.map(|p| p.id)))]
    pub async fn update(&self, candidate: Option<&Product>) -> DomainResult<()> {
        let product = candidate.ok_or(DomainError::NilEntity)?;
        if !product.is_persisted() {
            return Err(DomainError::InvalidId);
        }
        product.validate_fields()?;

        if !self.store.replace(product).await? {
            return Err(DomainError::NotFound);
        }
        tracing::info!(id = product.id, "product updated");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        ensure_id(id)?;
        if !self.store.delete_by_id(id).await? {
            return Err(DomainError::NotFound);
        }
        tracing::info!(id, "product deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn increase_stock(&self, id: i64, amount: i64) -> DomainResult<Product> {
        ensure_id(id)?;
        ensure_amount(amount)?;

        let mut product = self.load(id).await?;
        product.stock_quantity = product.increased_stock(amount)?;
        self.write_back(&product).await?;

        tracing::info!(id, amount, stock = product.stock_quantity, "stock increased");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn decrease_stock(&self, id: i64, amount: i64) -> DomainResult<Product> {
        ensure_id(id)?;
        ensure_amount(amount)?;

        let mut product = self.load(id).await?;
        product.stock_quantity = product.decreased_stock(amount)?;
        self.write_back(&product).await?;

        tracing::info!(id, amount, stock = product.stock_quantity, "stock decreased");
        Ok(product)
    }

    /// Products with monitoring enabled whose stock is below the threshold,
    /// in the same relative order as [`ProductService::list`].
    #[instrument(skip(self))]
    pub async fn list_low_stock(&self) -> DomainResult<Vec<Product>> {
        let products = self.store.list_all().await?;
        Ok(products.into_iter().filter(Product::is_low_stock).collect())
    }

    async fn load(&self, id: i64) -> DomainResult<Product> {
        self.store.get_by_id(id).await?.ok_or(DomainError::NotFound)
    }

    async fn write_back(&self, product: &Product) -> DomainResult<()> {
        // The row can vanish between the read and the write.
        if !self.store.replace(product).await? {
            return Err(DomainError::NotFound);
        }
        Ok(())
    }
}

fn ensure_id(id: i64) -> DomainResult<()> {
    if id <= 0 {
        return Err(DomainError::InvalidId);
    }
    Ok(())
}

fn ensure_amount(amount: i64) -> DomainResult<()> {
    if amount <= 0 {
        return Err(DomainError::InvalidAmount);
    }
    Ok(())
}
