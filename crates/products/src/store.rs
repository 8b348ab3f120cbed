use async_trait::async_trait;
use std::sync::Arc;

use stockroom_core::StoreError;

use crate::product::Product;

/// Durable, id-keyed storage for product rows.
///
/// Absence is never an error: `get_by_id` answers `None` and `replace` /
/// `delete_by_id` answer `false` when no row has the id.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Persist a new row and return its freshly assigned, positive id.
    /// The `id` field of `product` is ignored.
    async fn create(&self, product: &Product) -> Result<i64, StoreError>;

    async fn get_by_id(&self, id: i64) -> Result<Option<Product>, StoreError>;

    /// All rows in a stable, store-defined order.
    async fn list_all(&self) -> Result<Vec<Product>, StoreError>;

    /// Overwrite every field of the row with `product.id`.
    async fn replace(&self, product: &Product) -> Result<bool, StoreError>;

    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError>;
}

#[async_trait]
impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    async fn create(&self, product: &Product) -> Result<i64, StoreError> {
        (**self).create(product).await
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Product>, StoreError> {
        (**self).get_by_id(id).await
    }

    async fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        (**self).list_all().await
    }

    async fn replace(&self, product: &Product) -> Result<bool, StoreError> {
        (**self).replace(product).await
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError> {
        (**self).delete_by_id(id).await
    }
}
