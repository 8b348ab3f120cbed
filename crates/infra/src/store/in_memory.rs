use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use stockroom_core::StoreError;
use stockroom_products::{Product, ProductStore};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, Product>,
    last_id: i64,
}

/// In-memory product store for tests/dev.
///
/// Ids are assigned from a counter starting at 1 and are never reused, even
/// after deletes. Listing is in ascending id order.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    inner: RwLock<Table>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(operation: &str) -> StoreError {
    StoreError::unavailable(operation, "in-memory store lock poisoned")
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn create(&self, product: &Product) -> Result<i64, StoreError> {
        let mut table = self.inner.write().map_err(|_| poisoned("create"))?;
        table.last_id += 1;
        let id = table.last_id;
        table.rows.insert(
            id,
            Product {
                id,
                ..product.clone()
            },
        );
        Ok(id)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Product>, StoreError> {
        let table = self.inner.read().map_err(|_| poisoned("get_by_id"))?;
        Ok(table.rows.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        let table = self.inner.read().map_err(|_| poisoned("list_all"))?;
        Ok(table.rows.values().cloned().collect())
    }

    async fn replace(&self, product: &Product) -> Result<bool, StoreError> {
        let mut table = self.inner.write().map_err(|_| poisoned("replace"))?;
        match table.rows.get_mut(&product.id) {
            Some(row) => {
                *row = product.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError> {
        let mut table = self.inner.write().map_err(|_| poisoned("delete_by_id"))?;
        Ok(table.rows.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_are_positive_and_not_reused() {
        let store = InMemoryProductStore::new();
        let a = store.create(&Product::new("A", 1, 0)).await.unwrap();
        let b = store.create(&Product::new("B", 1, 0)).await.unwrap();
        assert_eq!((a, b), (1, 2));

        assert!(store.delete_by_id(b).await.unwrap());
        let c = store.create(&Product::new("C", 1, 0)).await.unwrap();
        assert_eq!(c, 3);
    }

    #[tokio::test]
    async fn create_ignores_candidate_id() {
        let store = InMemoryProductStore::new();
        let mut candidate = Product::new("A", 1, 0);
        candidate.id = 99;

        let id = store.create(&candidate).await.unwrap();
        assert_eq!(id, 1);
        assert!(store.get_by_id(99).await.unwrap().is_none());
        assert_eq!(store.get_by_id(1).await.unwrap().unwrap().id, 1);
    }

    #[tokio::test]
    async fn replace_and_delete_report_missing_rows() {
        let store = InMemoryProductStore::new();
        let mut ghost = Product::new("Ghost", 0, 0);
        ghost.id = 7;

        assert!(!store.replace(&ghost).await.unwrap());
        assert!(!store.delete_by_id(7).await.unwrap());
        assert!(store.list_all().await.unwrap().is_empty());
    }
}
