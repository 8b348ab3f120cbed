use std::sync::Arc;

use stockroom_core::StoreError;
use stockroom_infra::store::{InMemoryProductStore, PostgresProductStore, SqliteProductStore};
use stockroom_infra::DatabaseConfig;
use stockroom_products::{ProductService, ProductStore};

/// Shared handle to whichever storage collaborator is configured.
pub type DynProductStore = Arc<dyn ProductStore>;

/// Services shared by all request handlers.
#[derive(Clone)]
pub struct AppServices {
    pub products: ProductService<DynProductStore>,
}

impl AppServices {
    pub fn new(store: DynProductStore) -> Self {
        Self {
            products: ProductService::new(store),
        }
    }

    /// In-memory wiring (dev/test).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryProductStore::new()))
    }
}

/// Build services for the configured database.
pub async fn build_services(database: &DatabaseConfig) -> Result<AppServices, StoreError> {
    let store: DynProductStore = match database {
        DatabaseConfig::InMemory => {
            tracing::warn!("DATABASE_URL=memory; products are not persisted");
            Arc::new(InMemoryProductStore::new())
        }
        DatabaseConfig::Sqlite { url } => Arc::new(SqliteProductStore::connect(url).await?),
        DatabaseConfig::Postgres { url } => Arc::new(PostgresProductStore::connect(url).await?),
    };
    Ok(AppServices::new(store))
}
