//! Storage collaborators for products.
//!
//! All backends implement [`stockroom_products::ProductStore`]:
//! - `InMemoryProductStore`: dev/test, no persistence
//! - `SqliteProductStore`: single-file (or `:memory:`) SQLite database
//! - `PostgresProductStore`: shared Postgres database

pub mod in_memory;
pub mod postgres;
pub mod sqlite;

mod sql;

pub use in_memory::InMemoryProductStore;
pub use postgres::PostgresProductStore;
pub use sqlite::SqliteProductStore;
