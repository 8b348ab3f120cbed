//! Helpers shared by the sqlx-backed stores.

use sqlx::error::ErrorKind;
use sqlx::{ColumnIndex, Decode, Row, Type};

use stockroom_core::StoreError;
use stockroom_products::Product;

pub(crate) const SELECT_COLUMNS: &str =
    "id, name, description, stock_quantity, low_stock_threshold";

/// Map a sqlx error to a [`StoreError`], tagged with the failing operation.
///
/// | sqlx error | StoreError |
/// |---|---|
/// | Database (unique/check/not-null/foreign key) | `Constraint` |
/// | Database (other) | `Backend` |
/// | PoolClosed / PoolTimedOut / Io | `Unavailable` |
/// | Other | `Backend` |
pub(crate) fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => match db_err.kind() {
            ErrorKind::UniqueViolation
            | ErrorKind::CheckViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::ForeignKeyViolation => {
                StoreError::constraint(operation, db_err.message())
            }
            _ => StoreError::backend(operation, db_err.message()),
        },
        sqlx::Error::PoolClosed => StoreError::unavailable(operation, "connection pool closed"),
        sqlx::Error::PoolTimedOut => {
            StoreError::unavailable(operation, "timed out acquiring a connection")
        }
        sqlx::Error::Io(e) => StoreError::unavailable(operation, e.to_string()),
        other => StoreError::backend(operation, other.to_string()),
    }
}

pub(crate) fn product_from_row<'r, R>(row: &'r R) -> Result<Product, sqlx::Error>
where
    R: Row,
    &'static str: ColumnIndex<R>,
    i64: Decode<'r, R::Database> + Type<R::Database>,
    String: Decode<'r, R::Database> + Type<R::Database>,
{
    Ok(Product {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        stock_quantity: row.try_get("stock_quantity")?,
        low_stock_threshold: row.try_get("low_stock_threshold")?,
    })
}
