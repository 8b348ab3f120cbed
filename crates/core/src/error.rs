//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// A flat taxonomy: every business-rule rejection has its own variant so the
/// boundary layer can map them exhaustively. Storage failures that are not
/// already classified pass through untouched as [`DomainError::Storage`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The candidate product was absent (e.g. a `null` request body).
    #[error("product is nil")]
    NilEntity,

    /// An identifier was zero or negative.
    #[error("invalid id")]
    InvalidId,

    /// The product name was empty after trimming whitespace.
    #[error("name is required")]
    EmptyName,

    #[error("stock_quantity cannot be negative")]
    NegativeStock,

    #[error("low_stock_threshold cannot be negative")]
    NegativeThreshold,

    /// A stock adjustment amount was zero or negative.
    #[error("amount must be greater than zero")]
    InvalidAmount,

    #[error("insufficient stock")]
    InsufficientStock,

    /// Increasing stock would exceed the representable maximum.
    #[error("stock quantity overflow")]
    StockOverflow,

    #[error("product not found")]
    NotFound,

    /// Opaque passthrough of a storage failure.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl DomainError {
    /// True for rejections caused by the caller's input (as opposed to
    /// missing rows or storage failures).
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::NotFound | Self::Storage(_))
    }
}

/// Storage collaborator failure.
///
/// These are infrastructure errors (I/O, constraints, pool state); "no such
/// row" is not an error and is reported by the store as `None`/`false`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A schema-level constraint rejected the write.
    #[error("constraint violated in {operation}: {message}")]
    Constraint { operation: String, message: String },

    /// The backing store cannot be reached (closed pool, poisoned lock).
    #[error("storage unavailable in {operation}: {message}")]
    Unavailable { operation: String, message: String },

    /// Any other backend failure.
    #[error("storage failure in {operation}: {message}")]
    Backend { operation: String, message: String },
}

impl StoreError {
    pub fn constraint(operation: &str, message: impl Into<String>) -> Self {
        Self::Constraint {
            operation: operation.to_string(),
            message: message.into(),
        }
    }

    pub fn unavailable(operation: &str, message: impl Into<String>) -> Self {
        Self::Unavailable {
            operation: operation.to_string(),
            message: message.into(),
        }
    }

    pub fn backend(operation: &str, message: impl Into<String>) -> Self {
        Self::Backend {
            operation: operation.to_string(),
            message: message.into(),
        }
    }
}
