//! Products domain module.
//!
//! This crate contains the business rules for products and stock levels,
//! expressed against an injected [`ProductStore`] (no HTTP, no SQL).

pub mod product;
pub mod service;
pub mod store;

pub use product::Product;
pub use service::ProductService;
pub use store::ProductStore;
