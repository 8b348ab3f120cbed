//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: storage selection and engine construction
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: engine error → status mapping, consistent error bodies

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use stockroom_core::StoreError;
use stockroom_infra::AppConfig;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: &AppConfig) -> Result<Router, StoreError> {
    let services = services::build_services(&config.database).await?;
    Ok(router(services))
}

/// Router over already-built services.
pub fn router(services: AppServices) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(Arc::new(services)))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
