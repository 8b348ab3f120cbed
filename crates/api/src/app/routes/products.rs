use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use stockroom_products::Product;

use crate::app::dto::{self, MessageResponse, StockAdjustmentRequest};
use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route("/low-stock", get(list_low_stock))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/:id/increase", post(increase_stock))
        .route("/:id/decrease", post(decrease_stock))
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<Option<Product>>, JsonRejection>,
) -> axum::response::Response {
    let Json(candidate) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::invalid_body(rejection),
    };

    match services.products.create(candidate.as_ref()).await {
        Ok(id) => {
            // Validated above, so `candidate` is present.
            let product = Product {
                id,
                ..candidate.unwrap_or_default()
            };
            (StatusCode::CREATED, Json(product)).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.products.list().await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_low_stock(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.products.list_low_stock().await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let Some(id) = dto::parse_path_id(&id) else {
        return errors::invalid_path_id();
    };

    match services.products.get(id).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Full replace. The path id wins over any `id` in the body.
pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<Option<Product>>, JsonRejection>,
) -> axum::response::Response {
    let Some(id) = dto::parse_path_id(&id) else {
        return errors::invalid_path_id();
    };
    let Json(mut candidate) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::invalid_body(rejection),
    };
    if let Some(product) = candidate.as_mut() {
        product.id = id;
    }

    match services.products.update(candidate.as_ref()).await {
        Ok(()) => (StatusCode::OK, Json(candidate)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let Some(id) = dto::parse_path_id(&id) else {
        return errors::invalid_path_id();
    };

    match services.products.delete(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "product deleted",
            }),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn increase_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<StockAdjustmentRequest>, JsonRejection>,
) -> axum::response::Response {
    let Some(id) = dto::parse_path_id(&id) else {
        return errors::invalid_path_id();
    };
    let Json(req) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::invalid_body(rejection),
    };

    match services.products.increase_stock(id, req.amount).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn decrease_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<StockAdjustmentRequest>, JsonRejection>,
) -> axum::response::Response {
    let Some(id) = dto::parse_path_id(&id) else {
        return errors::invalid_path_id();
    };
    let Json(req) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::invalid_body(rejection),
    };

    match services.products.decrease_stock(id, req.amount).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
