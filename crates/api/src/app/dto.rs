use serde::{Deserialize, Serialize};

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /products/{id}/increase` and `/decrease`.
#[derive(Debug, Deserialize)]
pub struct StockAdjustmentRequest {
    pub amount: i64,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Parse a `{id}` path segment. Non-numeric ids are rejected here; the
/// sign check belongs to the engine.
pub fn parse_path_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}
