use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Discount {
    pub id: i64,
    pub product_title: String,
    pub discount_percentage: f64,
}

/// Request body for create/update. Both fields are optional at the wire
/// level so a missing or mistyped value surfaces as our own validation
/// message instead of a framework rejection; the percentage stays a raw
/// JSON value because numeric strings ("10") are accepted too.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscountPayload {
    pub product_title: Option<String>,
    pub discount_percentage: Option<serde_json::Value>,
}
