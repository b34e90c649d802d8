//! Input validation and normalization for discount payloads.
//!
//! Validation order is fixed and matters for error precedence:
//! product title first, then discount percentage, then (in the service)
//! the uniqueness check.

use serde_json::Value;

/// Validate and normalize a product title.
/// - Required, non-empty after trimming surrounding whitespace.
/// - Returns the trimmed title; comparison elsewhere is case-sensitive.
pub fn validate_product_title(raw: Option<&str>) -> Result<String, String> {
    let trimmed = raw.unwrap_or("").trim();

    if trimmed.is_empty() {
        return Err("Product title must not be empty".to_string());
    }

    Ok(trimmed.to_string())
}

/// Validate a discount percentage.
/// - Required; accepts a JSON number or a numeric string.
/// - Must be finite and within the inclusive range [0, 100].
pub fn validate_discount_percentage(raw: Option<&Value>) -> Result<f64, String> {
    let value = raw.ok_or_else(|| "Discount percentage is required".to_string())?;

    let pct = match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| "Discount percentage must be a number".to_string())?,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| "Discount percentage must be a number".to_string())?,
        _ => return Err("Discount percentage must be a number".to_string()),
    };

    if !pct.is_finite() {
        return Err("Discount percentage must be a number".to_string());
    }

    if !(0.0..=100.0).contains(&pct) {
        return Err("Discount percentage must be between 0 and 100".to_string());
    }

    Ok(pct)
}
