use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;

use crate::database::connection::health_check;
use crate::errors::AppError;
use crate::models::discount::{Discount, DiscountPayload};
use crate::AppState;

/// GET /api/discounts
pub async fn list_discounts(
    State(state): State<AppState>,
) -> Result<Json<Vec<Discount>>, AppError> {
    let discounts = state.discounts.list().await?;
    Ok(Json(discounts))
}

/// POST /api/discounts
pub async fn create_discount(
    State(state): State<AppState>,
    Json(payload): Json<DiscountPayload>,
) -> Result<(StatusCode, Json<Discount>), AppError> {
    let created = state.discounts.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/discounts/:id
pub async fn update_discount(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<DiscountPayload>,
) -> Result<Json<Discount>, AppError> {
    let updated = state.discounts.update(id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /api/discounts/:id
pub async fn delete_discount(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.discounts.delete(id).await?;
    Ok(Json(json!({ "message": "Discount deleted" })))
}

/// GET /api/health
pub async fn health(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    health_check(state.discounts.pool()).await?;
    Ok(Json(json!({ "status": "ok" })))
}
