pub mod discount_routes;

use axum::routing::{get, put};
use axum::Router;

use crate::AppState;

/// Assemble the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/discounts",
            get(discount_routes::list_discounts).post(discount_routes::create_discount),
        )
        .route(
            "/api/discounts/:id",
            put(discount_routes::update_discount).delete(discount_routes::delete_discount),
        )
        .route("/api/health", get(discount_routes::health))
        .with_state(state)
}
