pub mod config;
pub mod database;
pub mod errors;
pub mod models;
pub mod routes;
pub mod service;
pub mod validation;

use service::discount_service::DiscountService;

/// Shared application state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub discounts: DiscountService,
}
