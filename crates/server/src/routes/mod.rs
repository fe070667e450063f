//! HTTP route handlers for the pizza server.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database ping)
//!
//! # Customer
//! GET  /cart                   - Session cart contents
//! POST /addToCart              - Add a pizza (303 -> /cart)
//! GET  /checkout               - Subtotal, tax, and total of the cart
//! POST /checkout               - Place the order (303 -> /customer)
//!
//! # Kitchen (employee login required when PIZZA_REQUIRE_EMPLOYEE_LOGIN=true)
//! GET  /accepted               - Status 0, order processor view
//! GET  /readyToCook            - Status 1, chef view
//! GET  /cooking                - Status 2, chef view
//! GET  /finished               - Status 3, order processor view
//! POST /incrementStatus        - Advance an order one status
//!
//! # Employees
//! POST /register               - Create an account (needs registration secret)
//! POST /login                  - Log in, responds `OP` or `Chef`
//! POST /logout                 - Log out
//! ```
//!
//! Anything else is a 404.

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod health;
pub mod orders;

use axum::{
    Router,
    http::Uri,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use crate::error::AppError;
use crate::middleware::require_employee;
use crate::state::AppState;

/// Create the customer routes router.
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(cart::show))
        .route("/addToCart", post(cart::add))
        .route("/checkout", get(checkout::summary).post(checkout::place_order))
}

/// Create the kitchen routes router, gated on employee login.
pub fn kitchen_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/accepted", get(orders::accepted))
        .route("/readyToCook", get(orders::ready_to_cook))
        .route("/cooking", get(orders::cooking))
        .route("/finished", get(orders::finished))
        .route("/incrementStatus", post(orders::increment_status))
        .route_layer(from_fn_with_state(state.clone(), require_employee))
}

/// Create the employee account routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create all routes for the server.
pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(customer_routes())
        .merge(kitchen_routes(state))
        .merge(auth_routes())
        .fallback(not_found)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {}", uri.path()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests;
