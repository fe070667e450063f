//! Integration tests for Sun Devil Pizza.
//!
//! # Running Tests
//!
//! ```bash
//! # Apply migrations to the database in PIZZA_DATABASE_URL
//! cargo run -p sdp-cli -- migrate
//!
//! # Start the server with a known registration secret
//! PIZZA_REGISTRATION_SECRET=... cargo run -p sun-devil-pizza-server
//!
//! # Run everything, including the tests that need the live server
//! SDP_BASE_URL=http://localhost:3000 PIZZA_REGISTRATION_SECRET=... \
//!     cargo test -p sun-devil-pizza-integration-tests -- --include-ignored
//! ```
//!
//! Without `--include-ignored` only the tests that need no server run.
//!
//! # Test Categories
//!
//! - `pricing` - Cart pricing and order status rules, no server needed
//! - `ordering_flow` - Customer checkout through to a finished order
//! - `employees` - Registration, login and logout

use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::{Client, redirect};
use serde::Deserialize;
use sun_devil_pizza_core::LineItem;

/// Base URL for the pizza server (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("SDP_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Registration secret the server under test was started with.
#[must_use]
pub fn registration_secret() -> Option<String> {
    std::env::var("PIZZA_REGISTRATION_SECRET").ok()
}

/// HTTP client that keeps the session cookie and does not follow redirects.
///
/// Each client is its own session, so two clients never share a cart.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
#[allow(clippy::expect_used)]
pub fn session_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Username that will not collide with earlier runs.
#[must_use]
pub fn unique_username(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{prefix}-{nanos}")
}

/// Order as returned by the order processor views.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessorOrder {
    pub id: i32,
    pub order_num: i32,
    pub items: Vec<LineItem>,
    pub name: String,
    #[serde(rename = "asuID")]
    pub asu_id: String,
    pub pickup_time: String,
}

/// Order as returned by the chef views.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChefOrder {
    pub id: i32,
    pub order_num: i32,
    pub items: Vec<LineItem>,
}
