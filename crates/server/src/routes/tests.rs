//! Router tests that never reach the database.
//!
//! The pool is lazy, so any handler that would query it is left to the
//! integration tests.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use serde_json::{Value, json};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use tower_sessions::MemoryStore;

use crate::config::{ServerConfig, test_config};
use crate::middleware::session_layer;
use crate::services::lifecycle::event_channel;
use crate::state::AppState;

const SECRET: &str = "Zq8#kP2!vN5@wR7$tY1%";

fn test_app_with(config: ServerConfig) -> Router {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/sun_devil_pizza_test")
        .unwrap();
    let (events, _receiver) = event_channel();
    let layer = session_layer(MemoryStore::default(), &config);
    crate::app(AppState::new(config, pool, events), layer)
}

fn test_app() -> Router {
    test_app_with(test_config())
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value, cookie: Option<&str>) -> Request<Body> {
    post_raw(uri, &body.to_string(), cookie)
}

fn post_raw(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// `name=value` part of the session cookie set by a response.
fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(ToString::to_string)
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// =============================================================================
// Health and fallback
// =============================================================================

#[tokio::test]
async fn test_health() {
    let response = test_app().oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let response = test_app().oneshot(get("/menu", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = test_app()
        .oneshot(post_json("/getCart", &json!({}), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "upstream-42")
        .body(Body::empty())
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "upstream-42");
}

// =============================================================================
// Cart
// =============================================================================

#[tokio::test]
async fn test_empty_cart() {
    let response = test_app().oneshot(get("/cart", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "cart": [] }));
}

#[tokio::test]
async fn test_add_to_cart_redirects_and_persists_in_session() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/addToCart",
            &json!({ "type": "Pepperoni", "toppings": ["Mushroom", "Extra Cheese"] }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/cart");
    let cookie = session_cookie(&response).unwrap();
    assert!(cookie.starts_with("sdp_session="));

    let response = app
        .clone()
        .oneshot(post_json(
            "/addToCart",
            &json!({ "type": "Cheese" }),
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app
        .clone()
        .oneshot(get("/cart", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(
        body_json(response).await,
        json!({ "cart": [
            { "type": "Pepperoni", "toppings": ["Mushroom", "Extra Cheese"] },
            { "type": "Cheese", "toppings": [] },
        ]})
    );

    let response = app.oneshot(get("/checkout", Some(&cookie))).await.unwrap();
    let cost = body_json(response).await;
    assert!((cost["subtotal"].as_f64().unwrap() - 24.0).abs() < 1e-9);
    assert!((cost["tax"].as_f64().unwrap() - 2.4).abs() < 1e-9);
    assert!((cost["total"].as_f64().unwrap() - 26.4).abs() < 1e-9);
}

#[tokio::test]
async fn test_add_to_cart_rejects_invalid_items() {
    let app = test_app();

    for body in [
        json!({ "type": "Hawaiian" }),
        json!({ "type": "Cheese", "toppings": ["Pineapple"] }),
        json!({ "toppings": ["Olives"] }),
        json!({ "type": "Cheese", "toppings": "Olives" }),
    ] {
        let response = app
            .clone()
            .oneshot(post_json("/addToCart", &body, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
    }
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let app = test_app();
    for uri in ["/addToCart", "/checkout", "/incrementStatus", "/register", "/login"] {
        let response = app
            .clone()
            .oneshot(post_raw(uri, "{not json", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {uri}");
    }
}

// =============================================================================
// Checkout
// =============================================================================

#[tokio::test]
async fn test_checkout_summary_without_cart_is_zero() {
    let response = test_app().oneshot(get("/checkout", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "subtotal": 0.0, "tax": 0.0, "total": 0.0 })
    );
}

#[tokio::test]
async fn test_checkout_rejects_invalid_payment() {
    let response = test_app()
        .oneshot(post_json(
            "/checkout",
            &json!({
                "firstName": "Sparky",
                "lastName": "Devil",
                "email": "sparky@asu.edu",
                "cardNumber": "1234567890123",
                "expirationMonth": "04",
                "expirationYear": "27",
                "cardCVV": "123",
                "asuID": "1234567890"
            }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_checkout_rejects_missing_fields() {
    let response = test_app()
        .oneshot(post_json("/checkout", &json!({ "firstName": "Sparky" }), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Employees
// =============================================================================

#[tokio::test]
async fn test_register_checks_secret_first() {
    let response = test_app()
        .oneshot(post_json(
            "/register",
            &json!({ "admin": "wrong", "username": "", "role": 9 }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = test_app()
        .oneshot(post_json("/register", &json!({ "username": "sparky" }), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_register_validates_fields() {
    let app = test_app();
    for body in [
        json!({ "admin": SECRET, "password": "pw" }),
        json!({ "admin": SECRET, "username": "sparky", "password": "" }),
        json!({ "admin": SECRET, "username": "sparky", "password": "pw", "role": 2 }),
        json!({ "admin": SECRET, "username": "sparky", "password": "pw", "role": "chef" }),
    ] {
        let response = app
            .clone()
            .oneshot(post_json("/register", &body, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
    }
}

#[tokio::test]
async fn test_login_without_credentials_is_403() {
    let response = test_app()
        .oneshot(post_json("/login", &json!({ "username": "sparky" }), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_logout_is_ok_without_login() {
    let response = test_app()
        .oneshot(post_json("/logout", &json!({}), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Kitchen gate
// =============================================================================

#[tokio::test]
async fn test_kitchen_routes_require_login_when_enabled() {
    let mut config = test_config();
    config.require_employee_login = true;
    let app = test_app_with(config);

    for uri in ["/accepted", "/readyToCook", "/cooking", "/finished"] {
        let response = app.clone().oneshot(get(uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "uri: {uri}");
    }

    let response = app
        .oneshot(post_json("/incrementStatus", &json!({ "id": 1 }), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_customer_routes_ignore_login_requirement() {
    let mut config = test_config();
    config.require_employee_login = true;

    let response = test_app_with(config)
        .oneshot(get("/cart", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_increment_status_requires_numeric_id() {
    let response = test_app()
        .oneshot(post_json("/incrementStatus", &json!({ "id": "abc" }), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
