//! Employee registration, login and logout against a running server.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The pizza server running (cargo run -p sun-devil-pizza-server)
//! - `PIZZA_REGISTRATION_SECRET` set to the server's registration secret
//!
//! Run with:
//! `SDP_BASE_URL=http://localhost:3000 PIZZA_REGISTRATION_SECRET=... cargo test -p sun-devil-pizza-integration-tests -- --include-ignored`

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use sun_devil_pizza_integration_tests::{
    base_url, registration_secret, session_client, unique_username,
};

async fn post_json(client: &Client, path: &str, body: &Value) -> reqwest::Response {
    client
        .post(format!("{}{path}", base_url()))
        .json(body)
        .send()
        .await
        .expect("Request failed")
}

fn secret() -> String {
    registration_secret().expect("PIZZA_REGISTRATION_SECRET must be set")
}

async fn register(client: &Client, username: &str, role: Value) -> StatusCode {
    post_json(
        client,
        "/register",
        &json!({
            "admin": secret(),
            "username": username,
            "password": "correct horse battery staple",
            "role": role,
        }),
    )
    .await
    .status()
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
#[ignore = "Requires running pizza server and database"]
async fn test_register_then_login_reports_role() {
    let client = session_client();
    let chef = unique_username("chef");
    let processor = unique_username("op");

    assert_eq!(register(&client, &chef, json!(1)).await, StatusCode::OK);
    assert_eq!(register(&client, &processor, json!("0")).await, StatusCode::OK);

    for (username, label) in [(&chef, "Chef"), (&processor, "OP")] {
        let resp = post_json(
            &client,
            "/login",
            &json!({ "username": username, "password": "correct horse battery staple" }),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.text().await.expect("Body"), label);
    }
}

#[tokio::test]
#[ignore = "Requires running pizza server and database"]
async fn test_register_duplicate_username_is_400() {
    let client = session_client();
    let username = unique_username("dup");

    assert_eq!(register(&client, &username, json!(0)).await, StatusCode::OK);
    assert_eq!(
        register(&client, &username, json!(1)).await,
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
#[ignore = "Requires running pizza server and database"]
async fn test_register_wrong_secret_is_403() {
    let client = session_client();
    let resp = post_json(
        &client,
        "/register",
        &json!({ "admin": "not-the-secret", "username": unique_username("x"), "password": "pw" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

// ============================================================================
// Login & Logout
// ============================================================================

#[tokio::test]
#[ignore = "Requires running pizza server and database"]
async fn test_login_wrong_password_is_403() {
    let client = session_client();
    let username = unique_username("pw");
    assert_eq!(register(&client, &username, json!(0)).await, StatusCode::OK);

    let resp = post_json(
        &client,
        "/login",
        &json!({ "username": username, "password": "wrong" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = post_json(
        &client,
        "/login",
        &json!({ "username": unique_username("ghost"), "password": "wrong" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "Requires running pizza server and database"]
async fn test_logout_keeps_cart() {
    let client = session_client();
    let username = unique_username("out");
    assert_eq!(register(&client, &username, json!(0)).await, StatusCode::OK);

    post_json(&client, "/addToCart", &json!({ "type": "Cheese" })).await;
    post_json(
        &client,
        "/login",
        &json!({ "username": username, "password": "correct horse battery staple" }),
    )
    .await;

    let resp = post_json(&client, "/logout", &json!({})).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cart: Value = client
        .get(format!("{}/cart", base_url()))
        .send()
        .await
        .expect("Request failed")
        .json()
        .await
        .expect("Invalid JSON body");
    assert_eq!(cart["cart"].as_array().map(Vec::len), Some(1));
}
