//! Cart route handlers.
//!
//! The cart lives entirely in the session; nothing is written to the
//! database until checkout.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    response::Redirect,
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use sun_devil_pizza_core::{Cart, LineItem};

use crate::error::{AppError, Result};
use crate::models::session_keys;

/// Body of `POST /addToCart`.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    #[serde(rename = "type")]
    pub pizza_type: Option<String>,
    pub toppings: Option<Vec<String>>,
}

/// Body of `GET /cart`.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub cart: Vec<LineItem>,
}

/// Load the session cart, empty if none exists yet.
pub(crate) async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Replace the session cart.
pub(crate) async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

/// Drop the session cart (after checkout).
pub(crate) async fn clear_cart(session: &Session) -> Result<()> {
    session.remove::<Cart>(session_keys::CART).await?;
    Ok(())
}

/// Show the cart.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<CartResponse>> {
    let cart = load_cart(&session).await?;
    Ok(Json(CartResponse {
        cart: cart.into_items(),
    }))
}

/// Add one pizza to the cart, then redirect to `/cart`.
///
/// Unknown pizza types or toppings are rejected with 400 and the cart is
/// left unchanged.
#[instrument(skip(session, body))]
pub async fn add(
    session: Session,
    body: std::result::Result<Json<AddToCartRequest>, JsonRejection>,
) -> Result<Redirect> {
    let Json(body) = body?;

    let pizza_type = body
        .pizza_type
        .ok_or_else(|| AppError::BadRequest("type is required".to_string()))?;
    let toppings = body.toppings.unwrap_or_default();
    let item = LineItem::parse(&pizza_type, toppings.as_slice())
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let mut cart = load_cart(&session).await?;
    cart.add(item);
    save_cart(&session, &cart).await?;

    tracing::debug!(items = cart.len(), "Added pizza to cart");
    Ok(Redirect::to("/cart"))
}
