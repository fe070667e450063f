//! Checkout route handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::Redirect,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use sun_devil_pizza_core::{CostBreakdown, PaymentDetails};

use super::cart::{clear_cart, load_cart};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::services::checkout::CheckoutService;
use crate::state::AppState;

/// A form value sent either as a JSON string or a JSON number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Text(String),
    Number(u64),
}

impl FormValue {
    pub(crate) fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(n) => n.to_string(),
        }
    }

    pub(crate) fn into_number<T>(self, field: &str) -> Result<T>
    where
        T: TryFrom<u64> + std::str::FromStr,
    {
        let invalid = || AppError::BadRequest(format!("{field} must be a number"));
        match self {
            Self::Number(n) => T::try_from(n).map_err(|_| invalid()),
            Self::Text(text) => text.trim().parse().map_err(|_| invalid()),
        }
    }
}

/// Body of `POST /checkout`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub card_number: FormValue,
    pub expiration_month: FormValue,
    pub expiration_year: FormValue,
    #[serde(rename = "cardCVV")]
    pub card_cvv: FormValue,
    #[serde(rename = "asuID")]
    pub asu_id: FormValue,
}

impl CheckoutRequest {
    fn into_payment(self) -> Result<PaymentDetails> {
        let month = self.expiration_month.into_number::<u32>("expirationMonth")?;
        let year = self.expiration_year.into_number::<u32>("expirationYear")?;

        PaymentDetails::validate(
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.card_number.into_text(),
            month,
            year,
            &self.card_cvv.into_text(),
            &self.asu_id.into_text(),
        )
        .map_err(|e| AppError::BadRequest(e.to_string()))
    }
}

/// Cost of the current cart.
#[instrument(skip(session))]
pub async fn summary(session: Session) -> Result<Json<CostBreakdown>> {
    let cart = load_cart(&session).await?;
    Ok(Json(cart.cost()))
}

/// Place an order from the session cart, then redirect to `/customer`.
///
/// The cart is only cleared once the order is stored.
#[instrument(skip(state, session, body))]
pub async fn place_order(
    State(state): State<AppState>,
    session: Session,
    body: std::result::Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<Redirect> {
    let Json(body) = body?;
    let payment = body.into_payment()?;
    let cart = load_cart(&session).await?;

    let order = CheckoutService::new(state.pool())
        .place_order(
            &cart,
            payment,
            state.next_order_number(),
            state.config().pickup_delay,
        )
        .await?;

    clear_cart(&session).await?;

    let order_id = order.id.to_string();
    add_breadcrumb("order", "Order placed", Some(&[("order_id", order_id.as_str())]));
    Ok(Redirect::to("/customer"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request(json: &str) -> CheckoutRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_form_strings_are_accepted() {
        let payment = request(
            r#"{
                "firstName": "Sparky", "lastName": "Devil", "email": "sparky@asu.edu",
                "cardNumber": "4111 1111 1111 1111", "expirationMonth": "04",
                "expirationYear": "27", "cardCVV": "123", "asuID": "1234567890"
            }"#,
        )
        .into_payment()
        .unwrap();

        assert_eq!(payment.card_number, "4111111111111111");
        assert_eq!(payment.card_expiration.month, 4);
        assert_eq!(payment.card_expiration.year, 2027);
    }

    #[test]
    fn test_json_numbers_are_accepted() {
        let payment = request(
            r#"{
                "firstName": "Sparky", "lastName": "Devil", "email": "sparky@asu.edu",
                "cardNumber": 4111111111111111, "expirationMonth": 12,
                "expirationYear": 2030, "cardCVV": 1234, "asuID": 1234567890
            }"#,
        )
        .into_payment()
        .unwrap();

        assert_eq!(payment.asu_id, "1234567890");
        assert_eq!(payment.card_cvv, "1234");
    }

    #[test]
    fn test_invalid_fields_are_bad_requests() {
        let err = request(
            r#"{
                "firstName": "Sparky", "lastName": "Devil", "email": "sparky@asu.edu",
                "cardNumber": "4111111111111112", "expirationMonth": "04",
                "expirationYear": "27", "cardCVV": "123", "asuID": "1234567890"
            }"#,
        )
        .into_payment()
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = request(
            r#"{
                "firstName": "Sparky", "lastName": "Devil", "email": "sparky@asu.edu",
                "cardNumber": "4111111111111111", "expirationMonth": "April",
                "expirationYear": "27", "cardCVV": "123", "asuID": "1234567890"
            }"#,
        )
        .into_payment()
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("expirationMonth")));
    }
}
