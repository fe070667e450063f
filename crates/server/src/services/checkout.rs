//! Checkout: persist the session cart as a new order.

use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use tracing::{info, instrument};

use sun_devil_pizza_core::{Cart, PaymentDetails};

use crate::db::{OrderRepository, RepositoryError};
use crate::models::{NewOrder, Order};

/// Checkout service.
pub struct CheckoutService<'a> {
    orders: OrderRepository<'a>,
}

impl<'a> CheckoutService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            orders: OrderRepository::new(pool),
        }
    }

    /// Store the cart as an `Accepted` order.
    ///
    /// An empty cart still produces an order with no items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the insert fails. The caller's cart is
    /// untouched either way.
    #[instrument(skip(self, cart, payment), fields(items = cart.len()))]
    pub async fn place_order(
        &self,
        cart: &Cart,
        payment: PaymentDetails,
        order_num: i32,
        pickup_delay: Duration,
    ) -> Result<Order, RepositoryError> {
        let new_order = build_order(cart, payment, order_num, Utc::now(), pickup_delay);
        let order = self.orders.create(&new_order).await?;

        info!(order_id = %order.id, order_num, "Order placed");
        Ok(order)
    }
}

fn build_order(
    cart: &Cart,
    payment: PaymentDetails,
    order_num: i32,
    now: DateTime<Utc>,
    pickup_delay: Duration,
) -> NewOrder {
    NewOrder {
        order_num,
        payment,
        items: cart.items().to_vec(),
        pickup_time: now + pickup_delay,
    }
}
