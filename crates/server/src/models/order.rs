//! Order model and staff-facing projections.

use chrono::{DateTime, Utc};
use serde::Serialize;

use sun_devil_pizza_core::{LineItem, OrderId, OrderStatus, PaymentDetails};

/// A persisted order.
///
/// Everything except `status` is fixed at checkout.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    /// Display number shown to staff, counted per server process.
    pub order_num: i32,
    pub status: OrderStatus,
    pub payment: PaymentDetails,
    pub items: Vec<LineItem>,
    pub pickup_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Fields for inserting an order at checkout.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub order_num: i32,
    pub payment: PaymentDetails,
    pub items: Vec<LineItem>,
    pub pickup_time: DateTime<Utc>,
}

/// Order as shown on the chef pages (`/readyToCook`, `/cooking`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChefOrderView {
    pub id: OrderId,
    pub order_num: i32,
    pub items: Vec<LineItem>,
}

impl From<Order> for ChefOrderView {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            order_num: order.order_num,
            items: order.items,
        }
    }
}

/// Order as shown on the order processor pages (`/accepted`, `/finished`).
///
/// Carries the customer's name and ASU ID for hand-off, never card data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessorOrderView {
    pub id: OrderId,
    pub order_num: i32,
    pub items: Vec<LineItem>,
    pub name: String,
    #[serde(rename = "asuID")]
    pub asu_id: String,
    pub pickup_time: DateTime<Utc>,
}

impl From<Order> for ProcessorOrderView {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            order_num: order.order_num,
            name: order.payment.full_name(),
            asu_id: order.payment.asu_id,
            items: order.items,
            pickup_time: order.pickup_time,
        }
    }
}
