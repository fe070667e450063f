//! Receipt emails for finished orders.
//!
//! A single background task consumes [`OrderEvent`]s from the lifecycle and
//! sends each customer a plain text receipt. Delivery failures are logged and
//! never reach the request that finished the order.

use rust_decimal::{Decimal, RoundingStrategy};
use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

use sun_devil_pizza_core::{CostBreakdown, LineItem, TaxRounding, item_price};

use super::email::EmailService;
use super::lifecycle::{EventReceiver, OrderEvent};
use crate::models::Order;

/// Subject line of the receipt email.
pub const RECEIPT_SUBJECT: &str = "Order Ready";

/// Spawn the notification worker.
///
/// With no `EmailService` the receipt is written to the log instead. The
/// task ends once every event sender has been dropped.
pub fn spawn_notification_worker(
    email: Option<EmailService>,
    mut events: EventReceiver,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                OrderEvent::Ready(order) => notify_ready(email.as_ref(), &order).await,
            }
        }
        info!("Notification worker stopped");
    })
}

#[instrument(skip_all, fields(order_id = %order.id, order_num = order.order_num))]
async fn notify_ready(email: Option<&EmailService>, order: &Order) {
    let body = compose_receipt(order);
    let to = order.payment.email.as_str();

    let Some(email) = email else {
        info!(receipt = %body, "SMTP not configured, receipt logged instead of sent");
        return;
    };

    match email.send_text_email(to, RECEIPT_SUBJECT, &body).await {
        Ok(()) => info!("Receipt sent"),
        Err(e) => error!(error = %e, "Failed to send receipt"),
    }
}

/// Render the plain text receipt for an order.
#[must_use]
pub fn compose_receipt(order: &Order) -> String {
    let mut body = format!(
        "Hello {},\n\nYour Sun Devil Pizza order is ready for pickup.\n\nOrder Receipt:\n",
        order.payment.first_name
    );

    for item in &order.items {
        body.push_str(&describe_item(item));
        body.push('\n');
    }

    let cost = CostBreakdown::compute(&order.items, TaxRounding::HalfUp);
    body.push_str(&format!(
        "Subtotal: ${}\nTax: ${}\nTotal: ${}",
        money(cost.subtotal),
        money(cost.tax),
        money(cost.total)
    ));

    body
}

/// One receipt line, e.g. `1 Pepperoni pizza with mushroom and olives - $13.00`.
fn describe_item(item: &LineItem) -> String {
    let toppings: Vec<String> = item
        .toppings()
        .iter()
        .map(|t| t.name().to_lowercase())
        .collect();

    let mut line = format!("1 {} pizza", item.pizza_type());
    if !toppings.is_empty() {
        line.push_str(" with ");
        line.push_str(&join_list(&toppings));
    }
    line.push_str(&format!(" - ${}", money(item_price(item))));
    line
}

/// English list: `a`, `a and b`, `a, b, and c`.
fn join_list(words: &[String]) -> String {
    match words {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    }
}

/// Two-decimal rendering of an amount.
fn money(amount: Decimal) -> String {
    let mut amount = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    amount.rescale(2);
    amount.to_string()
}
