//! Order lifecycle: advancing status and announcing finished orders.
//!
//! ```text
//! 0 Accepted -> 1 ReadyToCook -> 2 Cooking -> 3 Finished
//! ```
//!
//! The step is a single conditional `UPDATE`, so the status that was replaced
//! is known exactly. Only a replaced `Cooking` status produces an
//! [`OrderEvent::Ready`], which means each order is announced at most once.

use sqlx::PgPool;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};

use sun_devil_pizza_core::{OrderId, OrderStatus};

use crate::db::{OrderRepository, RepositoryError};
use crate::models::Order;

/// Errors from advancing an order.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// No order with the given id.
    #[error("order not found")]
    OrderNotFound,

    /// The order is already at the terminal status.
    #[error("order is already finished")]
    AlreadyFinished,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

impl LifecycleError {
    /// Whether this error is the server's fault rather than the caller's.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::Repository(_))
    }
}

/// Events published by the lifecycle for background consumers.
#[derive(Debug, Clone)]
pub enum OrderEvent {
    /// The order moved from cooking to finished and can be picked up.
    Ready(Order),
}

/// Sending half of the lifecycle event channel.
pub type EventSender = mpsc::UnboundedSender<OrderEvent>;

/// Receiving half of the lifecycle event channel.
pub type EventReceiver = mpsc::UnboundedReceiver<OrderEvent>;

/// Create the lifecycle event channel.
#[must_use]
pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// Result of a successful advance.
#[derive(Debug, Clone)]
pub struct Transition {
    /// Status that was replaced.
    pub previous: OrderStatus,
    /// Order after the update.
    pub order: Order,
}

impl Transition {
    /// Event this transition publishes, if any.
    #[must_use]
    pub fn event(&self) -> Option<OrderEvent> {
        (self.previous == OrderStatus::Cooking).then(|| OrderEvent::Ready(self.order.clone()))
    }
}

/// Order lifecycle service.
pub struct LifecycleService<'a> {
    orders: OrderRepository<'a>,
    events: &'a EventSender,
}

impl<'a> LifecycleService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool, events: &'a EventSender) -> Self {
        Self {
            orders: OrderRepository::new(pool),
            events,
        }
    }

    /// Advance an order by exactly one status.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::AlreadyFinished` if the order is at status 3.
    /// Returns `LifecycleError::OrderNotFound` if no order has this id.
    /// Neither case changes anything.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn advance(&self, id: OrderId) -> Result<Transition, LifecycleError> {
        let Some((previous, order)) = self.orders.advance(id).await? else {
            // Nothing matched; find out why.
            return match self.orders.status(id).await? {
                Some(_) => Err(LifecycleError::AlreadyFinished),
                None => Err(LifecycleError::OrderNotFound),
            };
        };

        let transition = Transition { previous, order };
        info!(
            from = %transition.previous,
            to = %transition.order.status,
            "Order advanced"
        );
        publish(&transition, self.events);

        Ok(transition)
    }
}

/// Publish the transition's event, if it has one.
///
/// A closed channel is logged; the status change itself already happened.
fn publish(transition: &Transition, events: &EventSender) {
    if let Some(event) = transition.event()
        && events.send(event).is_err()
    {
        warn!(
            order_id = %transition.order.id,
            "Notification worker is not running; ready event dropped"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::order::tests::sample_order;

    fn transition(previous: OrderStatus) -> Transition {
        let current = previous.next().unwrap();
        Transition {
            previous,
            order: sample_order(current),
        }
    }

    #[test]
    fn test_only_cooking_to_finished_emits_event() {
        assert!(transition(OrderStatus::Accepted).event().is_none());
        assert!(transition(OrderStatus::ReadyToCook).event().is_none());

        let Some(OrderEvent::Ready(order)) = transition(OrderStatus::Cooking).event() else {
            panic!("expected a ready event");
        };
        assert_eq!(order.status, OrderStatus::Finished);
        assert_eq!(order.id, OrderId::new(7));
    }

    #[tokio::test]
    async fn test_publish_sends_one_event_per_finish() {
        let (events, mut receiver) = event_channel();

        publish(&transition(OrderStatus::Accepted), &events);
        publish(&transition(OrderStatus::ReadyToCook), &events);
        publish(&transition(OrderStatus::Cooking), &events);
        drop(events);

        let mut received = Vec::new();
        while let Some(event) = receiver.recv().await {
            received.push(event);
        }
        assert_eq!(received.len(), 1);
        assert!(matches!(&received[0], OrderEvent::Ready(order) if order.status.is_terminal()));
    }

    #[test]
    fn test_publish_tolerates_closed_channel() {
        let (events, receiver) = event_channel();
        drop(receiver);
        publish(&transition(OrderStatus::Cooking), &events);
    }

    #[test]
    fn test_error_classification() {
        assert!(!LifecycleError::OrderNotFound.is_server_error());
        assert!(!LifecycleError::AlreadyFinished.is_server_error());
        assert!(
            LifecycleError::Repository(RepositoryError::DataCorruption(
                "invalid status on order 7".to_string()
            ))
            .is_server_error()
        );
    }
}
