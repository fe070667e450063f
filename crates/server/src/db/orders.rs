//! Order repository.
//!
//! Orders are only ever inserted and have their status bumped; nothing else
//! about a row changes after checkout.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;

use sun_devil_pizza_core::{
    CardExpiration, Email, LineItem, OrderId, OrderStatus, PaymentDetails,
};

use super::RepositoryError;
use crate::models::{NewOrder, Order};

const ORDER_COLUMNS: &str = "id, order_num, status, first_name, last_name, email, \
     card_number, card_exp_month, card_exp_year, card_cvv, asu_id, items, \
     pickup_time, created_at";

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i32,
    order_num: i32,
    status: i16,
    first_name: String,
    last_name: String,
    email: String,
    card_number: String,
    card_exp_month: i16,
    card_exp_year: i32,
    card_cvv: String,
    asu_id: String,
    items: Json<Vec<LineItem>>,
    pickup_time: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let corrupt = |what: &str| {
            RepositoryError::DataCorruption(format!("invalid {what} on order {}", row.id))
        };

        let status = OrderStatus::from_code(row.status).map_err(|_| corrupt("status"))?;
        let email = Email::parse(&row.email).map_err(|_| corrupt("email"))?;
        let card_expiration = CardExpiration {
            month: u8::try_from(row.card_exp_month).map_err(|_| corrupt("expiration month"))?,
            year: u16::try_from(row.card_exp_year).map_err(|_| corrupt("expiration year"))?,
        };

        Ok(Self {
            id: OrderId::new(row.id),
            order_num: row.order_num,
            status,
            payment: PaymentDetails {
                first_name: row.first_name,
                last_name: row.last_name,
                email,
                card_number: row.card_number,
                card_expiration,
                card_cvv: row.card_cvv,
                asu_id: row.asu_id,
            },
            items: row.items.0,
            pickup_time: row.pickup_time,
            created_at: row.created_at,
        })
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert an order at status `Accepted`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, order: &NewOrder) -> Result<Order, RepositoryError> {
        let payment = &order.payment;
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r"
            INSERT INTO pizza.orders (
                order_num, status, first_name, last_name, email,
                card_number, card_exp_month, card_exp_year, card_cvv, asu_id,
                items, pickup_time
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {ORDER_COLUMNS}
            "
        ))
        .bind(order.order_num)
        .bind(OrderStatus::Accepted.code())
        .bind(&payment.first_name)
        .bind(&payment.last_name)
        .bind(payment.email.as_str())
        .bind(&payment.card_number)
        .bind(i16::from(payment.card_expiration.month))
        .bind(i32::from(payment.card_expiration.year))
        .bind(&payment.card_cvv)
        .bind(&payment.asu_id)
        .bind(Json(&order.items))
        .bind(order.pickup_time)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// List every order currently at `status`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row cannot be decoded.
    pub async fn list_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM pizza.orders WHERE status = $1 ORDER BY id"
        ))
        .bind(status.code())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    /// Move an order one status forward in a single statement.
    ///
    /// Returns the status that was replaced along with the updated order, or
    /// `None` if no row matched (unknown id, or already finished). Concurrent
    /// callers serialize on the row lock, so each sees a distinct prior status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    /// Returns `RepositoryError::DataCorruption` if the row cannot be decoded.
    pub async fn advance(
        &self,
        id: OrderId,
    ) -> Result<Option<(OrderStatus, Order)>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r"
            UPDATE pizza.orders
            SET status = status + 1
            WHERE id = $1 AND status < $2
            RETURNING {ORDER_COLUMNS}
            "
        ))
        .bind(id)
        .bind(OrderStatus::Finished.code())
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let previous = OrderStatus::from_code(row.status - 1).map_err(|_| {
            RepositoryError::DataCorruption(format!("invalid status on order {}", row.id))
        })?;
        Ok(Some((previous, row.try_into()?)))
    }

    /// Current status of an order, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored code is out of range.
    pub async fn status(&self, id: OrderId) -> Result<Option<OrderStatus>, RepositoryError> {
        let code: Option<(i16,)> = sqlx::query_as("SELECT status FROM pizza.orders WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        code.map(|(code,)| {
            OrderStatus::from_code(code).map_err(|_| {
                RepositoryError::DataCorruption(format!("invalid status on order {id}"))
            })
        })
        .transpose()
    }
}
