//! Application state shared across handlers.

use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::services::lifecycle::EventSender;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    events: EventSender,
    /// Last order number handed out by this process.
    order_numbers: AtomicI32,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration
    /// * `pool` - `PostgreSQL` connection pool
    /// * `events` - Sender for lifecycle events consumed by the notification worker
    #[must_use]
    pub fn new(config: ServerConfig, pool: PgPool, events: EventSender) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                events,
                order_numbers: AtomicI32::new(0),
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the lifecycle event sender.
    #[must_use]
    pub fn events(&self) -> &EventSender {
        &self.inner.events
    }

    /// Next order number for this process, starting at 1.
    ///
    /// Numbers restart when the server restarts; they are for display only.
    pub fn next_order_number(&self) -> i32 {
        self.inner.order_numbers.fetch_add(1, Ordering::Relaxed) + 1
    }
}
