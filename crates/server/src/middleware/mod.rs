//! HTTP middleware stack for the pizza server.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions with `PostgreSQL` store)
//! 5. Employee gate on kitchen routes (only when login is required)

pub mod auth;
pub mod request_id;
pub mod session;

pub use auth::{OptionalEmployee, clear_employee_role, require_employee, set_employee_role};
pub use request_id::request_id_middleware;
pub use session::{create_session_layer, session_layer};
