//! Domain models for the pizza server.
//!
//! - `order` - Persisted orders and the JSON projections served to staff pages
//! - `account` - Employee accounts
//! - `session` - Keys for data stored in the customer/employee session

pub mod account;
pub mod order;
pub mod session;

pub use account::Account;
pub use order::{ChefOrderView, NewOrder, Order, ProcessorOrderView};
pub use session::keys as session_keys;
