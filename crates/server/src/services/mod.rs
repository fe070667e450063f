//! Business logic services for the pizza server.
//!
//! # Services
//!
//! - `auth` - Employee registration and login (argon2)
//! - `checkout` - Turning a session cart into a persisted order
//! - `lifecycle` - Advancing order status and publishing ready events
//! - `notification` - Background worker that emails receipts
//! - `email` - SMTP delivery via lettre

pub mod auth;
pub mod checkout;
pub mod email;
pub mod lifecycle;
pub mod notification;
