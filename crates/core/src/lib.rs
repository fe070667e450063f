//! Sun Devil Pizza Core - Shared domain types.
//!
//! This crate provides the types used across all Sun Devil Pizza components:
//! - `server` - HTTP backend for customers, chefs and order processors
//! - `cli` - Command-line tools for migrations and employee accounts
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP. Menu parsing, cart pricing, the order status machine and
//! checkout field validation all live here so they can be tested without a
//! running server.
//!
//! # Modules
//!
//! - [`types`] - IDs, menu items, carts, order statuses, emails and payment details

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
