//! Core types for Sun Devil Pizza.
//!
//! This module provides type-safe wrappers for the ordering domain.

pub mod cart;
pub mod email;
pub mod id;
pub mod menu;
pub mod payment;
pub mod status;

pub use cart::{BASE_PRICE, Cart, CostBreakdown, TOPPING_PRICE, TaxRounding, item_price};
pub use email::{Email, EmailError};
pub use id::*;
pub use menu::{LineItem, MenuError, PizzaType, Topping};
pub use payment::{CardExpiration, PaymentDetails, PaymentError, luhn_valid};
pub use status::{EmployeeRole, OrderStatus, TransitionError};
