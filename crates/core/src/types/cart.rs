//! Session cart and cost computation.
//!
//! Prices are whole dollars: every pizza costs [`BASE_PRICE`] plus
//! [`TOPPING_PRICE`] per topping. Tax is 10% of the subtotal, rounded to
//! cents according to a [`TaxRounding`] policy.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::menu::LineItem;

/// Price of a pizza without toppings.
pub const BASE_PRICE: Decimal = Decimal::from_parts(11, 0, 0, false, 0);

/// Price of each topping.
pub const TOPPING_PRICE: Decimal = Decimal::ONE;

/// Sales tax rate (10%).
const TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// How tax is rounded to cents.
///
/// Checkout totals round up, receipts round half away from zero. With exact
/// decimal arithmetic and whole-dollar subtotals both give the same cents,
/// but the two rules stay separate so a change to either is deliberate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaxRounding {
    /// Round up to the next cent (checkout page).
    #[default]
    Ceiling,
    /// Round to the nearest cent, halves away from zero (receipt email).
    HalfUp,
}

impl TaxRounding {
    const fn strategy(self) -> RoundingStrategy {
        match self {
            Self::Ceiling => RoundingStrategy::ToPositiveInfinity,
            Self::HalfUp => RoundingStrategy::MidpointAwayFromZero,
        }
    }
}

/// Subtotal, tax and total for a set of line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl CostBreakdown {
    /// Cost of nothing.
    pub const ZERO: Self = Self {
        subtotal: Decimal::ZERO,
        tax: Decimal::ZERO,
        total: Decimal::ZERO,
    };

    /// Compute the cost of the given items.
    #[must_use]
    pub fn compute<'a>(items: impl IntoIterator<Item = &'a LineItem>, rounding: TaxRounding) -> Self {
        let subtotal: Decimal = items.into_iter().map(item_price).sum();
        let tax = (subtotal * TAX_RATE).round_dp_with_strategy(2, rounding.strategy());

        Self {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

/// Price of a single line item.
#[must_use]
pub fn item_price(item: &LineItem) -> Decimal {
    BASE_PRICE + TOPPING_PRICE * Decimal::from(item.toppings().len())
}

/// An ordered list of line items held in one customer session.
///
/// The cart only grows: items are appended and the whole cart is dropped
/// after checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append an item to the end of the cart.
    pub fn add(&mut self, item: LineItem) {
        self.items.push(item);
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Checkout cost of the cart (tax rounded up).
    #[must_use]
    pub fn cost(&self) -> CostBreakdown {
        CostBreakdown::compute(&self.items, TaxRounding::Ceiling)
    }

    /// Consume the cart, returning its items for an order.
    #[must_use]
    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }
}
