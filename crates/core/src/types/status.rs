//! Order lifecycle status and employee roles.
//!
//! Both are stored as small integer codes, so each enum converts to and from
//! its code and rejects anything out of range.

use serde::{Deserialize, Serialize};

/// Errors produced by the order lifecycle.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    /// The order already reached the terminal status.
    #[error("order is already finished")]
    AlreadyFinished,
    /// A status code outside 0..=3.
    #[error("invalid order status code: {0}")]
    InvalidCode(i16),
}

/// Stage of an order in the kitchen.
///
/// Orders move forward one step at a time and never go back:
///
/// ```text
/// Accepted (0) -> ReadyToCook (1) -> Cooking (2) -> Finished (3)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum OrderStatus {
    /// Checked out, waiting for an order processor.
    #[default]
    Accepted,
    /// Accepted by an order processor, waiting for the chef.
    ReadyToCook,
    /// In the oven.
    Cooking,
    /// Ready for pickup. Terminal.
    Finished,
}

impl OrderStatus {
    /// Numeric status code as stored in the database.
    #[must_use]
    pub const fn code(self) -> i16 {
        match self {
            Self::Accepted => 0,
            Self::ReadyToCook => 1,
            Self::Cooking => 2,
            Self::Finished => 3,
        }
    }

    /// Status for a numeric code.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::InvalidCode` for codes outside 0..=3.
    pub const fn from_code(code: i16) -> Result<Self, TransitionError> {
        match code {
            0 => Ok(Self::Accepted),
            1 => Ok(Self::ReadyToCook),
            2 => Ok(Self::Cooking),
            3 => Ok(Self::Finished),
            other => Err(TransitionError::InvalidCode(other)),
        }
    }

    /// The status one step ahead.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::AlreadyFinished` for [`OrderStatus::Finished`].
    pub const fn next(self) -> Result<Self, TransitionError> {
        match self {
            Self::Accepted => Ok(Self::ReadyToCook),
            Self::ReadyToCook => Ok(Self::Cooking),
            Self::Cooking => Ok(Self::Finished),
            Self::Finished => Err(TransitionError::AlreadyFinished),
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Finished)
    }
}

impl TryFrom<i16> for OrderStatus {
    type Error = TransitionError;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl From<OrderStatus> for i16 {
    fn from(status: OrderStatus) -> Self {
        status.code()
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Accepted => write!(f, "accepted"),
            Self::ReadyToCook => write!(f, "ready_to_cook"),
            Self::Cooking => write!(f, "cooking"),
            Self::Finished => write!(f, "finished"),
        }
    }
}

/// Employee role with different page access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeRole {
    /// Accepts incoming orders and hands out finished ones.
    #[default]
    OrderProcessor,
    /// Cooks orders.
    Chef,
}

impl EmployeeRole {
    /// Numeric role code as stored in the database.
    #[must_use]
    pub const fn code(self) -> i16 {
        match self {
            Self::OrderProcessor => 0,
            Self::Chef => 1,
        }
    }

    /// Role for a numeric code, `None` if the code is unknown.
    #[must_use]
    pub const fn from_code(code: i16) -> Option<Self> {
        match code {
            0 => Some(Self::OrderProcessor),
            1 => Some(Self::Chef),
            _ => None,
        }
    }

    /// Short label returned to the login page.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OrderProcessor => "OP",
            Self::Chef => "Chef",
        }
    }
}

impl std::fmt::Display for EmployeeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OrderProcessor => write!(f, "order_processor"),
            Self::Chef => write!(f, "chef"),
        }
    }
}

impl std::str::FromStr for EmployeeRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "order_processor" | "op" => Ok(Self::OrderProcessor),
            "chef" => Ok(Self::Chef),
            _ => Err(format!("invalid employee role: {s}")),
        }
    }
}
