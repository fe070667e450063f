//! Employee account model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use sun_devil_pizza_core::{AccountId, EmployeeRole};

/// An employee who can log in to the staff pages.
///
/// The password hash is deliberately not part of this type; it is only read
/// alongside the account at login.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub role: EmployeeRole,
    pub created_at: DateTime<Utc>,
}
