//! Session-related types.
//!
//! Both customers and employees are anonymous until they log in, so the
//! session only ever carries a cart and, for employees, a role.

/// Session keys.
pub mod keys {
    /// Key for the customer's cart (`Cart`).
    pub const CART: &str = "cart";

    /// Key for the logged-in employee's role (`EmployeeRole`).
    pub const PERMISSIONS: &str = "permissions";
}
