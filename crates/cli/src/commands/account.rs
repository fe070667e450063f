//! Employee account management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create an order processor
//! sdp-cli account create -u front-counter -p 'correct horse' -r op
//!
//! # Create a chef
//! sdp-cli account create -u oven -p 'battery staple' -r chef
//! ```
//!
//! # Environment Variables
//!
//! - `PIZZA_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)

use sun_devil_pizza_core::{AccountId, EmployeeRole};
use sun_devil_pizza_server::db;
use sun_devil_pizza_server::services::auth::{AuthError, AuthService};
use thiserror::Error;

use super::{DatabaseUrlError, database_url};

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error(transparent)]
    DatabaseUrl(#[from] DatabaseUrlError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid role.
    #[error("Invalid role: {0}. Valid roles: op, chef")]
    InvalidRole(String),

    /// Account could not be created.
    #[error("Could not create account: {0}")]
    Auth(#[from] AuthError),
}

/// Create a new employee account.
///
/// # Arguments
///
/// * `username` - Login name, must be unique
/// * `password` - Plain password, stored as an argon2 hash
/// * `role` - `op` (order processor) or `chef`
///
/// # Returns
///
/// The ID of the created account.
pub async fn create(username: &str, password: &str, role: &str) -> Result<AccountId, AccountError> {
    let role: EmployeeRole = role
        .parse()
        .map_err(|_| AccountError::InvalidRole(role.to_owned()))?;

    let database_url = database_url()?;
    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    tracing::info!("Creating account: {} ({})", username, role);
    let account = AuthService::new(&pool)
        .create_account(username, password, role)
        .await?;

    tracing::info!(
        "Account created successfully! ID: {}, Username: {}, Role: {}",
        account.id,
        account.username,
        account.role
    );
    Ok(account.id)
}
