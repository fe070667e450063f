//! CLI subcommand implementations.

pub mod account;
pub mod migrate;

use secrecy::SecretString;

/// Errors shared by commands that need the database.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseUrlError {
    #[error("Missing environment variable: PIZZA_DATABASE_URL (or DATABASE_URL)")]
    Missing,
}

/// Database URL from `PIZZA_DATABASE_URL`, falling back to `DATABASE_URL`.
pub fn database_url() -> Result<SecretString, DatabaseUrlError> {
    dotenvy::dotenv().ok();

    std::env::var("PIZZA_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| DatabaseUrlError::Missing)
}
