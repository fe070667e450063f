//! Employee authentication service.
//!
//! Accounts are created with a shared registration secret (or from the CLI)
//! and log in with username and password. Passwords are stored as argon2
//! PHC strings.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;

use sun_devil_pizza_core::EmployeeRole;

use crate::db::{AccountRepository, RepositoryError};
use crate::models::Account;

/// Authentication service.
pub struct AuthService<'a> {
    accounts: AccountRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            accounts: AccountRepository::new(pool),
        }
    }

    /// Register an employee after checking the shared registration secret.
    ///
    /// The secret is checked first, before any field validation.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidRegistrationSecret` if `provided_secret` is wrong.
    /// Returns `AuthError::MissingField` if username or password is empty.
    /// Returns `AuthError::InvalidRole` if `role` is present and not `0` or `1`.
    /// Returns `AuthError::UsernameTaken` if the username exists.
    pub async fn register(
        &self,
        registration_secret: &SecretString,
        provided_secret: Option<&str>,
        username: Option<&str>,
        password: Option<&str>,
        role: Option<&str>,
    ) -> Result<Account, AuthError> {
        if !secrets_match(registration_secret.expose_secret(), provided_secret.unwrap_or("")) {
            return Err(AuthError::InvalidRegistrationSecret);
        }

        let username = required(username, "username")?;
        let password = required(password, "password")?;
        let role = parse_role(role)?;

        self.create_account(username, password, role).await
    }

    /// Create an account without the registration secret (CLI use).
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` if username or password is empty.
    /// Returns `AuthError::UsernameTaken` if the username exists.
    pub async fn create_account(
        &self,
        username: &str,
        password: &str,
        role: EmployeeRole,
    ) -> Result<Account, AuthError> {
        let username = required(Some(username), "username")?;
        let password = required(Some(password), "password")?;
        let password_hash = hash_password(password)?;

        self.accounts
            .create(username, &password_hash, role)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UsernameTaken,
                other => AuthError::Repository(other),
            })
    }

    /// Login with username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if either field is missing,
    /// the account does not exist, or the password is wrong.
    pub async fn login(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Account, AuthError> {
        let (Some(username), Some(password)) = (username, password) else {
            return Err(AuthError::InvalidCredentials);
        };

        let (account, password_hash) = self
            .accounts
            .get_password_hash(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(account)
    }
}

fn required<'s>(value: Option<&'s str>, field: &'static str) -> Result<&'s str, AuthError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(AuthError::MissingField(field))
}

/// Role from its wire code (`0` or `1`); absent means order processor.
fn parse_role(role: Option<&str>) -> Result<EmployeeRole, AuthError> {
    let Some(code) = role else {
        return Ok(EmployeeRole::default());
    };
    code.trim()
        .parse::<i16>()
        .ok()
        .and_then(EmployeeRole::from_code)
        .ok_or_else(|| AuthError::InvalidRole(code.to_string()))
}

/// Compare secrets without short-circuiting on the first differing byte.
fn secrets_match(expected: &str, provided: &str) -> bool {
    let (expected, provided) = (expected.as_bytes(), provided.as_bytes());
    if expected.len() != provided.len() {
        return false;
    }
    expected
        .iter()
        .zip(provided)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

/// Hash a password using Argon2.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("pepperoni-please").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("pepperoni-please", &hash).is_ok());
        assert!(matches!(
            verify_password("pineapple-please", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_parse_role() {
        assert_eq!(parse_role(None).unwrap(), EmployeeRole::OrderProcessor);
        assert_eq!(parse_role(Some("0")).unwrap(), EmployeeRole::OrderProcessor);
        assert_eq!(parse_role(Some("1")).unwrap(), EmployeeRole::Chef);
        assert!(matches!(parse_role(Some("2")), Err(AuthError::InvalidRole(_))));
        assert!(matches!(parse_role(Some("70000")), Err(AuthError::InvalidRole(_))));
        assert!(matches!(parse_role(Some("chef")), Err(AuthError::InvalidRole(_))));
    }

    #[test]
    fn test_required_rejects_empty() {
        assert_eq!(required(Some("sparky"), "username").unwrap(), "sparky");
        assert!(matches!(
            required(Some("  "), "username"),
            Err(AuthError::MissingField("username"))
        ));
        assert!(matches!(
            required(None, "password"),
            Err(AuthError::MissingField("password"))
        ));
    }

    #[test]
    fn test_secrets_match() {
        assert!(secrets_match("Zq8#kP2!vN5@wR7$", "Zq8#kP2!vN5@wR7$"));
        assert!(!secrets_match("Zq8#kP2!vN5@wR7$", "Zq8#kP2!vN5@wR7%"));
        assert!(!secrets_match("Zq8#kP2!vN5@wR7$", ""));
    }
}
