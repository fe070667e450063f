//! Employee authentication route handlers.
//!
//! Registration requires the shared registration secret. Login stores the
//! employee's role in the session under `permissions`.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::checkout::FormValue;
use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{clear_employee_role, set_employee_role};
use crate::services::auth::AuthService;
use crate::state::AppState;

// =============================================================================
// Request Types
// =============================================================================

/// Body of `POST /register`.
#[derive(Deserialize)]
pub struct RegisterRequest {
    /// Shared registration secret.
    pub admin: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// 0 for order processor (default), 1 for chef.
    pub role: Option<FormValue>,
}

/// Body of `POST /login`.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Create an employee account.
#[instrument(skip(state, body))]
pub async fn register(
    State(state): State<AppState>,
    body: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<StatusCode> {
    let Json(body) = body?;
    let role = body.role.map(FormValue::into_text);

    let account = AuthService::new(state.pool())
        .register(
            &state.config().registration_secret,
            body.admin.as_deref(),
            body.username.as_deref(),
            body.password.as_deref(),
            role.as_deref(),
        )
        .await?;

    tracing::info!(username = %account.username, role = %account.role, "Employee registered");
    Ok(StatusCode::OK)
}

/// Log an employee in and respond with their role label (`OP` or `Chef`).
///
/// A failed login leaves the session untouched.
#[instrument(skip(state, session, body))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    body: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<&'static str> {
    let Json(body) = body?;

    let account = AuthService::new(state.pool())
        .login(body.username.as_deref(), body.password.as_deref())
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "Login failed"))?;

    set_employee_role(&session, account.role).await?;
    set_sentry_user(&account.username);

    tracing::info!(username = %account.username, role = %account.role, "Employee logged in");
    Ok(account.role.label())
}

/// Log the employee out. The customer's cart is kept.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_employee_role(&session).await?;
    clear_sentry_user();
    Ok(StatusCode::OK)
}
