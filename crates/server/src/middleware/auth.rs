//! Employee session extractors and the kitchen route gate.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use tower_sessions::Session;

use sun_devil_pizza_core::EmployeeRole;

use crate::error::AppError;
use crate::models::session_keys;
use crate::state::AppState;

/// Extractor that optionally gets the logged-in employee's role.
pub struct OptionalEmployee(pub Option<EmployeeRole>);

impl<S> FromRequestParts<S> for OptionalEmployee
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(session) = parts.extensions.get::<Session>() else {
            return Ok(Self(None));
        };

        let role = session
            .get::<EmployeeRole>(session_keys::PERMISSIONS)
            .await?;
        Ok(Self(role))
    }
}

/// Gate for kitchen routes.
///
/// Does nothing unless `PIZZA_REQUIRE_EMPLOYEE_LOGIN` is set, in which case
/// requests without an employee session get 403.
///
/// # Errors
///
/// Returns `AppError::Forbidden` when login is required and missing.
pub async fn require_employee(
    State(state): State<AppState>,
    OptionalEmployee(role): OptionalEmployee,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if state.config().require_employee_login && role.is_none() {
        tracing::debug!(path = %request.uri().path(), "Rejected kitchen request without login");
        return Err(AppError::Forbidden("employee login required".to_string()));
    }
    Ok(next.run(request).await)
}

/// Store the employee's role in the session (login).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_employee_role(
    session: &Session,
    role: EmployeeRole,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::PERMISSIONS, role).await
}

/// Remove the employee's role from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_employee_role(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<EmployeeRole>(session_keys::PERMISSIONS)
        .await?;
    Ok(())
}
