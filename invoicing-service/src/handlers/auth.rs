use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use service_core::error::AppError;
use tower_sessions::Session;

use crate::dtos::{ActionState, CredentialsForm};
use crate::middleware::{LOGIN_PATH, USER_KEY};
use crate::models::SanitizedUser;
use crate::services::LoginOutcome;
use crate::startup::AppState;

pub const DASHBOARD_PATH: &str = "/dashboard";

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(credentials): Form<CredentialsForm>,
) -> Result<Response, AppError> {
    match state.auth.authenticate(&credentials).await? {
        LoginOutcome::SignedIn(user) => {
            // New id on privilege change.
            session
                .cycle_id()
                .await
                .map_err(|e| AppError::InternalError(anyhow::anyhow!("Session error: {}", e)))?;
            session
                .insert(USER_KEY, SanitizedUser::from(&user))
                .await
                .map_err(|e| AppError::InternalError(anyhow::anyhow!("Session error: {}", e)))?;

            Ok(Redirect::to(DASHBOARD_PATH).into_response())
        }
        LoginOutcome::Message(message) => Ok((
            StatusCode::UNAUTHORIZED,
            Json(ActionState::message(message)),
        )
            .into_response()),
    }
}

/// POST /logout
pub async fn logout(session: Session) -> Result<Response, AppError> {
    session
        .flush()
        .await
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("Session error: {}", e)))?;

    Ok(Redirect::to(LOGIN_PATH).into_response())
}
