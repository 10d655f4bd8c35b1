use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::SanitizedUser;

/// Session key holding the signed-in [`SanitizedUser`].
pub const USER_KEY: &str = "user";

pub const LOGIN_PATH: &str = "/login";

/// Send requests without a signed-in user to the login page.
pub async fn require_session(session: Session, request: Request, next: Next) -> Response {
    match session.get::<SanitizedUser>(USER_KEY).await {
        Ok(Some(user)) => {
            tracing::debug!(user_id = %user.id, "Session authenticated");
            next.run(request).await
        }
        Ok(None) => Redirect::to(LOGIN_PATH).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read session");
            Redirect::to(LOGIN_PATH).into_response()
        }
    }
}
