//! Credential verification for the sign-in form.

use service_core::error::AppError;
use std::sync::Arc;
use thiserror::Error;
use validator::Validate;

use crate::dtos::CredentialsForm;
use crate::models::User;
use crate::services::metrics::AUTH_ATTEMPTS_TOTAL;
use crate::services::store::UserStore;
use crate::utils::{verify_password, Password, PasswordHashString};

pub const INVALID_CREDENTIALS: &str = "invalid credentials.";
pub const SOMETHING_WENT_WRONG: &str = "Something went wrong.";

/// Verdict on a set of credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Authenticated(User),
    Rejected,
}

#[derive(Error, Debug)]
pub enum AuthError {
    /// The user lookup itself failed. Fatal to the sign-in attempt.
    #[error("Failed to fetch user.")]
    Lookup(#[source] AppError),

    /// The verifier could not reach a verdict (e.g. unreadable stored hash).
    #[error("Authentication provider error: {0}")]
    Provider(#[source] anyhow::Error),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Lookup(e) => match e {
                AppError::DatabaseError(inner) => {
                    AppError::DatabaseError(inner.context("Failed to fetch user."))
                }
                other => other,
            },
            AuthError::Provider(e) => AppError::InternalError(e),
        }
    }
}

/// What the sign-in form shows after an attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    SignedIn(User),
    Message(&'static str),
}

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Check credentials against the stored user.
    ///
    /// Malformed credentials and unknown emails are `Rejected` exactly like a
    /// wrong password, so callers cannot tell which one happened.
    #[tracing::instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn authorize(&self, credentials: &CredentialsForm) -> Result<AuthOutcome, AuthError> {
        if credentials.validate().is_err() {
            tracing::debug!("Credentials failed shape validation");
            return Ok(AuthOutcome::Rejected);
        }

        let user = match self
            .store
            .find_user_by_email(&credentials.email)
            .await
            .map_err(AuthError::Lookup)?
        {
            Some(user) => user,
            None => return Ok(AuthOutcome::Rejected),
        };

        // bcrypt is CPU-bound; keep it off the async workers.
        let password = Password::new(credentials.password.clone());
        let hash = PasswordHashString::new(user.password.clone());
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| AuthError::Provider(anyhow::anyhow!("Password verification task failed: {}", e)))?
            .map_err(AuthError::Provider)?;

        if matches {
            Ok(AuthOutcome::Authenticated(user))
        } else {
            Ok(AuthOutcome::Rejected)
        }
    }

    /// Run a sign-in attempt and map the result to what the form should show.
    ///
    /// Lookup failures are not turned into a message; they propagate.
    pub async fn authenticate(&self, credentials: &CredentialsForm) -> Result<LoginOutcome, AppError> {
        let result = self.authorize(credentials).await;

        let label = match &result {
            Ok(AuthOutcome::Authenticated(_)) => "success",
            Ok(AuthOutcome::Rejected) => "rejected",
            Err(AuthError::Lookup(_)) => "lookup_error",
            Err(AuthError::Provider(_)) => "provider_error",
        };
        AUTH_ATTEMPTS_TOTAL.with_label_values(&[label]).inc();

        match result {
            Ok(AuthOutcome::Authenticated(user)) => {
                tracing::info!(user_id = %user.id, "User signed in");
                Ok(LoginOutcome::SignedIn(user))
            }
            Ok(AuthOutcome::Rejected) => {
                tracing::info!("Sign-in rejected");
                Ok(LoginOutcome::Message(INVALID_CREDENTIALS))
            }
            Err(AuthError::Provider(e)) => {
                tracing::error!(error = %e, "Sign-in failed");
                Ok(LoginOutcome::Message(SOMETHING_WENT_WRONG))
            }
            Err(e @ AuthError::Lookup(_)) => {
                tracing::error!(error = %e, "Failed to fetch user");
                Err(e.into())
            }
        }
    }
}
