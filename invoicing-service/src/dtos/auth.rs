use serde::Deserialize;
use std::fmt;
use validator::Validate;

/// Sign-in form. Lives only for one authentication attempt.
#[derive(Clone, Default, Deserialize, Validate)]
pub struct CredentialsForm {
    #[serde(default)]
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl CredentialsForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

// Keep the plaintext password out of logs.
impl fmt::Debug for CredentialsForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
