pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::{Validate, ValidationError};

// Re-export necessary items
pub use extractors::AuthenticatedUserId;
pub use middleware::AuthMiddleware;
pub use password::PasswordHasher;
pub use token::{Claims, TokenService};

/// Email and plaintext password submitted to `/signup` or `/signin`.
///
/// Exists only for the duration of one call. It is never persisted, and its
/// `Debug` output redacts the password so it cannot end up in a log line.
#[derive(Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct Credential {
    /// Must be non-empty and contain `@`.
    #[validate(
        length(min = 1, message = "email is required"),
        custom = "validate_email_domain"
    )]
    pub email: String,
    /// Must be at least 6 characters long.
    #[validate(length(min = 6, message = "password is too short"))]
    pub password: String,
}

impl Credential {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn validate_email_domain(email: &str) -> Result<(), ValidationError> {
    if email.contains('@') {
        Ok(())
    } else {
        let mut error = ValidationError::new("email_domain");
        error.message = Some("you must enter an email domain".into());
        Err(error)
    }
}

/// Body of a successful `/signup`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SignUpResponse {
    pub id: i32,
}

/// Body of a successful `/signin`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SignInResponse {
    #[serde(rename = "JWT Token")]
    pub token: String,
}
