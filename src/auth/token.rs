use crate::error::AppError;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

/// Default lifetime of an issued token.
pub const DEFAULT_TTL_HOURS: i64 = 12;

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Identifier of the account the token was issued to.
    pub user_id: i32,
    /// Expiration timestamp (seconds since epoch) for the token.
    pub exp: i64,
}

/// Issues and validates HS256-signed bearer tokens.
///
/// The signing secret is handed in at construction and never read from the
/// process environment here.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8]) -> Self {
        Self::with_ttl(secret, Duration::hours(DEFAULT_TTL_HOURS))
    }

    pub fn with_ttl(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Generates a token for `user_id`, expiring `ttl` from now.
    pub fn issue(&self, user_id: i32) -> Result<String, AppError> {
        self.issue_at(user_id, Utc::now())
    }

    /// Generates a token as if it had been issued at `issued_at`.
    pub fn issue_at(&self, user_id: i32, issued_at: DateTime<Utc>) -> Result<String, AppError> {
        let expiration = issued_at
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::InternalError("token expiry overflows".into()))?;

        let claims = Claims {
            user_id,
            exp: expiration.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("Failed to generate token: {}", e)))
    }

    /// Verifies a token string and returns the owner identity it carries.
    ///
    /// Returns `AppError::TokenExpired` once the `exp` claim has passed and
    /// `AppError::InvalidToken` for every other defect: bad signature, malformed
    /// structure, missing or mistyped claims.
    pub fn validate(&self, token: &str) -> Result<i32, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.user_id)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => {
                    log::debug!("Token rejected: {}", e);
                    AppError::InvalidToken
                }
            })
    }
}
