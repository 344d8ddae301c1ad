//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! It is a closed set of variants: services return them and the HTTP layer matches on
//! them structurally, never on their rendered text.
//!
//! `AppError` implements `actix_web::error::ResponseError` to convert application errors
//! into HTTP responses with a JSON body of the form `{"error": "<message>"}`.
//! Storage and internal failures are logged with their detail and rendered to the client
//! with a generic message only.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;

use crate::store::StoreError;

const GENERIC_FAILURE: &str = "Internal server error";

/// Represents all possible errors that can occur within the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Client input failed validation (HTTP 400), e.g. an email without `@`.
    ValidationError(String),
    /// The request body could not be decoded (HTTP 400).
    BadRequest(String),
    /// Registration hit an email that is already taken (HTTP 409).
    DuplicateEmail,
    /// Login with an email no account is registered under (HTTP 400).
    IncorrectEmail,
    /// Login with a password that does not match the stored hash (HTTP 400).
    IncorrectPassword,
    /// Protected route called without an `Authorization` header (HTTP 401).
    MissingAuthorization,
    /// `Authorization` header present but not of the form `Bearer <token>` (HTTP 401).
    MalformedAuthorization,
    /// Token signature, structure or claims are invalid (HTTP 401).
    InvalidToken,
    /// Token was valid but its `exp` claim is in the past (HTTP 401).
    TokenExpired,
    /// Verb not supported on the resource (HTTP 405).
    MethodNotAllowed,
    /// Persistence failure (HTTP 500). The detail is logged, never returned.
    StorageError(String),
    /// Hashing or signing failure (HTTP 500). The detail is logged, never returned.
    InternalError(String),
}

impl AppError {
    /// The message shown to the client.
    pub fn client_message(&self) -> String {
        match self {
            AppError::ValidationError(msg) | AppError::BadRequest(msg) => msg.clone(),
            AppError::DuplicateEmail => "Failed to sign up: email is already registered".into(),
            AppError::IncorrectEmail => "Failed to sign in: incorrect email".into(),
            AppError::IncorrectPassword => "Failed to sign in: incorrect password".into(),
            AppError::MissingAuthorization => "Authorization header is required".into(),
            AppError::MalformedAuthorization => "Invalid authorization header format".into(),
            AppError::InvalidToken => "Invalid token".into(),
            AppError::TokenExpired => "Token has expired".into(),
            AppError::MethodNotAllowed => "Method not allowed".into(),
            AppError::StorageError(_) | AppError::InternalError(_) => GENERIC_FAILURE.into(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::DuplicateEmail => write!(f, "Duplicate email"),
            AppError::IncorrectEmail => write!(f, "Incorrect email"),
            AppError::IncorrectPassword => write!(f, "Incorrect password"),
            AppError::MissingAuthorization => write!(f, "Missing authorization"),
            AppError::MalformedAuthorization => write!(f, "Malformed authorization"),
            AppError::InvalidToken => write!(f, "Invalid token"),
            AppError::TokenExpired => write!(f, "Token expired"),
            AppError::MethodNotAllowed => write!(f, "Method not allowed"),
            AppError::StorageError(msg) => write!(f, "Storage Error: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::BadRequest(_)
            | AppError::IncorrectEmail
            | AppError::IncorrectPassword => StatusCode::BAD_REQUEST,
            AppError::DuplicateEmail => StatusCode::CONFLICT,
            AppError::MissingAuthorization
            | AppError::MalformedAuthorization
            | AppError::InvalidToken
            | AppError::TokenExpired => StatusCode::UNAUTHORIZED,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::StorageError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::StorageError(detail) | AppError::InternalError(detail) = self {
            log::error!("{}: {}", self.status_code(), detail);
        }
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.client_message()
        }))
    }
}

/// Converts `StoreError` into `AppError`.
///
/// `NotFound` only reaches this conversion when a caller did not handle it itself,
/// so it is reported as a storage failure.
impl From<StoreError> for AppError {
    fn from(error: StoreError) -> AppError {
        match error {
            StoreError::DuplicateEmail => AppError::DuplicateEmail,
            StoreError::NotFound => AppError::StorageError("record not found".into()),
            StoreError::Storage(msg) => AppError::StorageError(msg),
        }
    }
}
