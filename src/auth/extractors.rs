use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::error::AppError;

/// The owner identity resolved by `AuthMiddleware`.
///
/// The middleware inserts this value into the request extensions after the bearer
/// token validates; handlers take it as an argument. If it is missing, the route was
/// not wrapped by the middleware and the request is rejected as unauthorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUserId(pub i32);

impl FromRequest for AuthenticatedUserId {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUserId>().copied() {
            Some(user_id) => ready(Ok(user_id)),
            None => {
                log::error!("No owner identity on {}; is AuthMiddleware applied?", req.path());
                ready(Err(AppError::MissingAuthorization.into()))
            }
        }
    }
}
