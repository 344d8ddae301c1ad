use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage, ResponseError,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::{extractors::AuthenticatedUserId, token::TokenService};
use crate::error::AppError;

/// Identity gate for owner-scoped routes.
///
/// Reads `Authorization: Bearer <token>`, validates the token with the
/// `TokenService` registered as app data, and stores the resolved
/// `AuthenticatedUserId` in the request extensions. Any failure answers 401
/// directly; the wrapped service is not called.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authorize(&req) {
            Ok(user_id) => {
                req.extensions_mut().insert(user_id);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(app_err) => {
                log::warn!("Rejected {} {}: {}", req.method(), req.path(), app_err);
                let response = req
                    .into_response(app_err.error_response())
                    .map_into_right_body();
                Box::pin(async move { Ok(response) })
            }
        }
    }
}

fn authorize(req: &ServiceRequest) -> Result<AuthenticatedUserId, AppError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AppError::MissingAuthorization)?;
    let header_value = header_value
        .to_str()
        .map_err(|_| AppError::MalformedAuthorization)?;
    let token = bearer_token(header_value)?;

    let tokens = req.app_data::<web::Data<TokenService>>().ok_or_else(|| {
        AppError::InternalError("TokenService is not registered as app data".into())
    })?;

    tokens.validate(token).map(AuthenticatedUserId)
}

/// Splits an `Authorization` value into its scheme and token.
///
/// Exactly two whitespace-separated parts are accepted, and the scheme must be
/// `Bearer` (case-insensitive).
pub fn bearer_token(header_value: &str) -> Result<&str, AppError> {
    let mut parts = header_value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("Bearer") => Ok(token),
        _ => Err(AppError::MalformedAuthorization),
    }
}
