use actix_web::{web, HttpResponse};

use crate::{
    auth::{Credential, SignInResponse, SignUpResponse},
    error::AppError,
    services::AccountService,
};

/// Register a new account
///
/// Responds `200 {"id": <account id>}`.
pub async fn sign_up(
    accounts: web::Data<AccountService>,
    credential: web::Json<Credential>,
) -> Result<HttpResponse, AppError> {
    let id = accounts.register(&credential).await?;
    Ok(HttpResponse::Ok().json(SignUpResponse { id }))
}

/// Sign in
///
/// Responds `200 {"JWT Token": <token>}`. An unknown email and a wrong password
/// are reported with different messages.
pub async fn sign_in(
    accounts: web::Data<AccountService>,
    credential: web::Json<Credential>,
) -> Result<HttpResponse, AppError> {
    let token = accounts.login(&credential).await?;
    Ok(HttpResponse::Ok().json(SignInResponse { token }))
}
