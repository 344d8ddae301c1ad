#![allow(dead_code)]

use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::{header, StatusCode},
    middleware::Logger,
    test, web, App,
};
use serde_json::{json, Value};
use std::sync::Arc;

use taskmaster::{
    auth::{password::MIN_COST, PasswordHasher, TokenService},
    routes,
    services::{AccountService, TaskService},
    store::{MemoryStore, Store},
};

pub const SECRET: &[u8] = b"integration_test_secret";

/// Builds the full application over `store`, signing tokens with `SECRET`.
pub async fn init_app(
    store: Arc<MemoryStore>,
) -> impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>
{
    init_app_with_tokens(store, Arc::new(TokenService::new(SECRET))).await
}

/// Same as `init_app`, with a caller-supplied token service.
pub async fn init_app_with_tokens(
    store: Arc<MemoryStore>,
    tokens: Arc<TokenService>,
) -> impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>
{
    let store: Arc<dyn Store> = store;
    let accounts = AccountService::new(store.clone(), PasswordHasher::new(MIN_COST), tokens.clone());

    test::init_service(
        App::new()
            .app_data(web::Data::new(accounts))
            .app_data(web::Data::new(TaskService::new(store)))
            .app_data(web::Data::from(tokens))
            .wrap(Logger::default())
            .configure(routes::config),
    )
    .await
}

/// Sends `req` and returns the status with the body parsed as JSON (`Null` if it is not).
pub async fn send<S, B>(app: &S, req: actix_http::Request) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

pub async fn sign_up<S, B>(app: &S, email: &str, password: &str) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/signup")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    send(app, req).await
}

pub async fn sign_in<S, B>(app: &S, email: &str, password: &str) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/signin")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    send(app, req).await
}

/// Registers and signs in, returning the account id and its bearer token.
pub async fn register_and_login<S, B>(app: &S, email: &str, password: &str) -> (i32, String)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = sign_up(app, email, password).await;
    assert_eq!(status, StatusCode::OK, "sign up failed: {}", body);
    let id = body["id"].as_i64().expect("id in sign-up response") as i32;

    let (status, body) = sign_in(app, email, password).await;
    assert_eq!(status, StatusCode::OK, "sign in failed: {}", body);
    let token = body["JWT Token"]
        .as_str()
        .expect("token in sign-in response")
        .to_string();

    (id, token)
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}
