pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::web;

use crate::auth::AuthMiddleware;
use crate::error::AppError;

/// Registers every route.
///
/// Expects `web::Data<AccountService>`, `web::Data<TaskService>` and
/// `web::Data<TokenService>` to be registered on the app.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health)
        .service(
            web::resource("/signup")
                .app_data(json_config("Failed to decode json while signing up"))
                .route(web::post().to(auth::sign_up)),
        )
        .service(
            web::resource("/signin")
                .app_data(json_config("Failed to decode json while signing in"))
                .route(web::post().to(auth::sign_in)),
        )
        .service(
            web::resource("/tasks")
                .app_data(json_config("Failed to decode json while creating a task"))
                .wrap(AuthMiddleware)
                .route(web::get().to(tasks::list_tasks))
                .route(web::post().to(tasks::create_task))
                .default_service(web::route().to(tasks::method_not_allowed)),
        );
}

/// JSON extractor config answering decode failures with a 400 and `message`.
fn json_config(message: &'static str) -> web::JsonConfig {
    web::JsonConfig::default().error_handler(move |err, req| {
        log::info!("{} {}: {}", req.method(), req.path(), err);
        AppError::BadRequest(message.to_string()).into()
    })
}
