use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use chrono::Duration;
use std::sync::Arc;

use taskmaster::{
    auth::{PasswordHasher, TokenService},
    config::Config,
    routes,
    services::{AccountService, TaskService},
    store::{PgStore, Store},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    let pg_store = PgStore::connect(&config.database_url, config.database_max_connections)
        .await
        .map_err(|e| {
            log::error!("Failed to connect to database: {}", e);
            std::io::Error::new(std::io::ErrorKind::Other, e)
        })?;
    pg_store.migrate().await.map_err(|e| {
        log::error!("Failed to apply migrations: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;

    let store: Arc<dyn Store> = Arc::new(pg_store);
    let tokens = Arc::new(TokenService::with_ttl(
        config.jwt_secret.as_bytes(),
        Duration::hours(config.token_ttl_hours),
    ));
    let accounts = AccountService::new(
        store.clone(),
        PasswordHasher::new(config.bcrypt_cost),
        tokens.clone(),
    );
    let tasks = TaskService::new(store);

    log::info!("Starting taskmaster server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(accounts.clone()))
            .app_data(web::Data::new(tasks.clone()))
            .app_data(web::Data::from(tokens.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
