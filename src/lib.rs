#![doc = "The `taskmaster` library crate."]
#![doc = ""]
#![doc = "Account registration, bearer-token authentication and owner-scoped task storage."]
#![doc = "Every `/tasks` operation runs on behalf of the owner resolved from the request's token."]
#![doc = "The binary (`main.rs`) wires configuration, the Postgres store and these modules together."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use crate::error::AppError;
