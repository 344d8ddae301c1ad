use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::{
    auth::AuthenticatedUserId, error::AppError, models::TaskInput, services::TaskService,
};

/// Lists the tasks of the authenticated owner.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Task` objects, empty if the owner has none.
/// - `401 Unauthorized`: Missing, malformed, invalid or expired token.
/// - `500 Internal Server Error`: Storage failure.
pub async fn list_tasks(
    tasks: web::Data<TaskService>,
    user: AuthenticatedUserId,
) -> Result<HttpResponse, AppError> {
    let tasks = tasks.list(user.0).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a task owned by the authenticated owner.
///
/// `created_at` and the owner are assigned by the server; any values the client
/// sends for them are ignored.
///
/// ## Responses:
/// - `200 OK`: `{"message": "Task has been created successfully"}`.
/// - `400 Bad Request`: Body is not a valid task, or fails validation.
/// - `401 Unauthorized`: Missing, malformed, invalid or expired token.
/// - `500 Internal Server Error`: Storage failure.
pub async fn create_task(
    tasks: web::Data<TaskService>,
    user: AuthenticatedUserId,
    input: web::Json<TaskInput>,
) -> Result<HttpResponse, AppError> {
    tasks.create(user.0, input.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Task has been created successfully"
    })))
}

pub async fn method_not_allowed() -> Result<HttpResponse, AppError> {
    Err(AppError::MethodNotAllowed)
}
