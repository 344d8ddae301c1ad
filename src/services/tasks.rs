use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

use crate::error::AppError;
use crate::models::{NewTask, Task, TaskInput};
use crate::store::Store;

const INVALID_TASK: &str = "Failed to create task: invalid payload";

/// Owner-scoped task listing and creation.
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn Store>,
}

impl TaskService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// All tasks belonging to `owner_id`; empty when there are none.
    pub async fn list(&self, owner_id: i32) -> Result<Vec<Task>, AppError> {
        Ok(self.store.list_tasks(owner_id).await?)
    }

    /// Persists `input` for `owner_id` with `created_at` set to now.
    pub async fn create(&self, owner_id: i32, input: TaskInput) -> Result<(), AppError> {
        input.validate().map_err(|e| {
            log::info!("Rejected task for user_id={}: {}", owner_id, e);
            AppError::ValidationError(INVALID_TASK.into())
        })?;

        let task = NewTask::new(input, Utc::now());
        self.store.create_task(&task, owner_id).await?;
        log::info!("Task has been created for user_id={}", owner_id);
        Ok(())
    }
}
