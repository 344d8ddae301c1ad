use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Task payload accepted by `POST /tasks`.
///
/// Fields the server assigns itself (`id`, `created_at`, `owner_id`) are not part
/// of it; a client that sends them anyway has them ignored. `status` and
/// `priority` are free-form labels chosen by the client.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// At most 200 characters.
    #[validate(length(max = 200))]
    pub title: String,

    /// At most 1000 characters.
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,

    #[serde(default)]
    #[validate(length(max = 50))]
    pub status: String,

    #[serde(default)]
    #[validate(length(max = 50))]
    pub priority: String,

    pub due_date: DateTime<Utc>,
}

/// A task ready to be written to the store, creation time stamped server-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl NewTask {
    pub fn new(input: TaskInput, created_at: DateTime<Utc>) -> Self {
        Self {
            title: input.title,
            description: input.description,
            status: input.status,
            priority: input.priority,
            due_date: input.due_date,
            created_at,
        }
    }
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Store-assigned identifier.
    pub id: i32,
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    /// Identifier of the account that owns the task.
    #[sqlx(rename = "user_id")]
    pub owner_id: i32,
}

impl Task {
    pub fn from_new(id: i32, task: NewTask, owner_id: i32) -> Self {
        Self {
            id,
            title: task.title,
            description: task.description,
            status: task.status,
            priority: task.priority,
            due_date: task.due_date,
            created_at: task.created_at,
            owner_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn input(title: &str) -> TaskInput {
        TaskInput {
            title: title.to_string(),
            description: "Test Description".to_string(),
            status: "todo".to_string(),
            priority: "high".to_string(),
            due_date: Utc::now() + Duration::days(1),
        }
    }

    #[test]
    fn test_task_creation() {
        let created_at = Utc::now();
        let task = Task::from_new(5, NewTask::new(input("Test Task"), created_at), 1);
        assert_eq!(task.id, 5);
        assert_eq!(task.title, "Test Task");
        assert_eq!(task.owner_id, 1);
        assert_eq!(task.created_at, created_at);
    }

    #[test]
    fn test_task_validation() {
        assert!(input("Valid Task").validate().is_ok());
        assert!(input("").validate().is_ok());
        assert!(input(&"a".repeat(200)).validate().is_ok());
        assert!(input(&"a".repeat(201)).validate().is_err());

        let mut long_description = input("Valid title");
        long_description.description = "b".repeat(1001);
        assert!(long_description.validate().is_err());

        let mut long_status = input("Valid title");
        long_status.status = "s".repeat(51);
        assert!(long_status.validate().is_err());

        let mut long_priority = input("Valid title");
        long_priority.priority = "p".repeat(51);
        assert!(long_priority.validate().is_err());
    }

    #[test]
    fn test_task_input_defaults_and_ignored_fields() {
        let parsed: TaskInput = serde_json::from_value(serde_json::json!({
            "title": "Write report",
            "due_date": "2030-01-01T00:00:00Z",
            "created_at": "1999-01-01T00:00:00Z",
            "owner_id": 99
        }))
        .unwrap();

        assert_eq!(parsed.status, "");
        assert_eq!(parsed.priority, "");
        assert_eq!(parsed.description, "");
    }

    #[test]
    fn test_status_and_priority_are_free_form() {
        let parsed: TaskInput = serde_json::from_value(serde_json::json!({
            "title": "Triage inbox",
            "status": "blocked",
            "priority": "p1",
            "due_date": "2030-01-01T00:00:00Z"
        }))
        .unwrap();

        assert!(parsed.validate().is_ok());
        let task = NewTask::new(parsed, Utc::now());
        assert_eq!(task.status, "blocked");
        assert_eq!(task.priority, "p1");
    }
}
