use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::{Store, StoreError};
use crate::models::{Account, NewTask, Task};

/// `Store` backed by a Postgres connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Applies the schema under `migrations/`.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

/// Converts `sqlx::Error` into `StoreError`.
///
/// `RowNotFound` maps to `StoreError::NotFound`; everything else is an opaque
/// storage failure carrying the driver's message.
impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> StoreError {
        match error {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            _ => StoreError::Storage(error.to_string()),
        }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_account(&self, email: &str, password_hash: &str) -> Result<i32, StoreError> {
        let result = sqlx::query_as::<_, (i32,)>(
            "INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING id",
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok((id,)) => Ok(id),
            Err(sqlx::Error::Database(db_error)) if db_error.is_unique_violation() => {
                Err(StoreError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Account, StoreError> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, email, password_hash FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(account)
    }

    async fn list_tasks(&self, owner_id: i32) -> Result<Vec<Task>, StoreError> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, title, description, status, priority, due_date, created_at, user_id \
             FROM tasks WHERE user_id = $1 ORDER BY created_at, id",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tasks)
    }

    async fn create_task(&self, task: &NewTask, owner_id: i32) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO tasks (title, description, status, priority, due_date, created_at, user_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(&task.status)
        .bind(&task.priority)
        .bind(task.due_date)
        .bind(task.created_at)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
