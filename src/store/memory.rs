use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{Store, StoreError};
use crate::models::{Account, NewTask, Task};

/// In-process `Store`, used by the test suites and for local experiments.
///
/// Holds the same constraints the Postgres schema enforces: unique emails and
/// tasks that reference an existing account. Ids start at 1.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    accounts: Vec<Account>,
    by_email: HashMap<String, usize>,
    tasks: Vec<Task>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn account_count(&self) -> usize {
        self.inner.read().await.accounts.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_account(&self, email: &str, password_hash: &str) -> Result<i32, StoreError> {
        let mut tables = self.inner.write().await;
        if tables.by_email.contains_key(email) {
            return Err(StoreError::DuplicateEmail);
        }

        let index = tables.accounts.len();
        let id = index as i32 + 1;
        tables.accounts.push(Account {
            id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        });
        tables.by_email.insert(email.to_string(), index);
        Ok(id)
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Account, StoreError> {
        let tables = self.inner.read().await;
        tables
            .by_email
            .get(email)
            .map(|&index| tables.accounts[index].clone())
            .ok_or(StoreError::NotFound)
    }

    async fn list_tasks(&self, owner_id: i32) -> Result<Vec<Task>, StoreError> {
        let tables = self.inner.read().await;
        let mut tasks: Vec<Task> = tables
            .tasks
            .iter()
            .filter(|task| task.owner_id == owner_id)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(tasks)
    }

    async fn create_task(&self, task: &NewTask, owner_id: i32) -> Result<(), StoreError> {
        let mut tables = self.inner.write().await;
        if !tables.accounts.iter().any(|account| account.id == owner_id) {
            return Err(StoreError::Storage(format!(
                "owner {} does not reference an existing account",
                owner_id
            )));
        }

        let id = tables.tasks.len() as i32 + 1;
        tables.tasks.push(Task::from_new(id, task.clone(), owner_id));
        Ok(())
    }
}
