//! Persistence boundary for accounts and tasks.
//!
//! Services depend on the `Store` trait only. `PgStore` backs the running server;
//! `MemoryStore` honours the same contracts in-process.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use std::fmt;

use crate::models::{Account, NewTask, Task};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Failures reported by a `Store`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The email is already taken by another account.
    DuplicateEmail,
    /// No record matched the lookup.
    NotFound,
    /// Any other persistence failure.
    Storage(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StoreError::DuplicateEmail => write!(f, "email is already registered"),
            StoreError::NotFound => write!(f, "record not found"),
            StoreError::Storage(msg) => write!(f, "storage failure: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

#[async_trait]
pub trait Store: Send + Sync {
    /// Inserts an account and returns its assigned id.
    ///
    /// Email uniqueness is enforced here, atomically with the insert.
    async fn create_account(&self, email: &str, password_hash: &str) -> Result<i32, StoreError>;

    async fn find_account_by_email(&self, email: &str) -> Result<Account, StoreError>;

    /// All tasks owned by `owner_id`, oldest first.
    async fn list_tasks(&self, owner_id: i32) -> Result<Vec<Task>, StoreError>;

    /// Persists `task` for `owner_id`, which must reference an existing account.
    async fn create_task(&self, task: &NewTask, owner_id: i32) -> Result<(), StoreError>;
}
