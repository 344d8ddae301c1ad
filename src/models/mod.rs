pub mod account;
pub mod task;

pub use account::Account;
pub use task::{NewTask, Task, TaskInput};
