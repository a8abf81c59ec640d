//! Data models for Taskmark.
//!
//! This module contains the domain models:
//! - Task (a record from the task source)
//! - TaskStatus / Priority (its closed enums)

pub mod task;

pub use task::{task_number, Priority, Task, TaskStatus};
