//! Taskmark CLI - Markdown checklist sync for task-driven workflows
//!
//! This crate provides the core functionality for the `taskmark` CLI tool.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`model`] - Data types (Task, TaskStatus, Priority)
//! - [`config`] - Path resolution for the task source and checklist
//! - [`sync`] - One-way task import from `tasks.yml` into `todo.md`
//! - [`sanitize`] - Injection-safe cleanup of task text and tags
//! - [`validate`] - Input validation and path containment checks
//! - [`picker`] - Next-task selection from the checklist
//! - [`context`] - Task context bundles with document extraction
//! - [`agent`] - Agent definition parsing and restriction derivation
//! - [`report`] - Validation report loading and rendering
//! - [`fix`] - Auto-fixers for common task file mistakes
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod agent;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod fix;
pub mod model;
pub mod picker;
pub mod report;
pub mod sanitize;
pub mod sync;
pub mod validate;

pub use error::{Error, Result};
