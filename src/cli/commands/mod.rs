//! Command implementations.

pub mod agent_check;
pub mod completions;
pub mod context;
pub mod fix;
pub mod next;
pub mod report;
pub mod sanitize;
pub mod sync;
pub mod version;
