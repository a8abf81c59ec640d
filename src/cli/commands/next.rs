//! Next command handler

use std::path::PathBuf;

use serde_json::json;

use crate::Result;
use crate::config;
use crate::picker;

pub fn execute(checklist: Option<&PathBuf>, json: bool) -> Result<()> {
    let checklist_path = config::resolve_checklist_path(checklist.map(PathBuf::as_path));
    let next = picker::find_next(&checklist_path)?;

    if json {
        println!("{}", json!({ "next": next }));
        return Ok(());
    }

    let Some(task) = next else {
        println!("All tasks completed");
        return Ok(());
    };

    if let Some(task_id) = &task.task_id {
        // Tracked tasks get machine-readable lines so callers can hand
        // the task off to a downstream workflow.
        println!("NEXT_TASK_ID:{task_id}");
        println!("PRIORITY:{}", task.priority);
        println!("EFFORT:{}", task.effort);
        println!("DESCRIPTION:{}", task.description);
    } else {
        println!("Next task (lightweight): {}", task.description);
        println!("Start working on this task");
    }

    Ok(())
}
