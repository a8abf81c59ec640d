//! CLI definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;

/// Output format for the report command.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Human-readable, color-coded text (default)
    #[default]
    Text,
    /// Normalized JSON
    Json,
}

/// Taskmark CLI - checklist sync for task-driven agents
#[derive(Parser, Debug)]
#[command(name = "taskmark", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Task source file (default: ./tasks.yml)
    #[arg(long, global = true, env = "TASKMARK_SOURCE")]
    pub source: Option<PathBuf>,

    /// Checklist document (default: ./todo.md)
    #[arg(long, global = true, env = "TASKMARK_CHECKLIST")]
    pub checklist: Option<PathBuf>,

    /// Output as JSON (for agent integration)
    #[arg(long, alias = "robot", global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import new tasks from the source file into the checklist
    Sync,

    /// Strip shell metacharacters from a task goal string
    Sanitize {
        /// Goal text to sanitize (usage is printed when omitted)
        text: Option<String>,
    },

    /// Show the next open task from the checklist
    Next,

    /// Load a task plus its referenced documentation as JSON
    Context {
        /// Task identifier (task-N)
        task_id: String,
    },

    /// Check an agent definition file and derive its restrictions
    AgentCheck {
        /// Agent markdown file with YAML frontmatter
        file: PathBuf,
    },

    /// Render a validation report
    Report {
        /// Validation report JSON file
        file: PathBuf,

        /// Output format (text, json)
        #[arg(long, value_enum, default_value_t)]
        format: ReportFormat,
    },

    /// Auto-fix common defects in a task source file
    Fix {
        /// File to fix in place
        file: PathBuf,
    },

    /// Print version information
    Version,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}
