//! Taskmark CLI entry point.

use clap::Parser;
use std::process::ExitCode;
use taskmark::cli::commands;
use taskmark::cli::{Cli, Commands};
use taskmark::error::Error;

/// Rewrite named flags to positional args for agent ergonomics.
///
/// Agents naturally generate `--task-id "task-3"` instead of positional
/// `"task-3"`. This preprocessor transparently converts known flag
/// patterns so both forms work.
fn preprocess_args(args: impl Iterator<Item = String>) -> Vec<String> {
    // Only applies to flags that shadow positional args — named
    // flags like --source already work via clap.
    const POSITIONAL_ALIASES: &[&str] = &[
        "--task-id", // context
        "--text",    // sanitize
        "--file",    // agent-check, report, fix
    ];

    let mut result = Vec::new();
    let mut iter = args.peekable();

    while let Some(arg) = iter.next() {
        if POSITIONAL_ALIASES.contains(&arg.as_str()) {
            // Strip the flag, keep the value
            if let Some(value) = iter.next() {
                result.push(value);
            }
        } else if let Some(flag) = POSITIONAL_ALIASES
            .iter()
            .find(|f| arg.starts_with(&format!("{f}=")))
        {
            // Handle --flag=value form
            let value = arg[flag.len() + 1..].to_string();
            result.push(value);
        } else {
            result.push(arg);
        }
    }

    result
}

fn main() -> ExitCode {
    let args = preprocess_args(std::env::args());
    let cli = Cli::parse_from(args);

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Set up tracing based on verbosity
    init_tracing(cli.verbose, cli.quiet);

    let json = cli.json;

    // Run the command and handle errors
    match run(&cli, json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if json {
                eprintln!("{}", e.to_structured_json());
            } else if !cli.quiet {
                if let Some(hint) = e.hint() {
                    eprintln!("Error: {e}\n  Hint: {hint}");
                } else {
                    eprintln!("Error: {e}");
                }
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    // Honor RUST_LOG if set, otherwise use verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli, json: bool) -> Result<(), Error> {
    match &cli.command {
        Commands::Sync => {
            commands::sync::execute(cli.source.as_ref(), cli.checklist.as_ref(), json)
        }
        Commands::Sanitize { text } => commands::sanitize::execute(text.as_deref(), json),
        Commands::Next => commands::next::execute(cli.checklist.as_ref(), json),
        Commands::Context { task_id } => {
            commands::context::execute(task_id, cli.source.as_ref())
        }
        Commands::AgentCheck { file } => commands::agent_check::execute(file),
        Commands::Report { file, format } => commands::report::execute(file, *format, json),
        Commands::Fix { file } => commands::fix::execute(file, json),
        Commands::Version => commands::version::execute(json),
        Commands::Completions { shell } => commands::completions::execute(shell),
    }
}
