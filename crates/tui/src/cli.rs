use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::Filter;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "tido",
    version,
    about = "A keyboard-first terminal todo list.",
    after_help = "Examples:\n  tido                Launch the TUI (same as `tido tui`)\n  tido add Buy milk\n  tido list --filter active\n  tido done 1717171717171\n  tido clear-completed"
)]
pub struct Cli {
    /// Override the data directory (defaults to platform-specific app dir)
    #[arg(long, value_name = "PATH", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable logging with the given tracing filter (e.g. "info", "debug")
    #[arg(long = "log", value_name = "DIRECTIVE", global = true)]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Launch the keyboard-first terminal UI (default command)
    Tui,
    /// Add a todo from the command line
    Add(AddArgs),
    /// List todos, optionally restricted to a filter
    List(ListArgs),
    /// Mark one or more todos as completed
    Done(DoneArgs),
    /// Delete one or more todos by id
    Delete(DeleteArgs),
    /// Delete every completed todo
    ClearCompleted,
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Todo title (joined with spaces; trimmed before it is stored)
    #[arg(value_name = "TEXT", required = true)]
    pub text: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Restrict the listing to active or completed todos
    #[arg(long, value_enum, default_value = "all")]
    pub filter: Filter,
}

#[derive(Args, Debug, Clone)]
pub struct DoneArgs {
    /// One or more todo ids (shown in the TUI and in `tido list`)
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<i64>,
}

#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    /// One or more todo ids to delete
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<i64>,
}
