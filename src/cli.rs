//! Command-line interface.

use crate::task::Filter;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "tarefex", version, about = "A small to-do list for the terminal")]
pub struct Cli {
    /// SQLite database file holding the task table.
    #[arg(long, default_value = "todo.db")]
    pub db: PathBuf,

    /// Log destination: "stdout" (or "1"), "stderr" (or "2"), or a file path.
    #[arg(long, default_value = "tarefex.log")]
    pub log: String,

    /// Minimum log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    pub log_level: Level,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print tasks as JSON instead of opening the list.
    Export(ExportArgs),
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Which tasks to include.
    #[arg(long, value_enum, default_value_t = Filter::All)]
    pub filter: Filter,
}
