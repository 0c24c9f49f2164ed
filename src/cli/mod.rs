//! Hierarchical CLI for todostash.
//!
//! This module provides the command-line interface: todo mutations at the
//! top level, with two-level commands for categories, tags, and the theme
//! preference.

mod category;
mod run;
mod tag;


pub use category::CategoryCommand;
pub use run::{run, run_with_dir, CliOutput};
pub use tag::TagCommand;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Todostash CLI - todo tracking, categories, and backups.
///
/// For detailed help on any command group, use:
///   todostash <command> --help
#[derive(Parser, Debug)]
#[command(name = "todostash")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Add a new todo.
    ///
    /// The todo goes to the front of the list. Text is trimmed; blank text
    /// is rejected.
    Add {
        /// Todo text
        text: String,

        /// Due date: YYYY-MM-DD or RFC 3339
        #[arg(long)]
        due: Option<String>,

        /// Priority: low, medium, high (default: medium)
        #[arg(short, long)]
        priority: Option<String>,
    },

    /// List todos, optionally filtered and searched.
    ///
    /// Search matches todo text case-insensitively and is applied before
    /// the status filter. Order is preserved.
    List {
        /// Status filter: all, active, completed
        #[arg(short, long, default_value = "all")]
        filter: String,

        /// Search query
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Toggle a todo between active and completed.
    Toggle {
        /// Todo ID
        id: String,
    },

    /// Delete a todo.
    Delete {
        /// Todo ID
        id: String,
    },

    /// Update a todo's text, and optionally its due date or priority.
    ///
    /// Only supplied optional fields change; the text is always replaced.
    Update {
        /// Todo ID
        id: String,

        /// New text
        text: String,

        /// New due date: YYYY-MM-DD or RFC 3339
        #[arg(long)]
        due: Option<String>,

        /// New priority: low, medium, high
        #[arg(short, long)]
        priority: Option<String>,
    },

    /// Delete all completed todos.
    #[command(name = "clear-completed")]
    ClearCompleted,

    /// Toggle every todo at once.
    ///
    /// If any todo is active, all become completed; otherwise all become
    /// active.
    #[command(name = "toggle-all")]
    ToggleAll,

    /// Show todo counts: all, active, completed, overdue.
    Counts,

    /// Show productivity analytics as JSON.
    Stats,

    /// Show the calendar month grid with todos bucketed by due date.
    Calendar {
        /// Year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,

        /// Month 1-12 (defaults to the current month)
        #[arg(long)]
        month: Option<u32>,
    },

    /// Export todos to a backup file.
    Export {
        /// Output format: json or csv
        #[arg(long, default_value = "json")]
        format: String,

        /// Directory to write the export into; prints to stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Import todos and categories from a JSON backup, replacing current
    /// data wholesale.
    Import {
        /// Path to the backup file
        file: PathBuf,
    },

    /// Category management - create, list, update, and delete categories.
    #[command(subcommand)]
    Category(CategoryCommand),

    /// Tag management - create, list, and delete tags.
    #[command(subcommand)]
    Tag(TagCommand),

    /// Show the current theme preference.
    Theme,

    /// Set the theme preference: light, dark, or system.
    #[command(name = "set-theme")]
    SetTheme {
        /// Theme token
        value: String,
    },

    /// Show version information.
    Version,
}
