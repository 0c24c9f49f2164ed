//! Command execution for the CLI.
//!
//! This module handles running CLI commands and producing output.

use crate::analytics;
use crate::cli::{CategoryCommand, Command, TagCommand};
use crate::models::{
    Color, Filter, Icon, Priority, Theme, MAX_CATEGORY_NAME_LEN, MAX_TODO_TEXT_LEN,
};
use crate::paths;
use crate::storage::FileStore;
use crate::store::{CategoryUpdate, ImportMode, TodoStore};
use crate::transfer;
use crate::views;
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

/// Output from running the CLI, with separate stdout and stderr messages.
#[derive(Debug)]
pub struct CliOutput {
    /// Exit code for the process.
    pub exit_code: ExitCode,
    /// Messages to print to stdout.
    pub stdout: Vec<String>,
    /// Messages to print to stderr.
    pub stderr: Vec<String>,
}

/// Run a CLI command against the default storage directory.
pub fn run(command: Command) -> CliOutput {
    let Some(dir) = paths::storage_dir() else {
        return error_output("Could not determine the home directory".to_string());
    };
    run_with_dir(command, &dir)
}

/// Run a CLI command against an explicit storage directory.
pub fn run_with_dir(command: Command, dir: &Path) -> CliOutput {
    let mut store = TodoStore::load(FileStore::new(dir));

    match command {
        Command::Add { text, due, priority } => todo_add(&mut store, &text, due, priority),
        Command::List { filter, search } => todo_list(&store, &filter, &search),
        Command::Toggle { id } => todo_toggle(&mut store, &id),
        Command::Delete { id } => todo_delete(&mut store, &id),
        Command::Update { id, text, due, priority } => {
            todo_update(&mut store, &id, &text, due, priority)
        }
        Command::ClearCompleted => todo_clear_completed(&mut store),
        Command::ToggleAll => todo_toggle_all(&mut store),
        Command::Counts => todo_counts(&store),
        Command::Stats => todo_stats(&store),
        Command::Calendar { year, month } => todo_calendar(&store, year, month),
        Command::Export { format, out } => todo_export(&store, &format, out.as_deref()),
        Command::Import { file } => todo_import(&mut store, &file),
        Command::Category(cmd) => run_category_cmd(&mut store, cmd),
        Command::Tag(cmd) => run_tag_cmd(&mut store, cmd),
        Command::Theme => theme_get(&store),
        Command::SetTheme { value } => theme_set(&mut store, &value),
        Command::Version => run_version(),
    }
}

// === Utility Commands ===

fn run_version() -> CliOutput {
    CliOutput {
        exit_code: ExitCode::SUCCESS,
        stdout: vec![],
        stderr: vec![format!("todostash v{}", crate::VERSION)],
    }
}

// === Todo Commands ===

fn todo_add(
    store: &mut TodoStore<FileStore>,
    text: &str,
    due: Option<String>,
    priority: Option<String>,
) -> CliOutput {
    if text.len() > MAX_TODO_TEXT_LEN {
        return error_output(format!("Todo text exceeds {MAX_TODO_TEXT_LEN} characters"));
    }

    let due = match due.as_deref().map(parse_due_date).transpose() {
        Ok(d) => d,
        Err(e) => return error_output(e),
    };

    let priority = match priority.as_deref().map(Priority::from_str).transpose() {
        Ok(p) => p,
        Err(e) => return error_output(e.to_string()),
    };

    match store.add_todo(text, due, priority) {
        Ok(todo) => json_output(&todo),
        Err(e) => error_output(e.to_string()),
    }
}

fn todo_list(store: &TodoStore<FileStore>, filter: &str, search: &str) -> CliOutput {
    let filter = match Filter::from_str(filter) {
        Ok(f) => f,
        Err(e) => return error_output(e.to_string()),
    };

    let todos = views::filter_todos(store.todos(), filter, search);
    json_output(&todos)
}

fn todo_toggle(store: &mut TodoStore<FileStore>, id: &str) -> CliOutput {
    match store.toggle_todo(id) {
        Ok(true) => success_output(format!("Toggled todo: {id}")),
        Ok(false) => error_output(format!("Todo not found: {id}")),
        Err(e) => error_output(e.to_string()),
    }
}

fn todo_delete(store: &mut TodoStore<FileStore>, id: &str) -> CliOutput {
    match store.delete_todo(id) {
        Ok(true) => success_output(format!("Deleted todo: {id}")),
        Ok(false) => error_output(format!("Todo not found: {id}")),
        Err(e) => error_output(e.to_string()),
    }
}

fn todo_update(
    store: &mut TodoStore<FileStore>,
    id: &str,
    text: &str,
    due: Option<String>,
    priority: Option<String>,
) -> CliOutput {
    if text.len() > MAX_TODO_TEXT_LEN {
        return error_output(format!("Todo text exceeds {MAX_TODO_TEXT_LEN} characters"));
    }

    let due = match due.as_deref().map(parse_due_date).transpose() {
        Ok(d) => d,
        Err(e) => return error_output(e),
    };

    let priority = match priority.as_deref().map(Priority::from_str).transpose() {
        Ok(p) => p,
        Err(e) => return error_output(e.to_string()),
    };

    match store.update_todo(id, text, due, priority) {
        Ok(true) => success_output(format!("Updated todo: {id}")),
        Ok(false) => error_output(format!("Todo not found: {id}")),
        Err(e) => error_output(e.to_string()),
    }
}

fn todo_clear_completed(store: &mut TodoStore<FileStore>) -> CliOutput {
    match store.clear_completed() {
        Ok(removed) => success_output(format!("Removed {removed} completed todo(s)")),
        Err(e) => error_output(e.to_string()),
    }
}

fn todo_toggle_all(store: &mut TodoStore<FileStore>) -> CliOutput {
    match store.toggle_all_todos() {
        Ok(()) => success_output(format!("Toggled {} todo(s)", store.todos().len())),
        Err(e) => error_output(e.to_string()),
    }
}

fn todo_counts(store: &TodoStore<FileStore>) -> CliOutput {
    json_output(&views::count_todos(store.todos(), Utc::now()))
}

fn todo_stats(store: &TodoStore<FileStore>) -> CliOutput {
    json_output(&analytics::analyze(store.todos(), Utc::now()))
}

fn todo_calendar(
    store: &TodoStore<FileStore>,
    year: Option<i32>,
    month: Option<u32>,
) -> CliOutput {
    let today = Utc::now().date_naive();
    let year = year.unwrap_or_else(|| today.year());
    let month = month.unwrap_or_else(|| today.month());

    let days = views::calendar_month(store.todos(), year, month, today);
    if days.is_empty() {
        return error_output(format!("Invalid month: {year}-{month}"));
    }
    json_output(&days)
}

fn todo_export(store: &TodoStore<FileStore>, format: &str, out: Option<&Path>) -> CliOutput {
    let now = Utc::now();
    let file = match format {
        "json" => match transfer::export_to_json(store.todos(), store.categories(), now) {
            Ok(f) => f,
            Err(e) => return error_output(e.to_string()),
        },
        "csv" => transfer::export_to_csv(store.todos(), now),
        other => return error_output(format!("Unknown export format: {other}")),
    };

    match out {
        Some(dir) => match transfer::save_export(&file, dir) {
            Ok(path) => success_output(format!("Exported to {}", path.display())),
            Err(e) => error_output(e.to_string()),
        },
        None => CliOutput {
            exit_code: ExitCode::SUCCESS,
            stdout: vec![file.contents],
            stderr: vec![],
        },
    }
}

fn todo_import(store: &mut TodoStore<FileStore>, file: &Path) -> CliOutput {
    let content = match transfer::read_backup_file(file) {
        Ok(c) => c,
        Err(e) => return error_output(e.to_string()),
    };

    let document = match transfer::import_from_json(&content) {
        Ok(d) => d,
        Err(e) => return error_output(e.to_string()),
    };

    let todos = document.todos.len();
    let categories = document.categories.len();
    match store.apply_import(document.todos, document.categories, ImportMode::Replace) {
        Ok(()) => {
            success_output(format!("Imported {todos} todo(s) and {categories} category(ies)"))
        }
        Err(e) => error_output(e.to_string()),
    }
}

// === Category Commands ===

fn run_category_cmd(store: &mut TodoStore<FileStore>, cmd: CategoryCommand) -> CliOutput {
    match cmd {
        CategoryCommand::Add { name, color, icon } => category_add(store, &name, &color, &icon),
        CategoryCommand::List => json_output(&store.categories()),
        CategoryCommand::Update { id, name, color, icon } => {
            category_update(store, &id, name, color.as_deref(), icon.as_deref())
        }
        CategoryCommand::Delete { id } => category_delete(store, &id),
    }
}

fn check_category_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Category name cannot be empty".to_string());
    }
    if name.len() > MAX_CATEGORY_NAME_LEN {
        return Err(format!("Category name exceeds {MAX_CATEGORY_NAME_LEN} characters"));
    }
    Ok(())
}

fn category_add(
    store: &mut TodoStore<FileStore>,
    name: &str,
    color: &str,
    icon: &str,
) -> CliOutput {
    if let Err(e) = check_category_name(name) {
        return error_output(e);
    }

    let color = match Color::from_str(color) {
        Ok(c) => c,
        Err(e) => return error_output(e.to_string()),
    };

    let icon = match Icon::from_str(icon) {
        Ok(i) => i,
        Err(e) => return error_output(e.to_string()),
    };

    match store.add_category(name, color, icon) {
        Ok(category) => json_output(&category),
        Err(e) => error_output(e.to_string()),
    }
}

fn category_update(
    store: &mut TodoStore<FileStore>,
    id: &str,
    name: Option<String>,
    color: Option<&str>,
    icon: Option<&str>,
) -> CliOutput {
    if let Some(ref name) = name {
        if let Err(e) = check_category_name(name) {
            return error_output(e);
        }
    }

    let color = match color.map(Color::from_str).transpose() {
        Ok(c) => c,
        Err(e) => return error_output(e.to_string()),
    };

    let icon = match icon.map(Icon::from_str).transpose() {
        Ok(i) => i,
        Err(e) => return error_output(e.to_string()),
    };

    let update = CategoryUpdate { name, color, icon };
    if update.is_empty() {
        return error_output("Nothing to update".to_string());
    }

    match store.update_category(id, update) {
        Ok(true) => success_output(format!("Updated category: {id}")),
        Ok(false) => error_output(format!("Category not found: {id}")),
        Err(e) => error_output(e.to_string()),
    }
}

fn category_delete(store: &mut TodoStore<FileStore>, id: &str) -> CliOutput {
    match store.delete_category(id) {
        Ok(true) => success_output(format!("Deleted category: {id}")),
        Ok(false) => error_output(format!("Category not found: {id}")),
        Err(e) => error_output(e.to_string()),
    }
}

// === Tag Commands ===

fn run_tag_cmd(store: &mut TodoStore<FileStore>, cmd: TagCommand) -> CliOutput {
    match cmd {
        TagCommand::Add { name, color } => tag_add(store, &name, &color),
        TagCommand::List => json_output(&store.tags()),
        TagCommand::Delete { id } => tag_delete(store, &id),
    }
}

fn tag_add(store: &mut TodoStore<FileStore>, name: &str, color: &str) -> CliOutput {
    if name.trim().is_empty() {
        return error_output("Tag name cannot be empty".to_string());
    }

    let color = match Color::from_str(color) {
        Ok(c) => c,
        Err(e) => return error_output(e.to_string()),
    };

    match store.add_tag(name, color) {
        Ok(tag) => json_output(&tag),
        Err(e) => error_output(e.to_string()),
    }
}

fn tag_delete(store: &mut TodoStore<FileStore>, id: &str) -> CliOutput {
    match store.delete_tag(id) {
        Ok(true) => success_output(format!("Deleted tag: {id}")),
        Ok(false) => error_output(format!("Tag not found: {id}")),
        Err(e) => error_output(e.to_string()),
    }
}

// === Theme Commands ===

fn theme_get(store: &TodoStore<FileStore>) -> CliOutput {
    success_output(store.theme().as_str().to_string())
}

fn theme_set(store: &mut TodoStore<FileStore>, value: &str) -> CliOutput {
    let theme = match Theme::from_str(value) {
        Ok(t) => t,
        Err(e) => return error_output(e.to_string()),
    };

    match store.set_theme(theme) {
        Ok(()) => success_output(format!("Theme set to {theme}")),
        Err(e) => error_output(e.to_string()),
    }
}

// === Helpers ===

/// Parse a due date given as a calendar day or a full RFC 3339 timestamp.
/// Bare days resolve to midnight UTC.
fn parse_due_date(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| format!("Invalid date: {s} (expected YYYY-MM-DD or RFC 3339)"))
}

fn json_output<T: Serialize>(value: &T) -> CliOutput {
    match serde_json::to_string_pretty(value) {
        Ok(json) => CliOutput { exit_code: ExitCode::SUCCESS, stdout: vec![json], stderr: vec![] },
        Err(e) => error_output(e.to_string()),
    }
}

fn success_output(message: String) -> CliOutput {
    CliOutput { exit_code: ExitCode::SUCCESS, stdout: vec![message], stderr: vec![] }
}

fn error_output(message: String) -> CliOutput {
    CliOutput { exit_code: ExitCode::from(1), stdout: vec![], stderr: vec![message] }
}
