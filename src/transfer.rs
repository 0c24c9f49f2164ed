//! Backup codecs: JSON export/import and CSV export.
//!
//! The JSON document shape and the CSV layout are durable interchange
//! formats; field names and ISO-8601 date encoding are the compatibility
//! contract and must round-trip through the import path.

use crate::error::{Error, Result};
use crate::models::{Category, Todo};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Version literal stamped into every export document.
pub const EXPORT_VERSION: &str = "1.0.0";

/// The fixed CSV header row.
pub const CSV_HEADER: &str = "ID,Text,Completed,Priority,Category ID,Created At,Due Date,Tags";

/// The JSON backup document.
///
/// On import, `categories` defaults to empty and the metadata fields are
/// optional; `todos` must be present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    /// The exported todo collection.
    pub todos: Vec<Todo>,
    /// The exported category collection.
    #[serde(default)]
    pub categories: Vec<Category>,
    /// When the document was produced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
    /// Document format version.
    #[serde(default)]
    pub version: String,
}

/// An export rendered to text, with its suggested filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    /// Suggested filename, e.g. `todos-backup-2024-03-13.json`.
    pub filename: String,
    /// File contents.
    pub contents: String,
}

/// Render the snapshot as a pretty-printed JSON backup document.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn export_to_json(
    todos: &[Todo],
    categories: &[Category],
    now: DateTime<Utc>,
) -> Result<ExportFile> {
    let document = BackupDocument {
        todos: todos.to_vec(),
        categories: categories.to_vec(),
        exported_at: Some(now),
        version: EXPORT_VERSION.to_string(),
    };

    Ok(ExportFile {
        filename: format!("todos-backup-{}.json", now.format("%Y-%m-%d")),
        contents: serde_json::to_string_pretty(&document)?,
    })
}

/// Millisecond-precision ISO-8601, the encoding the CSV columns use.
fn iso_millis(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Quote a CSV field, doubling any internal quotes.
fn csv_quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

/// Render the todo collection as CSV.
///
/// One row per todo after the fixed header; absent optional fields render as
/// empty strings, tags are joined by `;`.
#[must_use]
pub fn export_to_csv(todos: &[Todo], now: DateTime<Utc>) -> ExportFile {
    let mut lines = vec![CSV_HEADER.to_string()];
    for todo in todos {
        lines.push(
            [
                todo.id.clone(),
                csv_quote(&todo.text),
                todo.completed.to_string(),
                todo.priority.map(|p| p.as_str().to_string()).unwrap_or_default(),
                todo.category_id.clone().unwrap_or_default(),
                iso_millis(todo.created_at),
                todo.due_date.map(iso_millis).unwrap_or_default(),
                todo.tags.join(";"),
            ]
            .join(","),
        );
    }

    ExportFile {
        filename: format!("todos-export-{}.csv", now.format("%Y-%m-%d")),
        contents: lines.join("\n"),
    }
}

/// Parse a JSON backup document.
///
/// Nothing is applied here; the caller decides what to do with the parsed
/// collections, so a failed parse leaves existing data untouched.
///
/// # Errors
///
/// Returns [`Error::InvalidBackup`] when the content is not valid JSON or
/// does not match the export shape.
pub fn import_from_json(content: &str) -> Result<BackupDocument> {
    serde_json::from_str(content).map_err(|e| Error::InvalidBackup(e.to_string()))
}

/// Write an export into `dir`, returning the full path written.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be
/// written.
pub fn save_export(file: &ExportFile, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(&file.filename);
    std::fs::write(&path, &file.contents)?;
    Ok(path)
}

/// Read a backup file's raw text content.
///
/// # Errors
///
/// Returns [`Error::BackupNotFound`] if the path does not exist, or an I/O
/// error if it cannot be read.
pub fn read_backup_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::BackupNotFound(path.to_path_buf()));
    }
    Ok(std::fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Color, Icon, Priority};
    use chrono::TimeZone;

    fn sample_todos() -> Vec<Todo> {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap();
        vec![
            Todo {
                id: "t1".to_string(),
                text: "Say \"hello\"".to_string(),
                completed: false,
                created_at: created,
                updated_at: created,
                due_date: Some(Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap()),
                priority: Some(Priority::High),
                category_id: Some("c1".to_string()),
                tags: vec!["a".to_string(), "b".to_string()],
            },
            Todo {
                id: "t2".to_string(),
                text: "Plain".to_string(),
                completed: true,
                created_at: created,
                updated_at: created,
                due_date: None,
                priority: None,
                category_id: None,
                tags: Vec::new(),
            },
        ]
    }

    fn sample_categories() -> Vec<Category> {
        vec![Category {
            id: "c1".to_string(),
            name: "Work".to_string(),
            color: Color::Purple,
            icon: Icon::Briefcase,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }]
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 13, 15, 0, 0).unwrap()
    }

    #[test]
    fn test_json_round_trip() {
        let todos = sample_todos();
        let categories = sample_categories();

        let export = export_to_json(&todos, &categories, now()).unwrap();
        let document = import_from_json(&export.contents).unwrap();

        assert_eq!(document.todos, todos);
        assert_eq!(document.categories, categories);
        assert_eq!(document.version, EXPORT_VERSION);
        assert_eq!(document.exported_at, Some(now()));
    }

    #[test]
    fn test_json_filename_carries_date() {
        let export = export_to_json(&[], &[], now()).unwrap();
        assert_eq!(export.filename, "todos-backup-2024-03-13.json");
    }

    #[test]
    fn test_json_export_field_names() {
        let export = export_to_json(&sample_todos(), &sample_categories(), now()).unwrap();
        assert!(export.contents.contains("\"todos\""));
        assert!(export.contents.contains("\"categories\""));
        assert!(export.contents.contains("\"exportedAt\""));
        assert!(export.contents.contains("\"version\": \"1.0.0\""));
        assert!(export.contents.contains("\"createdAt\""));
        assert!(export.contents.contains("\"dueDate\""));
    }

    #[test]
    fn test_import_missing_categories_defaults_empty() {
        let document = import_from_json(r#"{"todos": []}"#).unwrap();
        assert!(document.todos.is_empty());
        assert!(document.categories.is_empty());
    }

    #[test]
    fn test_import_malformed_json_rejected() {
        let err = import_from_json("not json at all").unwrap_err();
        assert!(matches!(err, Error::InvalidBackup(_)));
    }

    #[test]
    fn test_import_wrong_shape_rejected() {
        // Valid JSON, but no `todos` field.
        let err = import_from_json(r#"{"categories": []}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidBackup(_)));

        let err = import_from_json(r#"{"todos": [{"id": "x"}]}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidBackup(_)));
    }

    #[test]
    fn test_csv_layout() {
        let export = export_to_csv(&sample_todos(), now());
        let lines: Vec<&str> = export.contents.lines().collect();

        assert_eq!(export.filename, "todos-export-2024-03-13.csv");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(
            lines[1],
            "t1,\"Say \"\"hello\"\"\",false,high,c1,\
             2024-03-01T10:30:00.000Z,2024-03-05T00:00:00.000Z,a;b"
        );
        // Absent optionals render as empty fields.
        assert_eq!(lines[2], "t2,\"Plain\",true,,,2024-03-01T10:30:00.000Z,,");
    }

    #[test]
    fn test_csv_empty_collection_is_just_header() {
        let export = export_to_csv(&[], now());
        assert_eq!(export.contents, CSV_HEADER);
    }

    #[test]
    fn test_save_and_read_back() {
        let dir = tempfile::TempDir::new().unwrap();
        let export = export_to_json(&sample_todos(), &[], now()).unwrap();

        let path = save_export(&export, dir.path()).unwrap();
        assert!(path.ends_with("todos-backup-2024-03-13.json"));

        let content = read_backup_file(&path).unwrap();
        let document = import_from_json(&content).unwrap();
        assert_eq!(document.todos, sample_todos());
    }

    #[test]
    fn test_read_missing_backup_file() {
        let err = read_backup_file(Path::new("/nonexistent/backup.json")).unwrap_err();
        assert!(matches!(err, Error::BackupNotFound(_)));
    }
}
