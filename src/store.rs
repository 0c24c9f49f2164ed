//! Record store and mutation API.
//!
//! [`TodoStore`] is the exclusive owner of the canonical in-memory
//! collections. Readers get snapshots; every change routes through the
//! mutation methods, each of which persists the affected collection
//! write-through and records its outcome in the recoverable error slot.

use crate::error::{Error, Result};
use crate::id::generate_id;
use crate::models::{Category, Color, Icon, Priority, Tag, Theme, Todo, DEFAULT_CATEGORY_SET};
use crate::storage::{keys, KeyValueStore};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

/// How an imported collection is applied to the store.
///
/// Import is an explicit wholesale replace; a merge strategy would be a new
/// variant, which is why the enum is non-exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ImportMode {
    /// Discard the entire prior collection and install the imported one.
    Replace,
}

/// Fields that can be updated on a category.
#[derive(Debug, Default, Clone)]
pub struct CategoryUpdate {
    /// New name (if Some).
    pub name: Option<String>,
    /// New color (if Some).
    pub color: Option<Color>,
    /// New icon (if Some).
    pub icon: Option<Icon>,
}

impl CategoryUpdate {
    /// Check if any fields are set for update.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.color.is_none() && self.icon.is_none()
    }
}

/// The canonical todo/category/tag collections plus their persistence mirror.
#[derive(Debug)]
pub struct TodoStore<S: KeyValueStore> {
    backend: S,
    todos: Vec<Todo>,
    categories: Vec<Category>,
    tags: Vec<Tag>,
    theme: Theme,
    last_error: Option<String>,
}

/// Parse a collection blob, treating absent, unreadable, and corrupt blobs
/// all as "no data".
fn read_json<T: DeserializeOwned, S: KeyValueStore>(backend: &S, key: &str) -> Option<T> {
    let blob = backend.get(key).ok().flatten()?;
    serde_json::from_str(&blob).ok()
}

/// Build the fixed default category set with fresh ids and timestamps.
fn seed_default_categories() -> Vec<Category> {
    let now = Utc::now();
    DEFAULT_CATEGORY_SET
        .iter()
        .map(|&(name, color, icon)| Category {
            id: generate_id(),
            name: name.to_string(),
            color,
            icon,
            created_at: now,
        })
        .collect()
}

impl<S: KeyValueStore> TodoStore<S> {
    /// Load the store from its persistence backend.
    ///
    /// Never fails: an absent, unreadable, or corrupt todo blob yields an
    /// empty collection, and an absent or corrupt category blob seeds the
    /// default category set, which is persisted immediately.
    pub fn load(backend: S) -> Self {
        let todos = read_json(&backend, keys::TODOS).unwrap_or_default();
        let categories: Option<Vec<Category>> = read_json(&backend, keys::CATEGORIES);
        let tags = read_json(&backend, keys::TAGS).unwrap_or_default();
        let theme = backend
            .get(keys::THEME)
            .ok()
            .flatten()
            .and_then(|s| Theme::from_str(s.trim()).ok())
            .unwrap_or_default();

        let mut store =
            Self { backend, todos, categories: Vec::new(), tags, theme, last_error: None };

        match categories {
            Some(cats) => store.categories = cats,
            None => {
                store.categories = seed_default_categories();
                if let Err(e) = store.persist_categories() {
                    store.last_error = Some(e.to_string());
                }
            }
        }

        store
    }

    /// Current todo snapshot, newest-created first.
    #[must_use]
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// Current category snapshot, insertion order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Current tag snapshot, insertion order.
    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Current theme preference.
    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// The recoverable error slot: the most recent mutating call's failure
    /// message, or `None` if it succeeded.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Create a new todo at the front of the collection.
    ///
    /// The priority defaults to medium when not supplied. Returns the new
    /// record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyText`] (without mutating) when the trimmed text
    /// is empty, or a storage error if the write-through fails (the in-memory
    /// insert is kept).
    pub fn add_todo(
        &mut self,
        text: &str,
        due_date: Option<DateTime<Utc>>,
        priority: Option<Priority>,
    ) -> Result<Todo> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return self.record_err(Error::EmptyText);
        }

        let now = Utc::now();
        let todo = Todo {
            id: generate_id(),
            text: trimmed.to_string(),
            completed: false,
            created_at: now,
            updated_at: now,
            due_date,
            priority: Some(priority.unwrap_or_default()),
            category_id: None,
            tags: Vec::new(),
        };
        self.todos.insert(0, todo.clone());

        let persisted = self.persist_todos();
        self.commit(persisted, todo)
    }

    /// Flip `completed` on the todo matching `id` and refresh its
    /// `updated_at`. Returns whether a matching record was found.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write-through fails.
    pub fn toggle_todo(&mut self, id: &str) -> Result<bool> {
        let found = if let Some(todo) = self.todos.iter_mut().find(|t| t.id == id) {
            todo.completed = !todo.completed;
            todo.updated_at = Utc::now();
            true
        } else {
            false
        };

        let persisted = self.persist_todos();
        self.commit(persisted, found)
    }

    /// Remove the todo matching `id`. Returns whether a record was removed;
    /// deleting an absent id is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write-through fails.
    pub fn delete_todo(&mut self, id: &str) -> Result<bool> {
        let before = self.todos.len();
        self.todos.retain(|t| t.id != id);
        let removed = self.todos.len() < before;

        let persisted = self.persist_todos();
        self.commit(persisted, removed)
    }

    /// Replace the text (trimmed) of the todo matching `id`, and the due
    /// date/priority only where the caller supplied a value. Always
    /// refreshes `updated_at`. Returns whether a matching record was found.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyText`] (without mutating) when the trimmed text
    /// is empty, or a storage error if the write-through fails.
    pub fn update_todo(
        &mut self,
        id: &str,
        text: &str,
        due_date: Option<DateTime<Utc>>,
        priority: Option<Priority>,
    ) -> Result<bool> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return self.record_err(Error::EmptyText);
        }

        let found = if let Some(todo) = self.todos.iter_mut().find(|t| t.id == id) {
            todo.text = trimmed.to_string();
            if let Some(due) = due_date {
                todo.due_date = Some(due);
            }
            if let Some(p) = priority {
                todo.priority = Some(p);
            }
            todo.updated_at = Utc::now();
            true
        } else {
            false
        };

        let persisted = self.persist_todos();
        self.commit(persisted, found)
    }

    /// Remove every completed todo. Returns the number removed.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write-through fails.
    pub fn clear_completed(&mut self) -> Result<usize> {
        let before = self.todos.len();
        self.todos.retain(|t| !t.completed);
        let removed = before - self.todos.len();

        let persisted = self.persist_todos();
        self.commit(persisted, removed)
    }

    /// Bulk-toggle toward "complete": if any todo is incomplete, mark all
    /// complete; if every todo is already complete, mark all incomplete.
    /// Refreshes `updated_at` on every record.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write-through fails.
    pub fn toggle_all_todos(&mut self) -> Result<()> {
        let has_active = self.todos.iter().any(|t| !t.completed);
        let now = Utc::now();
        for todo in &mut self.todos {
            todo.completed = has_active;
            todo.updated_at = now;
        }

        let persisted = self.persist_todos();
        self.commit(persisted, ())
    }

    /// Install imported collections, replacing the current todos and
    /// categories wholesale. No merge, no deduplication.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write-through fails; the in-memory
    /// replacement has already happened by then.
    pub fn apply_import(
        &mut self,
        todos: Vec<Todo>,
        categories: Vec<Category>,
        mode: ImportMode,
    ) -> Result<()> {
        match mode {
            ImportMode::Replace => {
                self.todos = todos;
                self.categories = categories;
            }
        }

        let persisted = self.persist_todos().and_then(|()| self.persist_categories());
        self.commit(persisted, ())
    }

    /// Create a new category at the end of the collection.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write-through fails.
    pub fn add_category(&mut self, name: &str, color: Color, icon: Icon) -> Result<Category> {
        let category = Category {
            id: generate_id(),
            name: name.to_string(),
            color,
            icon,
            created_at: Utc::now(),
        };
        self.categories.push(category.clone());

        let persisted = self.persist_categories();
        self.commit(persisted, category)
    }

    /// Apply the supplied fields to the category matching `id`. Returns
    /// whether a matching record was found.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write-through fails.
    pub fn update_category(&mut self, id: &str, update: CategoryUpdate) -> Result<bool> {
        let found = if let Some(category) = self.categories.iter_mut().find(|c| c.id == id) {
            if let Some(name) = update.name {
                category.name = name;
            }
            if let Some(color) = update.color {
                category.color = color;
            }
            if let Some(icon) = update.icon {
                category.icon = icon;
            }
            true
        } else {
            false
        };

        let persisted = self.persist_categories();
        self.commit(persisted, found)
    }

    /// Remove the category matching `id`. Todos referencing it keep their
    /// dangling `category_id`; there is no cascade.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write-through fails.
    pub fn delete_category(&mut self, id: &str) -> Result<bool> {
        let before = self.categories.len();
        self.categories.retain(|c| c.id != id);
        let removed = self.categories.len() < before;

        let persisted = self.persist_categories();
        self.commit(persisted, removed)
    }

    /// Create a new tag at the end of the collection.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write-through fails.
    pub fn add_tag(&mut self, name: &str, color: Color) -> Result<Tag> {
        let tag = Tag { id: generate_id(), name: name.to_string(), color };
        self.tags.push(tag.clone());

        let persisted = self.persist_tags();
        self.commit(persisted, tag)
    }

    /// Remove the tag matching `id`. Returns whether a record was removed.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write-through fails.
    pub fn delete_tag(&mut self, id: &str) -> Result<bool> {
        let before = self.tags.len();
        self.tags.retain(|t| t.id != id);
        let removed = self.tags.len() < before;

        let persisted = self.persist_tags();
        self.commit(persisted, removed)
    }

    /// Set and persist the theme preference.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write-through fails.
    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.theme = theme;
        let persisted = self.backend.set(keys::THEME, theme.as_str());
        self.commit(persisted, ())
    }

    fn persist_todos(&self) -> Result<()> {
        let blob = serde_json::to_string(&self.todos)?;
        self.backend.set(keys::TODOS, &blob)
    }

    fn persist_categories(&self) -> Result<()> {
        let blob = serde_json::to_string(&self.categories)?;
        self.backend.set(keys::CATEGORIES, &blob)
    }

    fn persist_tags(&self) -> Result<()> {
        let blob = serde_json::to_string(&self.tags)?;
        self.backend.set(keys::TAGS, &blob)
    }

    /// Record a successful mutation in the error slot.
    fn record_ok<T>(&mut self, value: T) -> Result<T> {
        self.last_error = None;
        Ok(value)
    }

    /// Record a failed mutation in the error slot.
    fn record_err<T>(&mut self, err: Error) -> Result<T> {
        self.last_error = Some(err.to_string());
        Err(err)
    }

    /// Fold a persistence outcome into the error slot and the call's result.
    fn commit<T>(&mut self, persisted: Result<()>, value: T) -> Result<T> {
        match persisted {
            Ok(()) => self.record_ok(value),
            Err(e) => self.record_err(e),
        }
    }
}
