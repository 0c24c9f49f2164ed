//! Record types for the todo engine.
//!
//! Field names and date encodings here are the interchange contract: the
//! persisted blobs and the backup documents both serialize these types with
//! camelCase keys and ISO-8601 timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum todo text length, enforced at the presentation boundary.
pub const MAX_TODO_TEXT_LEN: usize = 500;

/// Maximum category name length, enforced at the presentation boundary.
pub const MAX_CATEGORY_NAME_LEN: usize = 20;

/// Todo priority levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low priority.
    Low,
    /// Medium priority (default).
    #[default]
    Medium,
    /// High priority.
    High,
}

impl Priority {
    /// Parse a priority from its token.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid priority token.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, InvalidPriority> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(InvalidPriority(s.to_string())),
        }
    }

    /// Get the token representation of the priority.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid priority token is provided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPriority(pub String);

impl std::fmt::Display for InvalidPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid priority: '{}' (must be one of: low, medium, high)", self.0)
    }
}

impl std::error::Error for InvalidPriority {}

/// Completion-status filter for list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Show every todo.
    #[default]
    All,
    /// Show only incomplete todos.
    Active,
    /// Show only completed todos.
    Completed,
}

impl Filter {
    /// Parse a filter from its token.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid filter token.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, InvalidFilter> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(InvalidFilter(s.to_string())),
        }
    }

    /// Get the token representation of the filter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid filter token is provided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidFilter(pub String);

impl std::fmt::Display for InvalidFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid filter: '{}' (must be one of: all, active, completed)", self.0)
    }
}

impl std::error::Error for InvalidFilter {}

/// A task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Opaque unique identifier, assigned at creation.
    pub id: String,
    /// User-visible text, trimmed of surrounding whitespace on every write.
    pub text: String,
    /// Whether the todo has been completed.
    pub completed: bool,
    /// When the todo was created. Never mutated.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutating operation applied to this record.
    pub updated_at: DateTime<Utc>,
    /// Optional deadline. Absent means "no deadline".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// Optional priority. Producers default this to medium.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Optional category reference. Not validated against the category
    /// collection; deleting a category leaves these dangling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    /// Forward-compatible tag names, carried through the codecs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Symbolic color token from the fixed palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Blue.
    Blue,
    /// Purple.
    Purple,
    /// Green.
    Green,
    /// Yellow.
    Yellow,
    /// Indigo.
    Indigo,
    /// Emerald.
    Emerald,
    /// Red.
    Red,
    /// Orange.
    Orange,
    /// Pink.
    Pink,
    /// Teal.
    Teal,
}

impl Color {
    /// Parse a color from its token.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a palette token.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, InvalidColor> {
        match s.to_lowercase().as_str() {
            "blue" => Ok(Self::Blue),
            "purple" => Ok(Self::Purple),
            "green" => Ok(Self::Green),
            "yellow" => Ok(Self::Yellow),
            "indigo" => Ok(Self::Indigo),
            "emerald" => Ok(Self::Emerald),
            "red" => Ok(Self::Red),
            "orange" => Ok(Self::Orange),
            "pink" => Ok(Self::Pink),
            "teal" => Ok(Self::Teal),
            _ => Err(InvalidColor(s.to_string())),
        }
    }

    /// Get the token representation of the color.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Indigo => "indigo",
            Self::Emerald => "emerald",
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Pink => "pink",
            Self::Teal => "teal",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid color token is provided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidColor(pub String);

impl std::fmt::Display for InvalidColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid color: '{}'", self.0)
    }
}

impl std::error::Error for InvalidColor {}

/// Symbolic icon token from the fixed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    /// A person silhouette.
    Person,
    /// A briefcase.
    Briefcase,
    /// A heart.
    Heart,
    /// A shopping cart.
    Cart,
    /// A book.
    Book,
    /// A stack of coins.
    Coins,
    /// A star.
    Star,
    /// A flag.
    Flag,
}

impl Icon {
    /// Parse an icon from its token.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not an icon token.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, InvalidIcon> {
        match s.to_lowercase().as_str() {
            "person" => Ok(Self::Person),
            "briefcase" => Ok(Self::Briefcase),
            "heart" => Ok(Self::Heart),
            "cart" => Ok(Self::Cart),
            "book" => Ok(Self::Book),
            "coins" => Ok(Self::Coins),
            "star" => Ok(Self::Star),
            "flag" => Ok(Self::Flag),
            _ => Err(InvalidIcon(s.to_string())),
        }
    }

    /// Get the token representation of the icon.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Briefcase => "briefcase",
            Self::Heart => "heart",
            Self::Cart => "cart",
            Self::Book => "book",
            Self::Coins => "coins",
            Self::Star => "star",
            Self::Flag => "flag",
        }
    }
}

impl std::fmt::Display for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid icon token is provided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidIcon(pub String);

impl std::fmt::Display for InvalidIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid icon: '{}'", self.0)
    }
}

impl std::error::Error for InvalidIcon {}

/// A user-defined label for grouping todos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Opaque unique identifier, assigned at creation.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Palette color token.
    pub color: Color,
    /// Icon token.
    pub icon: Icon,
    /// When the category was created.
    pub created_at: DateTime<Utc>,
}

/// A freeform tag, carried for forward compatibility with the codecs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Opaque unique identifier, assigned at creation.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Palette color token.
    pub color: Color,
}

/// UI theme preference, persisted alongside the collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Always light.
    Light,
    /// Always dark.
    Dark,
    /// Follow the host environment (default).
    #[default]
    System,
}

impl Theme {
    /// Parse a theme from its token.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid theme token.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, InvalidTheme> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            _ => Err(InvalidTheme(s.to_string())),
        }
    }

    /// Get the token representation of the theme.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid theme token is provided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTheme(pub String);

impl std::fmt::Display for InvalidTheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid theme: '{}' (must be one of: light, dark, system)", self.0)
    }
}

impl std::error::Error for InvalidTheme {}

/// The fixed set a fresh store is seeded with when no category blob exists.
pub const DEFAULT_CATEGORY_SET: [(&str, Color, Icon); 6] = [
    ("Personal", Color::Blue, Icon::Person),
    ("Work", Color::Purple, Icon::Briefcase),
    ("Health", Color::Green, Icon::Heart),
    ("Shopping", Color::Yellow, Icon::Cart),
    ("Learning", Color::Indigo, Icon::Book),
    ("Finance", Color::Emerald, Icon::Coins),
];
