//! Category CLI subcommands.

use clap::Subcommand;

/// Category management commands.
///
/// Categories group todos. Each has a display name (20 characters max),
/// a color token, and an icon token. A fresh store is seeded with six
/// default categories.
///
/// Deleting a category does not touch todos that reference it.
#[derive(Subcommand, Debug, Clone)]
pub enum CategoryCommand {
    /// Create a new category.
    Add {
        /// Display name (max 20 characters)
        name: String,

        /// Color token: blue, purple, green, yellow, indigo, emerald,
        /// red, orange, pink, teal
        #[arg(short, long, default_value = "blue")]
        color: String,

        /// Icon token: person, briefcase, heart, cart, book, coins,
        /// star, flag
        #[arg(short, long, default_value = "star")]
        icon: String,
    },

    /// List all categories.
    List,

    /// Update a category's fields.
    ///
    /// Only specified fields are updated; others remain unchanged.
    Update {
        /// Category ID
        id: String,

        /// New display name (max 20 characters)
        #[arg(short, long)]
        name: Option<String>,

        /// New color token
        #[arg(short, long)]
        color: Option<String>,

        /// New icon token
        #[arg(short, long)]
        icon: Option<String>,
    },

    /// Delete a category.
    ///
    /// Todos referencing the category keep their reference.
    Delete {
        /// Category ID
        id: String,
    },
}
