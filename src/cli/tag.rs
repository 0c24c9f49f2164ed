//! Tag CLI subcommands.

use clap::Subcommand;

/// Tag management commands.
///
/// Tags are free-form labels with a color token. Todos carry tag names
/// directly, so deleting a tag record does not touch todos.
#[derive(Subcommand, Debug, Clone)]
pub enum TagCommand {
    /// Create a new tag.
    Add {
        /// Tag name
        name: String,

        /// Color token: blue, purple, green, yellow, indigo, emerald,
        /// red, orange, pink, teal
        #[arg(short, long, default_value = "blue")]
        color: String,
    },

    /// List all tags.
    List,

    /// Delete a tag.
    Delete {
        /// Tag ID
        id: String,
    },
}
