//! Error types for Lattice Dropdown.

use std::path::PathBuf;

/// Result type alias for dropdown operations.
pub type Result<T> = std::result::Result<T, DropdownError>;

/// Errors reported while building or configuring a dropdown.
///
/// User interaction never produces an error: every gesture is handled
/// synchronously and the state machine has no failure transitions.
#[derive(Debug, thiserror::Error)]
pub enum DropdownError {
    /// A menu item has an empty label.
    #[error("menu item {index} has an empty label")]
    EmptyLabel { index: usize },

    /// Two menu items share a value.
    #[error("duplicate menu item value '{value}'")]
    DuplicateValue { value: String },

    /// A direction name was not one of up, down, left, right.
    #[error("unknown direction '{0}' (expected up, down, left or right)")]
    UnknownDirection(String),

    /// Configuration could not be parsed.
    #[error("invalid dropdown configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration could not be written as TOML.
    #[error("failed to serialize dropdown configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Configuration file could not be read.
    #[error("failed to read dropdown configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DropdownError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
