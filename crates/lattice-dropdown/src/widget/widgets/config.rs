//! Construction-time dropdown configuration.
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration:
//!
//! ```toml
//! direction = "up"
//! indicator = "▲"
//! item_height = 32.0
//! gap = 8.0
//! ```

use std::path::Path;

use lattice_dropdown_core::logging::targets;
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use crate::error::{DropdownError, Result};

/// Default indicator glyph (a down-pointing triangle).
pub const DEFAULT_INDICATOR: char = '\u{25BC}';

/// Default height of one menu item, in pixels.
pub const DEFAULT_ITEM_HEIGHT: f32 = 36.0;

/// Default gap between trigger and menu, in pixels.
pub const DEFAULT_GAP: f32 = 8.0;

/// Dropdown configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DropdownConfig {
    /// Side of the trigger the menu opens towards.
    pub direction: Direction,
    /// Glyph appended after the trigger's content.
    pub indicator: char,
    /// Height of one menu item.
    pub item_height: f32,
    /// Gap between trigger and menu.
    pub gap: f32,
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            direction: Direction::default(),
            indicator: DEFAULT_INDICATOR,
            item_height: DEFAULT_ITEM_HEIGHT,
            gap: DEFAULT_GAP,
        }
    }
}

impl DropdownConfig {
    /// Set the direction using builder pattern.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set the indicator glyph using builder pattern.
    pub fn with_indicator(mut self, indicator: char) -> Self {
        self.indicator = indicator;
        self
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        tracing::debug!(target: targets::CONFIG, ?config, "configuration parsed");
        Ok(config)
    }

    /// Read a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| DropdownError::io(path, err))?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loading configuration");
        Self::from_toml_str(&text)
    }

    /// Serialize to TOML text.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Write the configuration to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = self.to_toml_string()?;
        std::fs::write(path, text).map_err(|err| DropdownError::io(path, err))?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "configuration saved");
        Ok(())
    }
}
