//! Engine configuration
//!
//! A small TOML-backed record; every field has a shipped default, so an
//! empty file (or no file at all) yields the stock behavior.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;

fn default_folder_title() -> String {
    "Favorites".to_string()
}

fn default_prefer_high_res() -> bool {
    true
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Title given to the managed bookmark folder when the engine has
    /// to create it.
    #[serde(default = "default_folder_title")]
    pub folder_title: String,

    /// Ask the host for the largest indexed favicon of a page.
    #[serde(default = "default_prefer_high_res")]
    pub prefer_high_res: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            folder_title: default_folder_title(),
            prefer_high_res: default_prefer_high_res(),
        }
    }
}

impl SyncConfig {
    /// Parse a configuration from TOML content.
    pub fn parse(content: &str) -> Result<Self> {
        let config: SyncConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }
}
