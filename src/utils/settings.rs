//! Settings file support.
//!
//! Reads `$HOME/.repo-owners/settings.json` and uses it as a fallback for
//! environment variables such as `GITHUB_TOKEN`:
//!
//! ```json
//! { "env": { "GITHUB_TOKEN": "ghp_..." } }
//! ```

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variables consulted for the GitHub token, in order.
pub const TOKEN_ENV_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// Settings loaded from $HOME/.repo-owners/settings.json.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Environment variable overrides.
    #[serde(default)]
    pub env: HashMap<String, String>,
}

impl Settings {
    /// Loads settings from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from_path(Self::settings_path()?)
    }

    /// Loads settings from `path`; a missing file yields empty settings.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    /// Returns the default settings path.
    pub fn settings_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to determine home directory")?;
        Ok(home_dir.join(".repo-owners").join("settings.json"))
    }

    /// Returns the first of `keys` set in the environment, then in the settings file.
    ///
    /// Empty values count as unset.
    pub fn lookup(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .find_map(|key| env::var(key).ok().filter(|value| !value.is_empty()))
            .or_else(|| {
                keys.iter()
                    .find_map(|key| self.env.get(*key).filter(|value| !value.is_empty()))
                    .cloned()
            })
    }
}

/// Looks up the GitHub token in the environment and the settings file.
///
/// An unreadable settings file is treated as absent.
pub fn github_token_fallback() -> Option<String> {
    Settings::load()
        .unwrap_or_default()
        .lookup(&TOKEN_ENV_VARS)
}
