//! Configuration handling for Scrawl
//!
//! Configuration lives in `config.toml` under the user config directory
//! (e.g. `~/.config/scrawl/config.toml`). It carries the Trello credentials
//! and the checklist titles used during export.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing Trello credentials: set api_key and token in {0}")]
    MissingCredentials(String),
}

/// Trello section of the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrelloConfig {
    /// API key, from https://trello.com/app-key
    pub api_key: Option<String>,

    /// Server token issued for the key
    pub token: Option<String>,

    /// Title of the acceptance-criteria checklist
    pub ac_checklist_title: String,

    /// Title of the checklist linking prerequisite cards
    pub prerequisites_checklist_title: String,

    /// Title of the checklist linking dependent cards
    pub dependents_checklist_title: String,
}

impl Default for TrelloConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            token: None,
            ac_checklist_title: "Acceptance Criteria".to_string(),
            prerequisites_checklist_title: "Pre-requisite Cards".to_string(),
            dependents_checklist_title: "Dependent Cards".to_string(),
        }
    }
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Trello credentials and export settings
    pub trello: TrelloConfig,
}

impl Config {
    /// Loads configuration from the default location
    ///
    /// A missing file yields the defaults; credentials are only checked
    /// when the board client is actually needed.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Returns the default config file path
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "scrawl", "scrawl")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Returns the credentials, or an error pointing at the config file
    pub fn credentials(&self) -> Result<(&str, &str), ConfigError> {
        match (self.trello.api_key.as_deref(), self.trello.token.as_deref()) {
            (Some(key), Some(token)) if !key.is_empty() && !token.is_empty() => Ok((key, token)),
            _ => {
                let path = Self::config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "config.toml".to_string());
                Err(ConfigError::MissingCredentials(path))
            }
        }
    }
}
