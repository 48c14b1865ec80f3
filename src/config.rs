//! # Configuration Persistence
//!
//! Manages the context deck stored in `~/.config/deckhand/config.json`.
//!
//! ## Overview
//!
//! The [`Config`] struct owns the full context mapping, the name of the
//! currently active context, and the display theme. It is loaded once at
//! process start, mutated in place by [`crate::store::ContextStore`]
//! operations, and explicitly saved after each mutation. There is no
//! autosave or write-behind.
//!
//! ## File Location
//!
//! ```text
//! ~/.config/deckhand/config.json
//! ```
//!
//! The `directories` crate is used to resolve the platform-appropriate config
//! directory. A missing file loads as [`Config::default`], so first runs need
//! no setup step.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from loading or saving the configuration file. Mutating store
/// operations surface these to the caller instead of swallowing them, since
/// a lost write reverts durable state on the next load.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not determine config directory")]
    NoConfigDir,
}

/// Outcome of one recorded job execution. Immutable once created; a new run
/// fully replaces the previous result on the context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub timestamp: DateTime<Utc>,
    /// True iff the process launched and exited with status 0.
    pub success: bool,
    /// Real exit status when the platform exposes it, 0 otherwise.
    pub exit_code: i32,
    /// Full formatted stdout/stderr report.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub output: String,
}

/// A named unit of configuration bundling commands and variables.
///
/// `name` uniquely keys the store; renaming is delete + insert. The
/// `commands` map is keyed by role (`"run"`, `"activate"`) and `variables`
/// feed `${KEY}` expansion. Both use `BTreeMap` so iteration and
/// serialization order are deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    pub name: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub commands: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_result: Option<ExecutionResult>,
}

impl Context {
    /// Convenience constructor for a context with no commands or variables.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            description: String::new(),
            commands: BTreeMap::new(),
            variables: BTreeMap::new(),
            last_result: None,
        }
    }
}

/// The persisted four-slot color theme. Values are color strings understood
/// by [`crate::ui::theme::Theme::from_colors`]: ANSI-256 indexes such as
/// `"205"`, hex like `"#ff87d7"`, or color names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub title: String,
    pub selected: String,
    pub border: String,
    pub output_title: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            title: "205".to_string(),
            selected: "199".to_string(),
            border: "168".to_string(),
            output_title: "212".to_string(),
        }
    }
}

/// Persisted application state: all contexts, the active context name
/// (empty = none), and the display theme.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub contexts: BTreeMap<String, Context>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub current_context: String,
    #[serde(default)]
    pub theme: ThemeColors,
}

impl Config {
    /// Load configuration from a specific path. A missing file yields the
    /// default (empty) configuration; a present-but-unparseable file is an
    /// error. A zero-value theme is replaced by the default palette.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self =
            serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        if config.theme.title.is_empty() {
            config.theme = ThemeColors::default();
        }
        Ok(config)
    }

    /// Save the configuration to a specific path, creating parent
    /// directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let contents = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, contents).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(())
    }

    /// Return the default path to the config file.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dirs = directories::ProjectDirs::from("", "", "deckhand")
            .ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.json"))
    }
}
