//! Walk configuration loaded from `config.json`.
//!
//! Every field is optional in the file; missing fields take their defaults
//! and command-line flags override whatever the file provides.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::CoreError;
use crate::globus::DEFAULT_BASE_URL;
use crate::walker::WalkOptions;

/// Persisted settings for a walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Display name used to look up the endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_name: Option<String>,
    #[serde(default = "default_root_path")]
    pub root_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            endpoint_name: None,
            root_path: default_root_path(),
            max_depth: None,
            search_limit: default_search_limit(),
        }
    }
}

impl WalkConfig {
    /// Load from the default config file.
    pub fn load() -> Result<Self, CoreError> {
        Self::load_from(&Self::default_path())
    }

    /// Load from a specific path.
    ///
    /// A missing file yields the defaults; a file that exists but cannot be
    /// parsed is an error.
    pub fn load_from(path: &Path) -> Result<Self, CoreError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let config: WalkConfig = serde_json::from_str(&contents)
            .map_err(|e| CoreError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values that cannot drive a walk.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.root_path.is_empty() {
            return Err(CoreError::Config("rootPath must not be empty".to_string()));
        }
        if self.search_limit == 0 {
            return Err(CoreError::Config(
                "searchLimit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions::with_max_depth(self.max_depth)
    }

    /// Default config file path: `$XDG_CONFIG_HOME/remotewalk/config.json`,
    /// else `~/.config/remotewalk/config.json`.
    pub fn default_path() -> PathBuf {
        config_dir().join("config.json")
    }
}

/// Get the platform config directory.
fn config_dir() -> PathBuf {
    config_dir_from(
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME"),
    )
}

/// `XDG_CONFIG_HOME` only counts when it is an absolute path; empty or
/// relative values fall through to `$HOME/.config`.
fn config_dir_from(xdg: Option<OsString>, home: Option<OsString>) -> PathBuf {
    if let Some(xdg) = xdg.map(PathBuf::from).filter(|p| p.is_absolute()) {
        return xdg.join("remotewalk");
    }
    if let Some(home) = home.filter(|h| !h.is_empty()) {
        return PathBuf::from(home).join(".config").join("remotewalk");
    }
    PathBuf::from(".remotewalk")
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_root_path() -> String {
    "/~/".to_string()
}

fn default_search_limit() -> usize {
    25
}
