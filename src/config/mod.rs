//
//  turso-cli
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! This module handles loading, saving, and accessing the CLI settings stored
//! in a TOML file in a platform-specific directory.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/turso/config.toml`
//! - **macOS**: `~/Library/Application Support/turso/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\turso\config.toml`
//!
//! The location can be overridden with `--config` or `TURSO_CONFIG`.
//!
//! ## Example Configuration File
//!
//! ```toml
//! base_url = "https://api.turso.tech"
//! organization = "acme"
//! ```
//!
//! A `token` key is also accepted for machines without a system keychain, but
//! the keychain is preferred (see [`crate::auth`]).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use turso_cli::config::Config;
//!
//! let mut config = Config::load()?;
//! config.set("organization", "acme".to_string());
//! config.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

mod file;

pub use file::*;

use std::path::{Path, PathBuf};

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_BASE_URL;

/// Keys accepted by [`Config::get`], [`Config::set`] and [`Config::unset`].
pub const CONFIG_KEYS: &[&str] = &["base_url", "organization", "token"];

/// Persistent CLI settings.
///
/// # Fields
///
/// * `base_url` - API root, defaults to `https://api.turso.tech`
/// * `organization` - Organization used when `--org` is not given
/// * `token` - API token used when neither the flag nor the keychain has one
///
/// # Examples
///
/// ```rust
/// use turso_cli::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.base_url, "https://api.turso.tech");
/// assert!(config.organization.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Default organization slug.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,

    /// Fallback API token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            organization: None,
            token: None,
        }
    }
}

impl Config {
    /// Loads configuration from the default location.
    ///
    /// A missing file is not an error; defaults are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads configuration from `path`, returning defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !config_exists(path) {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = read_config_file(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration to `path`, creating parent directories.
    ///
    /// The file is written with owner-only permissions on Unix since it may
    /// hold a token.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    /// Returns the path to the configuration file.
    ///
    /// | Platform | Path |
    /// |----------|------|
    /// | Linux | `~/.config/turso/config.toml` |
    /// | macOS | `~/Library/Application Support/turso/config.toml` |
    /// | Windows | `C:\Users\<User>\AppData\Roaming\turso\config.toml` |
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Returns `path` if given, otherwise [`Config::config_path`].
    pub fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
        match path {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::config_path(),
        }
    }

    /// Gets a configuration value by key.
    ///
    /// Returns `None` for unknown keys and unset optional values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use turso_cli::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.get("base_url"), Some("https://api.turso.tech".to_string()));
    /// assert_eq!(config.get("organization"), None);
    /// assert_eq!(config.get("unknown_key"), None);
    /// ```
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "base_url" => Some(self.base_url.clone()),
            "organization" => self.organization.clone(),
            "token" => self.token.clone(),
            _ => None,
        }
    }

    /// Sets a configuration value by key.
    ///
    /// Returns `false` if the key is unknown. Changes are only persisted when
    /// [`Config::save`] is called.
    pub fn set(&mut self, key: &str, value: String) -> bool {
        match key {
            "base_url" => {
                self.base_url = value;
                true
            }
            "organization" => {
                self.organization = Some(value);
                true
            }
            "token" => {
                self.token = Some(value);
                true
            }
            _ => false,
        }
    }

    /// Resets a configuration value to its default.
    ///
    /// Returns `false` if the key is unknown.
    pub fn unset(&mut self, key: &str) -> bool {
        match key {
            "base_url" => {
                self.base_url = default_base_url();
                true
            }
            "organization" => {
                self.organization = None;
                true
            }
            "token" => {
                self.token = None;
                true
            }
            _ => false,
        }
    }

    /// Returns every key with its current value, unset keys included.
    pub fn list(&self) -> Vec<(&'static str, Option<String>)> {
        CONFIG_KEYS.iter().map(|key| (*key, self.get(key))).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.organization.is_none());
        assert!(config.token.is_none());
    }

    #[test]
    fn test_get_set_unset() {
        let mut config = Config::default();

        assert!(config.set("organization", "acme".to_string()));
        assert_eq!(config.get("organization"), Some("acme".to_string()));

        assert!(config.set("base_url", "http://localhost:8080".to_string()));
        assert!(config.unset("base_url"));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);

        assert!(!config.set("editor", "vim".to_string()));
        assert!(!config.unset("editor"));
    }

    #[test]
    fn test_list_includes_unset_keys() {
        let config = Config::default();
        let list = config.list();
        assert_eq!(list.len(), CONFIG_KEYS.len());
        assert_eq!(list[1], ("organization", None));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("organization", "acme".to_string());
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("token"));
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "organization = \"acme\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.organization.as_deref(), Some("acme"));
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "organization = [").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_resolve_path_override() {
        let path = Path::new("/tmp/turso.toml");
        assert_eq!(Config::resolve_path(Some(path)).unwrap(), path);
    }
}
