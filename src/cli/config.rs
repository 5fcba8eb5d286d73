//
//  turso-cli
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! Reads and writes the TOML configuration file selected by `--config`,
//! `TURSO_CONFIG` or the platform default location.

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use console::style;

use crate::config::{Config, CONFIG_KEYS};

use super::GlobalOptions;

/// Manage CLI configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get a configuration value
    Get(KeyArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Reset a configuration value to its default
    Unset(KeyArgs),

    /// List all configuration values
    #[command(visible_alias = "ls")]
    List,

    /// Show configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct KeyArgs {
    /// Configuration key (base_url, organization, token)
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key (base_url, organization, token)
    pub key: String,

    /// Configuration value
    pub value: String,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => self.get(args, global),
            ConfigSubcommand::Set(args) => self.set(args, global),
            ConfigSubcommand::Unset(args) => self.unset(args, global),
            ConfigSubcommand::List => self.list(global),
            ConfigSubcommand::Path => self.path(global),
        }
    }

    fn get(&self, args: &KeyArgs, global: &GlobalOptions) -> Result<()> {
        check_key(&args.key)?;
        let value = global.load_config()?.get(&args.key);

        if global.json {
            let result = serde_json::json!({
                "key": args.key,
                "value": value,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else if let Some(v) = value {
            println!("{}", v);
        }

        Ok(())
    }

    fn set(&self, args: &SetArgs, global: &GlobalOptions) -> Result<()> {
        let path = global.config_path()?;
        let mut config = Config::load_from(&path)?;
        set_value(&mut config, &args.key, &args.value)?;
        config.save_to(&path)?;

        if global.json {
            let result = serde_json::json!({
                "success": true,
                "key": args.key,
                "value": display_value(&args.key, Some(args.value.as_str())),
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!(
                "{} Set {} = {}",
                style("✓").green(),
                style(&args.key).cyan(),
                display_value(&args.key, Some(args.value.as_str())).unwrap_or_default()
            );
        }

        Ok(())
    }

    fn unset(&self, args: &KeyArgs, global: &GlobalOptions) -> Result<()> {
        check_key(&args.key)?;
        let path = global.config_path()?;
        let mut config = Config::load_from(&path)?;
        config.unset(&args.key);
        config.save_to(&path)?;

        if global.json {
            let result = serde_json::json!({
                "success": true,
                "key": args.key,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{} Unset {}", style("✓").green(), style(&args.key).cyan());
        }

        Ok(())
    }

    fn list(&self, global: &GlobalOptions) -> Result<()> {
        let config = global.load_config()?;
        let entries = config.list();

        if global.json {
            let map: serde_json::Map<String, serde_json::Value> = entries
                .iter()
                .map(|(key, value)| {
                    (key.to_string(), serde_json::json!(display_value(key, value.as_deref())))
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&map)?);
            return Ok(());
        }

        for (key, value) in &entries {
            println!(
                "{}: {}",
                style(key).cyan(),
                display_value(key, value.as_deref()).unwrap_or_else(|| "-".to_string())
            );
        }

        Ok(())
    }

    fn path(&self, global: &GlobalOptions) -> Result<()> {
        let config_path = global.config_path()?;

        if global.json {
            let result = serde_json::json!({
                "path": config_path.display().to_string(),
                "exists": config_path.is_file(),
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{}", config_path.display());
        }

        Ok(())
    }
}

fn check_key(key: &str) -> Result<()> {
    if !CONFIG_KEYS.contains(&key) {
        bail!(
            "Unknown configuration key '{}'. Valid keys: {}",
            key,
            CONFIG_KEYS.join(", ")
        );
    }
    Ok(())
}

/// Validates and applies one `config set`.
fn set_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    check_key(key)?;

    if key == "base_url" {
        let url = url::Url::parse(value).with_context(|| format!("Invalid base_url '{}'", value))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("Invalid base_url '{}': scheme must be http or https", value);
        }
    }

    if value.trim().is_empty() {
        bail!("Value for '{}' must not be empty, use 'turso config unset {}'", key, key);
    }

    config.set(key, value.to_string());
    Ok(())
}

/// Masks the token so listing the configuration does not print it.
fn display_value(key: &str, value: Option<&str>) -> Option<String> {
    match (key, value) {
        ("token", Some(_)) => Some("********".to_string()),
        (_, v) => v.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn global_for(dir: &TempDir) -> GlobalOptions {
        GlobalOptions {
            config: Some(dir.path().join("config.toml")),
            ..Default::default()
        }
    }

    #[test]
    fn test_set_value_validation() {
        let mut config = Config::default();

        assert!(set_value(&mut config, "editor", "vim").is_err());
        assert!(set_value(&mut config, "base_url", "not a url").is_err());
        assert!(set_value(&mut config, "base_url", "ftp://example.com").is_err());
        assert!(set_value(&mut config, "organization", " ").is_err());

        set_value(&mut config, "base_url", "http://localhost:8080").unwrap();
        set_value(&mut config, "organization", "acme").unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.organization.as_deref(), Some("acme"));
    }

    #[test]
    fn test_display_value_masks_token() {
        assert_eq!(display_value("token", Some("secret")).as_deref(), Some("********"));
        assert_eq!(display_value("token", None), None);
        assert_eq!(display_value("organization", Some("acme")).as_deref(), Some("acme"));
    }

    #[tokio::test]
    async fn test_set_then_unset_persists() {
        let dir = TempDir::new().unwrap();
        let global = global_for(&dir);

        let set = ConfigCommand {
            command: ConfigSubcommand::Set(SetArgs {
                key: "organization".into(),
                value: "acme".into(),
            }),
        };
        set.run(&global).await.unwrap();
        assert_eq!(global.load_config().unwrap().organization.as_deref(), Some("acme"));

        let unset = ConfigCommand {
            command: ConfigSubcommand::Unset(KeyArgs {
                key: "organization".into(),
            }),
        };
        unset.run(&global).await.unwrap();
        assert_eq!(global.load_config().unwrap().organization, None);
    }

    #[tokio::test]
    async fn test_set_token_stores_value() {
        let dir = TempDir::new().unwrap();
        let global = global_for(&dir);

        let set = ConfigCommand {
            command: ConfigSubcommand::Set(SetArgs {
                key: "token".into(),
                value: "secret".into(),
            }),
        };
        set.run(&global).await.unwrap();
        assert_eq!(global.load_config().unwrap().token.as_deref(), Some("secret"));
    }

    #[tokio::test]
    async fn test_get_unknown_key() {
        let dir = TempDir::new().unwrap();
        let cmd = ConfigCommand {
            command: ConfigSubcommand::Get(KeyArgs { key: "nope".into() }),
        };
        let err = cmd.run(&global_for(&dir)).await.unwrap_err();
        assert!(err.to_string().contains("Unknown configuration key"));
    }
}
