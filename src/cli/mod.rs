//
//  turso-cli
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod auth;
mod completion;
mod config;
mod db;
mod group;
mod org;

pub use auth::AuthCommand;
pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use db::DbCommand;
pub use group::GroupCommand;
pub use org::OrgCommand;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use reqwest::StatusCode;
use thiserror::Error;

use crate::api::{ApiError, ClientConfig, TursoClient};
use crate::auth::{resolve_token, KeyringStore, TokenStore};
use crate::config::Config;
use crate::exit_codes;
use crate::interactive::{can_prompt, prompt_confirm_with_default};
use crate::output::{OutputFormat, OutputWriter};

/// Turso CLI - Manage Turso databases from the command line
#[derive(Parser, Debug)]
#[command(
    name = "turso",
    version,
    about = "Manage Turso databases from the command line",
    long_about = "turso is a CLI for the Turso platform API.\n\n\
                  It manages organizations, groups, databases and database tokens.",
    propagate_version = true,
    after_help = "Use 'turso <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Platform API token
    #[arg(long, global = true, env = "TURSO_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Organization to operate on
    #[arg(long, short = 'o', global = true, env = "TURSO_ORG")]
    pub org: Option<String>,

    /// Platform API base URL
    #[arg(long, global = true, env = "TURSO_BASE_URL")]
    pub base_url: Option<String>,

    /// Path to the configuration file
    #[arg(long, global = true, env = "TURSO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable interactive prompts
    #[arg(long, global = true, env = "TURSO_NO_PROMPT")]
    pub no_prompt: bool,
}

impl GlobalOptions {
    /// Returns the configuration file path in effect.
    pub fn config_path(&self) -> Result<PathBuf> {
        Config::resolve_path(self.config.as_deref())
    }

    /// Loads the configuration file in effect.
    pub fn load_config(&self) -> Result<Config> {
        Config::load_from(&self.config_path()?)
    }

    /// Returns the API base URL: flag, then configuration file.
    pub fn base_url(&self, config: &Config) -> String {
        self.base_url
            .clone()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| config.base_url.clone())
    }

    /// Returns the organization: flag, then configuration file, else empty.
    pub fn org(&self, config: &Config) -> String {
        self.org
            .clone()
            .or_else(|| config.organization.clone())
            .unwrap_or_default()
    }

    /// Builds the client settings from flags, keyring and configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ApiTokenNotSet`] if no source provides a token.
    pub fn client_config(&self, config: &Config, store: &dyn TokenStore) -> Result<ClientConfig, ApiError> {
        let base_url = self.base_url(config);
        let resolved = resolve_token(self.token.as_deref(), store, &base_url, config)
            .ok_or(ApiError::ApiTokenNotSet)?;

        tracing::debug!(source = %resolved.source, base_url = %base_url, "resolved api token");

        Ok(ClientConfig::new(resolved.token, self.org(config)).with_base_url(base_url))
    }

    /// Builds an authenticated client using the system keyring.
    pub fn client(&self) -> Result<TursoClient> {
        let config = self.load_config()?;
        let client_config = self.client_config(&config, &KeyringStore::new())?;
        Ok(TursoClient::new(client_config)?)
    }

    /// Returns a writer for the selected output format.
    pub fn output(&self) -> OutputWriter {
        OutputWriter::new(OutputFormat::from_json_flag(self.json))
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate with the Turso platform
    Auth(AuthCommand),

    /// Manage organizations
    Org(OrgCommand),

    /// Manage groups
    Group(GroupCommand),

    /// Manage databases
    Db(DbCommand),

    /// Manage CLI configuration
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Print version information
    Version,
}

/// Errors raised by the command layer itself.
#[derive(Error, Debug)]
pub enum CliError {
    /// The user declined a confirmation prompt.
    #[error("operation cancelled")]
    Cancelled,

    /// A destructive command ran without `--yes` where no prompt can be shown.
    #[error("refusing to delete {0} without confirmation, pass --yes")]
    ConfirmationRequired(String),
}

/// Asks before deleting `what`, unless `yes` was passed.
pub(crate) fn confirm_deletion(what: &str, yes: bool, global: &GlobalOptions) -> Result<()> {
    if yes {
        return Ok(());
    }

    if !can_prompt(global.no_prompt) {
        return Err(CliError::ConfirmationRequired(what.to_string()).into());
    }

    if prompt_confirm_with_default(&format!("Delete {what}?"), false)? {
        Ok(())
    } else {
        Err(CliError::Cancelled.into())
    }
}

/// Maps a command failure to a process exit code.
///
/// | Error | Exit code |
/// |-------|-----------|
/// | Missing or malformed API token, 401, 403 | [`exit_codes::AUTH_ERROR`] |
/// | 404 | [`exit_codes::NOT_FOUND`] |
/// | Local validation failure, missing `--yes` | [`exit_codes::USAGE`] |
/// | Declined confirmation | [`exit_codes::CANCELLED`] |
/// | Anything else | [`exit_codes::ERROR`] |
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return match cli_err {
            CliError::Cancelled => exit_codes::CANCELLED,
            CliError::ConfirmationRequired(_) => exit_codes::USAGE,
        };
    }

    let Some(api_err) = err.downcast_ref::<ApiError>() else {
        return exit_codes::ERROR;
    };

    match api_err {
        ApiError::ApiTokenNotSet | ApiError::InvalidApiToken => exit_codes::AUTH_ERROR,
        e if e.is_validation() => exit_codes::USAGE,
        e => match e.status() {
            Some(s) if s == StatusCode::UNAUTHORIZED || s == StatusCode::FORBIDDEN => {
                exit_codes::AUTH_ERROR
            }
            Some(s) if s == StatusCode::NOT_FOUND => exit_codes::NOT_FOUND,
            _ => exit_codes::ERROR,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryStore;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "turso", "db", "list", "--org", "acme", "--token", "t", "--json",
        ])
        .unwrap();
        assert_eq!(cli.global.org.as_deref(), Some("acme"));
        assert!(cli.global.json);
    }

    #[test]
    fn test_flags_override_config() {
        let config = Config {
            base_url: "http://from-config".to_string(),
            organization: Some("config-org".to_string()),
            token: Some("config-token".to_string()),
        };
        let global = GlobalOptions {
            org: Some("flag-org".to_string()),
            base_url: Some("http://from-flag".to_string()),
            ..Default::default()
        };

        let client_config = global.client_config(&config, &MemoryStore::new()).unwrap();
        assert_eq!(client_config.org_name, "flag-org");
        assert_eq!(client_config.base_url, "http://from-flag");
        assert_eq!(client_config.token, "config-token");
    }

    #[test]
    fn test_keyring_keyed_by_effective_base_url() {
        let store = MemoryStore::new();
        store.store("http://from-flag", "keyring-token").unwrap();

        let global = GlobalOptions {
            base_url: Some("http://from-flag".to_string()),
            ..Default::default()
        };
        let client_config = global.client_config(&Config::default(), &store).unwrap();
        assert_eq!(client_config.token, "keyring-token");
        assert_eq!(client_config.org_name, "");
    }

    #[test]
    fn test_missing_token() {
        let global = GlobalOptions::default();
        let err = global
            .client_config(&Config::default(), &MemoryStore::new())
            .unwrap_err();
        assert!(matches!(err, ApiError::ApiTokenNotSet));
    }

    #[test]
    fn test_exit_codes() {
        let code = |e: ApiError| exit_code(&anyhow::Error::new(e));

        assert_eq!(code(ApiError::ApiTokenNotSet), exit_codes::AUTH_ERROR);
        assert_eq!(code(ApiError::InvalidDatabaseName), exit_codes::USAGE);
        assert_eq!(code(ApiError::missing_field("organization")), exit_codes::USAGE);
        assert_eq!(
            code(ApiError::request_failed("database", "getting", StatusCode::NOT_FOUND)),
            exit_codes::NOT_FOUND
        );
        assert_eq!(
            code(ApiError::request_failed("databases", "listing", StatusCode::UNAUTHORIZED)),
            exit_codes::AUTH_ERROR
        );
        assert_eq!(
            code(ApiError::request_failed("group", "creating", StatusCode::CONFLICT)),
            exit_codes::ERROR
        );
        assert_eq!(exit_code(&CliError::Cancelled.into()), exit_codes::CANCELLED);
        assert_eq!(exit_code(&anyhow::anyhow!("boom")), exit_codes::ERROR);
    }

    #[test]
    fn test_confirm_deletion_without_prompt() {
        let global = GlobalOptions {
            no_prompt: true,
            ..Default::default()
        };
        assert!(confirm_deletion("database my-db", true, &global).is_ok());

        let err = confirm_deletion("database my-db", false, &global).unwrap_err();
        assert_eq!(exit_code(&err), exit_codes::USAGE);
    }
}
