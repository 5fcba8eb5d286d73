//
//  turso-cli
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Authentication commands for the Turso CLI.
//!
//! `login` verifies a platform API token against the API before storing it in
//! the system keyring, keyed by base URL. `--insecure-storage` writes it to the
//! configuration file instead, for machines without a keyring.

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use super::GlobalOptions;
use crate::api::{ApiError, ClientConfig, Organization, OrganizationService, TursoClient};
use crate::auth::{read_token_from_stdin, resolve_token, validate_token, KeyringStore, TokenStore};
use crate::config::Config;
use crate::interactive::{can_prompt, prompt_password};
use crate::output::{print_field, TableOutput};

/// Authenticate with the Turso platform
#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Store a platform API token
    Login(LoginArgs),

    /// Remove the stored API token
    Logout,

    /// Show authentication status
    Status,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Read the token from standard input
    #[arg(long)]
    pub with_token: bool,

    /// Store the token in the configuration file instead of the keyring
    #[arg(long)]
    pub insecure_storage: bool,
}

/// Result of `auth status`.
#[derive(Debug, Serialize)]
struct AuthStatus {
    base_url: String,
    token_source: String,
    organization: Option<String>,
    organizations: Vec<String>,
}

impl TableOutput for AuthStatus {
    fn print_table(&self, color: bool) {
        println!("Logged in to {}", self.base_url);
        print_field("Token source", &self.token_source, color);
        print_field(
            "Organization",
            self.organization.as_deref().unwrap_or("(not set)"),
            color,
        );
        print_field("Organizations", &self.organizations.join(", "), color);
    }
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuthSubcommand::Login(args) => login(args, global).await,
            AuthSubcommand::Logout => logout(global),
            AuthSubcommand::Status => status(global).await,
        }
    }
}

async fn login(args: &LoginArgs, global: &GlobalOptions) -> Result<()> {
    let output = global.output();
    let config_path = global.config_path()?;
    let mut config = Config::load_from(&config_path)?;
    let base_url = global.base_url(&config);

    let token = if args.with_token {
        read_token_from_stdin()?
    } else if can_prompt(global.no_prompt) {
        println!("Paste a platform API token for {}", base_url);
        prompt_password("API token")?
    } else {
        bail!("No token provided. Pipe it on stdin with: turso auth login --with-token");
    };

    if !validate_token(&token) {
        bail!("Invalid token format");
    }

    let client = TursoClient::new(ClientConfig::new(token.as_str(), "").with_base_url(base_url.as_str()))?;
    let orgs = verify_token(&client).await?;

    let changed = store_login(&token, &orgs, &KeyringStore::new(), &mut config, &base_url, args.insecure_storage)?;
    if changed {
        config.save_to(&config_path)?;
    }

    output.write_success(&format!("Logged in to {}", base_url));
    if args.insecure_storage {
        output.write_warning(&format!("Token stored in plain text in {}", config_path.display()));
    }
    if let Some(org) = &config.organization {
        output.write_info(&format!("Default organization: {}", org));
    }

    Ok(())
}

/// Checks the token by listing the organizations it can see.
async fn verify_token<S>(service: &S) -> Result<Vec<Organization>>
where
    S: OrganizationService + ?Sized,
{
    service
        .list_organizations()
        .await
        .context("Token verification failed")
}

/// Persists a verified token and picks a default organization.
///
/// The organization is only set when none is configured and the token sees
/// exactly one. Returns `true` if `config` changed and must be saved.
fn store_login(
    token: &str,
    orgs: &[Organization],
    store: &dyn TokenStore,
    config: &mut Config,
    base_url: &str,
    insecure_storage: bool,
) -> Result<bool> {
    let mut changed = false;

    if insecure_storage {
        config.token = Some(token.to_string());
        changed = true;
    } else {
        store
            .store(base_url, token)
            .context("Could not store the token in the system keyring, retry with --insecure-storage")?;
    }

    if config.organization.is_none() {
        if let [org] = orgs {
            tracing::debug!(org = %org.slug, "defaulting to the only organization");
            config.organization = Some(org.slug.clone());
            changed = true;
        }
    }

    Ok(changed)
}

fn logout(global: &GlobalOptions) -> Result<()> {
    let config_path = global.config_path()?;
    let mut config = Config::load_from(&config_path)?;
    let base_url = global.base_url(&config);

    if clear_login(&KeyringStore::new(), &mut config, &base_url)? {
        config.save_to(&config_path)?;
    }

    global.output().write_success(&format!("Logged out of {}", base_url));
    Ok(())
}

/// Removes the keyring entry for `base_url` and any token in `config`.
///
/// Returns `true` if `config` changed and must be saved.
fn clear_login(store: &dyn TokenStore, config: &mut Config, base_url: &str) -> Result<bool> {
    store.delete(base_url)?;
    Ok(config.token.take().is_some())
}

async fn status(global: &GlobalOptions) -> Result<()> {
    let config = global.load_config()?;
    let base_url = global.base_url(&config);

    let resolved = resolve_token(global.token.as_deref(), &KeyringStore::new(), &base_url, &config)
        .ok_or(ApiError::ApiTokenNotSet)?;
    let client = TursoClient::new(ClientConfig::new(resolved.token, "").with_base_url(base_url.as_str()))?;
    let orgs = verify_token(&client).await?;

    let org = global.org(&config);
    let status = AuthStatus {
        base_url,
        token_source: resolved.source.to_string(),
        organization: (!org.is_empty()).then_some(org),
        organizations: orgs.into_iter().map(|o| o.slug).collect(),
    };

    global.output().write(&status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockOrganizationService;
    use crate::auth::MemoryStore;
    use reqwest::StatusCode;

    const BASE: &str = "https://api.turso.tech";

    fn org(slug: &str) -> Organization {
        Organization {
            name: slug.to_string(),
            slug: slug.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_store_login_keyring_and_single_org() {
        let store = MemoryStore::new();
        let mut config = Config::default();

        let changed = store_login("tok", &[org("acme")], &store, &mut config, BASE, false).unwrap();
        assert!(changed);
        assert_eq!(store.get(BASE).unwrap().as_deref(), Some("tok"));
        assert_eq!(config.organization.as_deref(), Some("acme"));
        assert!(config.token.is_none());
    }

    #[test]
    fn test_store_login_keeps_existing_org() {
        let store = MemoryStore::new();
        let mut config = Config {
            organization: Some("mine".to_string()),
            ..Default::default()
        };

        let changed = store_login("tok", &[org("acme")], &store, &mut config, BASE, false).unwrap();
        assert!(!changed);
        assert_eq!(config.organization.as_deref(), Some("mine"));
    }

    #[test]
    fn test_store_login_many_orgs_sets_none() {
        let store = MemoryStore::new();
        let mut config = Config::default();

        store_login("tok", &[org("a"), org("b")], &store, &mut config, BASE, false).unwrap();
        assert!(config.organization.is_none());
    }

    #[test]
    fn test_store_login_insecure_storage() {
        let store = MemoryStore::new();
        let mut config = Config::default();

        let changed = store_login("tok", &[], &store, &mut config, BASE, true).unwrap();
        assert!(changed);
        assert_eq!(config.token.as_deref(), Some("tok"));
        assert_eq!(store.get(BASE).unwrap(), None);
    }

    #[test]
    fn test_clear_login() {
        let store = MemoryStore::new();
        store.store(BASE, "tok").unwrap();
        let mut config = Config {
            token: Some("tok".to_string()),
            ..Default::default()
        };

        assert!(clear_login(&store, &mut config, BASE).unwrap());
        assert_eq!(store.get(BASE).unwrap(), None);
        assert!(config.token.is_none());

        assert!(!clear_login(&store, &mut config, BASE).unwrap());
    }

    #[tokio::test]
    async fn test_verify_token() {
        let orgs = verify_token(&MockOrganizationService::default()).await.unwrap();
        assert_eq!(orgs.len(), 1);

        let rejected = MockOrganizationService {
            failure: Some(StatusCode::UNAUTHORIZED),
            ..Default::default()
        };
        let err = verify_token(&rejected).await.unwrap_err();
        assert!(err.to_string().contains("Token verification failed"));
        assert_eq!(
            err.downcast_ref::<ApiError>().and_then(ApiError::status),
            Some(StatusCode::UNAUTHORIZED)
        );
    }
}
