//
//  turso-cli
//  auth/token.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Token Handling
//!
//! Reading, format-checking and resolving the platform API token.
//!
//! ## Resolution Order
//!
//! 1. `--token` flag or `TURSO_API_TOKEN`
//! 2. System keyring entry for the API base URL
//! 3. `token` key of the configuration file
//!
//! A keyring that cannot be reached is skipped rather than treated as fatal,
//! so headless machines fall through to the configuration file.

use std::fmt;

use anyhow::Result;

use super::keyring::TokenStore;
use crate::config::Config;

/// Reads a token from the first line of standard input, trimmed.
///
/// Supports piped input: `echo "$TOKEN" | turso auth login --with-token`
pub fn read_token_from_stdin() -> Result<String> {
    use std::io::{self, BufRead};

    let stdin = io::stdin();
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;

    Ok(line.trim().to_string())
}

/// Returns `true` if `token` is non-empty and contains no whitespace.
///
/// This is a format check only; it does not contact the API.
///
/// ```rust
/// use turso_cli::auth::validate_token;
///
/// assert!(validate_token("eyJhbGciOi"));
/// assert!(!validate_token(""));
/// assert!(!validate_token("has space"));
/// ```
pub fn validate_token(token: &str) -> bool {
    !token.is_empty() && !token.chars().any(char::is_whitespace)
}

/// Where a resolved token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// `--token` flag or `TURSO_API_TOKEN`.
    Flag,
    /// System keyring.
    Keyring,
    /// Configuration file.
    Config,
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => write!(f, "flag or TURSO_API_TOKEN"),
            Self::Keyring => write!(f, "keyring"),
            Self::Config => write!(f, "config file"),
        }
    }
}

/// A token together with its origin.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedToken {
    /// The token value.
    pub token: String,
    /// Where it was found.
    pub source: TokenSource,
}

impl fmt::Debug for ResolvedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedToken")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Finds the API token for `base_url`.
///
/// Empty values are ignored at every step. Returns `None` when no source has a
/// token; callers turn that into [`ApiError::ApiTokenNotSet`](crate::api::ApiError::ApiTokenNotSet).
pub fn resolve_token(
    flag: Option<&str>,
    store: &dyn TokenStore,
    base_url: &str,
    config: &Config,
) -> Option<ResolvedToken> {
    if let Some(token) = flag.filter(|t| !t.is_empty()) {
        return Some(ResolvedToken {
            token: token.to_string(),
            source: TokenSource::Flag,
        });
    }

    match store.get(base_url) {
        Ok(Some(token)) if !token.is_empty() => {
            return Some(ResolvedToken {
                token,
                source: TokenSource::Keyring,
            });
        }
        Ok(_) => {}
        Err(e) => tracing::debug!(error = %e, "keyring unavailable, skipping"),
    }

    config
        .token
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(|token| ResolvedToken {
            token: token.to_string(),
            source: TokenSource::Config,
        })
}
