//
//  turso-cli
//  auth/keyring.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Secure Token Storage
//!
//! API tokens are kept in the platform's native keyring:
//!
//! - **macOS**: Keychain Services
//! - **Linux**: Secret Service API (GNOME Keyring, KWallet)
//! - **Windows**: Windows Credential Manager
//!
//! ## Storage Model
//!
//! - **Service**: `turso-cli`
//! - **Username/Key**: The API base URL, so tokens for different deployments
//!   do not collide
//! - **Password/Value**: The API token
//!
//! ## Example
//!
//! ```rust,no_run
//! use turso_cli::auth::{KeyringStore, TokenStore};
//!
//! fn manage_tokens() -> anyhow::Result<()> {
//!     let store = KeyringStore::new();
//!
//!     store.store("https://api.turso.tech", "my-token")?;
//!     if let Some(token) = store.get("https://api.turso.tech")? {
//!         println!("Found stored token ({} characters)", token.len());
//!     }
//!     store.delete("https://api.turso.tech")?;
//!
//!     Ok(())
//! }
//! ```

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use ::keyring::Entry;

/// The service name used to identify this application in the system keyring.
const SERVICE_NAME: &str = "turso-cli";

/// Storage for API tokens, keyed by API base URL.
///
/// Implemented by [`KeyringStore`] for real use and [`MemoryStore`] for tests
/// and environments without a keyring.
pub trait TokenStore: Send + Sync {
    /// Stores `token` for `base_url`, replacing any previous value.
    fn store(&self, base_url: &str, token: &str) -> Result<()>;

    /// Returns the token stored for `base_url`, if any.
    fn get(&self, base_url: &str) -> Result<Option<String>>;

    /// Removes the token stored for `base_url`. Removing a missing entry succeeds.
    fn delete(&self, base_url: &str) -> Result<()>;
}

/// Token storage backed by the system keyring.
///
/// # Notes
///
/// - The keyring may require user interaction (password, biometrics) on first access.
/// - On Linux, a secret service daemon (GNOME Keyring, KWallet) must be running.
#[derive(Debug, Clone)]
pub struct KeyringStore {
    /// The service name identifying this application in the keyring.
    service: String,
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyringStore {
    /// Creates a store using the `turso-cli` service name.
    ///
    /// No keyring access occurs during construction.
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }
}

impl TokenStore for KeyringStore {
    fn store(&self, base_url: &str, token: &str) -> Result<()> {
        let entry = Entry::new(&self.service, base_url)?;
        entry.set_password(token)?;
        Ok(())
    }

    fn get(&self, base_url: &str) -> Result<Option<String>> {
        let entry = Entry::new(&self.service, base_url)?;
        match entry.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn delete(&self, base_url: &str) -> Result<()> {
        let entry = Entry::new(&self.service, base_url)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()), // already gone
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process token storage.
///
/// Nothing is persisted; entries live as long as the store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tokens: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn tokens(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.tokens.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TokenStore for MemoryStore {
    fn store(&self, base_url: &str, token: &str) -> Result<()> {
        self.tokens().insert(base_url.to_string(), token.to_string());
        Ok(())
    }

    fn get(&self, base_url: &str) -> Result<Option<String>> {
        Ok(self.tokens().get(base_url).cloned())
    }

    fn delete(&self, base_url: &str) -> Result<()> {
        self.tokens().remove(base_url);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert_eq!(store.get("https://api.turso.tech").unwrap(), None);

        store.store("https://api.turso.tech", "a").unwrap();
        store.store("http://localhost:8080", "b").unwrap();
        assert_eq!(store.get("https://api.turso.tech").unwrap().as_deref(), Some("a"));

        store.delete("https://api.turso.tech").unwrap();
        store.delete("https://api.turso.tech").unwrap();
        assert_eq!(store.get("https://api.turso.tech").unwrap(), None);
        assert_eq!(store.get("http://localhost:8080").unwrap().as_deref(), Some("b"));
    }
}
