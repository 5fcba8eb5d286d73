//
//  turso-cli
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! The Turso platform API authenticates every call with a bearer API token.
//! This module stores that token and finds it again.
//!
//! ## Module Structure
//!
//! - [`keyring`]: Token storage in the system keyring
//! - [`token`]: Reading, format-checking and resolving tokens
//!
//! ## Example
//!
//! ```rust,no_run
//! use turso_cli::auth::{resolve_token, KeyringStore};
//! use turso_cli::config::Config;
//!
//! let config = Config::load()?;
//! let store = KeyringStore::new();
//! match resolve_token(None, &store, &config.base_url, &config) {
//!     Some(resolved) => println!("token from {}", resolved.source),
//!     None => println!("not logged in"),
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

mod keyring;
mod token;

pub use self::keyring::*;
pub use token::*;
