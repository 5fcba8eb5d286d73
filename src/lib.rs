//
//  turso-cli
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Turso CLI Library
//!
//! A typed client and command-line interface for the Turso cloud database
//! management API.
//!
//! ## Overview
//!
//! This library provides the core functionality for the `turso` CLI tool,
//! letting developers manage organizations, groups, databases and database
//! tokens from the terminal or from their own Rust code.
//!
//! ## Features
//!
//! - **Typed API Client**: One capability trait per resource, implemented by [`api::TursoClient`]
//! - **Local Validation**: Malformed requests are rejected before any network traffic
//! - **Injectable Transport**: Swap the HTTP stack or record requests in tests
//! - **Secure Authentication**: API tokens stored in the system keychain
//! - **Scriptable Output**: Tables for humans, JSON for automation
//!
//! ## Module Structure
//!
//! - [`api`]: Client, transport, validation and resource operations
//! - [`cli`]: Command-line interface definitions using clap
//! - [`auth`]: Token storage and resolution
//! - [`config`]: Configuration file management
//! - [`output`]: Output formatting (Table, JSON)
//! - [`interactive`]: Interactive prompts
//! - [`util`]: Utility functions
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use turso_cli::api::{ClientConfig, GroupService, TursoClient};
//!
//! # async fn example() -> Result<(), turso_cli::api::ApiError> {
//! let client = TursoClient::new(ClientConfig::new("your-token", "acme"))?;
//! for group in client.list_groups().await?.groups {
//!     println!("{} ({})", group.name, group.primary);
//! }
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
///
/// Contains all CLI commands, arguments, and subcommands defined using the clap derive API.
pub mod cli;

/// Typed client for the Turso platform API.
pub mod api;

/// API token storage and resolution.
///
/// Tokens are kept in the system keychain, keyed by API base URL, with the
/// configuration file and environment as fallbacks.
pub mod auth;

/// Configuration file management.
///
/// Manages the CLI's configuration stored in platform-specific locations:
/// - Linux: `~/.config/turso/config.toml`
/// - macOS: `~/Library/Application Support/turso/config.toml`
/// - Windows: `%APPDATA%\turso\config.toml`
pub mod config;

/// Output formatting for table and JSON modes.
pub mod output;

/// Interactive terminal prompts.
pub mod interactive;

/// Utility functions and helpers.
pub mod util;

/// Re-export of the main CLI struct for convenient access.
///
/// # Example
///
/// ```rust,no_run
/// use clap::Parser;
/// use turso_cli::Cli;
///
/// let cli = Cli::parse();
/// ```
pub use cli::Cli;

/// Re-export of the configuration struct.
pub use config::Config;

/// Application name constant.
///
/// The name of the CLI binary, used for display purposes and configuration paths.
pub const APP_NAME: &str = "turso";

/// Application version constant, taken from Cargo.toml at compile time.
///
/// # Example
///
/// ```rust
/// use turso_cli::VERSION;
///
/// println!("turso version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Standardized exit codes following Unix conventions, allowing scripts
/// to programmatically detect the outcome of CLI operations.
///
/// # Example
///
/// ```rust,no_run
/// use turso_cli::exit_codes;
/// use std::process;
///
/// process::exit(exit_codes::AUTH_ERROR);
/// ```
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error.
    ///
    /// An unspecified error occurred during execution.
    /// Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments, including requests rejected by local validation.
    pub const USAGE: i32 = 2;

    /// Authentication required or failed.
    ///
    /// No API token is configured, or the API answered 401/403.
    /// Run `turso auth login` to authenticate.
    pub const AUTH_ERROR: i32 = 4;

    /// Resource not found.
    pub const NOT_FOUND: i32 = 8;

    /// Operation cancelled by user.
    pub const CANCELLED: i32 = 16;
}
