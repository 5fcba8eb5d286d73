//
//  turso-cli
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides a typed client for the Turso platform API at
//! `api.turso.tech`.
//!
//! ## Architecture
//!
//! - [`client`]: Authenticated client and the shared request executor
//! - [`transport`]: Injectable HTTP transport and the reqwest implementation
//! - [`validation`]: Client-side checks run before any request is sent
//! - [`organizations`], [`groups`], [`databases`], [`tokens`]: Resource types
//!   and the capability traits implemented by [`TursoClient`]
//! - [`mock`]: Test doubles for the transport and every capability trait
//! - [`common`]: The [`ApiError`] taxonomy
//!
//! ## Usage
//!
//! ```rust,no_run
//! use turso_cli::api::{ClientConfig, CreateDatabaseRequest, DatabaseService, TursoClient};
//!
//! # async fn example() -> Result<(), turso_cli::api::ApiError> {
//! let client = TursoClient::new(ClientConfig::new("your-token", "acme"))?;
//!
//! let request = CreateDatabaseRequest::new("my-db").group("default");
//! let response = client.create_database(&request).await?;
//! println!("created {}", response.database.name);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`ApiError`]:
//!
//! - Validation variants: the request was rejected locally, nothing was sent
//! - `RequestFailed`: the API answered with a non-success status
//! - `Network`: the transport failed
//! - `Decode`: the response body was not the expected JSON

/// Authenticated client and request executor.
pub mod client;

/// Error types shared by every operation.
pub mod common;

/// Database types and operations.
pub mod databases;

/// Group types and operations.
pub mod groups;

/// Test doubles.
pub mod mock;

/// Organization types and operations.
pub mod organizations;

/// Database token types and operations.
pub mod tokens;

/// HTTP transport abstraction.
pub mod transport;

/// Client-side request validation.
pub mod validation;

pub use client::{ClientConfig, TursoClient, DEFAULT_BASE_URL};
pub use common::ApiError;
pub use databases::{
    CreateDatabaseRequest, CreateDatabaseResponse, CreatedDatabase, Database, DatabaseService,
    DeleteDatabaseResponse, GetDatabaseResponse, ListDatabasesResponse,
};
pub use groups::{
    CreateGroupRequest, CreateGroupResponse, DeleteGroupResponse, GetGroupResponse, Group,
    GroupLocationRequest, GroupLocationResponse, GroupService, ListGroupsResponse,
};
pub use organizations::{Organization, OrganizationService};
pub use tokens::{
    CreateDatabaseTokenRequest, CreateDatabaseTokenResponse, DatabaseTokenService, Permissions,
    ReadAttach, DEFAULT_EXPIRATION, FULL_ACCESS, READ_ONLY,
};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError};
