//
//  turso-cli
//  api/databases.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Database API types and operations.
//!
//! Databases live inside a group and are replicated to every location of that
//! group. A database may be flagged as a schema database, in which case it
//! controls the schema of the child databases that reference it.
//!
//! # Hostname casing
//!
//! The API reports the hostname as `Hostname` in some payloads and as
//! `hostname` in others, occasionally both at once. Both spellings are kept
//! and [`Database::host`] returns whichever is present.

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use url::Url;

use super::client::{Segment, TursoClient, NO_BODY};
use super::common::{null_as_default, ApiError};
use super::validation::validate_database_create_request;

/// Represents a Turso database.
///
/// # Example
///
/// ```rust
/// use turso_cli::api::Database;
///
/// let json = r#"{"Name": "my-db", "DbId": "0eb7", "hostname": "my-db-acme.turso.io"}"#;
/// let db: Database = serde_json::from_str(json).unwrap();
/// assert_eq!(db.host(), Some("my-db-acme.turso.io"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Database {
    /// Name of the database.
    #[serde(rename = "Name")]
    pub name: String,

    /// Unique identifier of the database.
    #[serde(rename = "DbId")]
    pub id: String,

    /// Hostname, capitalised spelling.
    #[serde(rename = "Hostname", skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    /// Hostname, lowercase spelling.
    #[serde(rename = "hostname", skip_serializing_if = "Option::is_none")]
    pub hostname_lowercase: Option<String>,

    /// Whether this database controls the schema of child databases.
    pub is_schema: bool,

    /// Name of the parent schema database, if any.
    pub schema: Option<String>,

    /// Whether reads are blocked.
    pub block_reads: bool,

    /// Whether writes are blocked.
    pub block_writes: bool,

    /// Whether other databases may ATTACH this one.
    pub allow_attach: bool,

    /// Regions the database is available in.
    #[serde(deserialize_with = "null_as_default")]
    pub regions: Vec<String>,

    /// Primary region of the database.
    #[serde(rename = "primaryRegion")]
    pub primary_region: String,

    /// Database type.
    #[serde(rename = "type")]
    pub kind: String,

    /// libSQL version used by the database.
    pub version: String,

    /// Group the database belongs to.
    pub group: String,

    /// Whether the database is sleeping.
    pub sleeping: bool,
}

impl Database {
    /// Returns the hostname under either spelling, preferring `Hostname`.
    pub fn host(&self) -> Option<&str> {
        self.hostname
            .as_deref()
            .or(self.hostname_lowercase.as_deref())
    }
}

/// Database summary returned by the create endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatedDatabase {
    /// Unique identifier of the database.
    #[serde(rename = "DbId")]
    pub id: String,

    /// Name of the database.
    #[serde(rename = "Name")]
    pub name: String,

    /// Hostname, capitalised spelling.
    #[serde(rename = "Hostname", skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    /// Hostname, lowercase spelling.
    #[serde(rename = "hostname", skip_serializing_if = "Option::is_none")]
    pub hostname_lowercase: Option<String>,

    /// Number of certificates issued.
    #[serde(rename = "IssuedCertCount")]
    pub issued_cert_count: i64,

    /// Maximum number of certificates that can be issued.
    #[serde(rename = "IssuedCertLimit")]
    pub issued_cert_limit: i64,
}

impl CreatedDatabase {
    /// Returns the hostname under either spelling, preferring `Hostname`.
    pub fn host(&self) -> Option<&str> {
        self.hostname
            .as_deref()
            .or(self.hostname_lowercase.as_deref())
    }
}

/// Response of the list-databases endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListDatabasesResponse {
    /// Databases in the organization.
    #[serde(deserialize_with = "null_as_default")]
    pub databases: Vec<Database>,
}

/// Response of the get-database endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetDatabaseResponse {
    /// The requested database.
    pub database: Database,
}

/// Response of the create-database endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateDatabaseResponse {
    /// The created database.
    pub database: CreatedDatabase,
}

/// Response of the delete-database endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteDatabaseResponse {
    /// Name of the deleted database.
    pub database: String,
}

/// Request body for creating a database.
///
/// The name must contain only lowercase letters, numbers and dashes, and be
/// no longer than 32 characters.
///
/// # Example
///
/// ```rust
/// use turso_cli::api::CreateDatabaseRequest;
///
/// let request = CreateDatabaseRequest::new("my-db").group("default");
/// assert_eq!(
///     serde_json::to_string(&request).unwrap(),
///     r#"{"group":"default","is_schema":false,"name":"my-db"}"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateDatabaseRequest {
    /// Group the database is created in.
    pub group: String,

    /// Create the database as a schema database.
    pub is_schema: bool,

    /// Name of the database.
    pub name: String,
}

impl CreateDatabaseRequest {
    /// Creates a request for a database called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the group the database is created in.
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Marks the database as a schema database.
    pub fn schema(mut self, is_schema: bool) -> Self {
        self.is_schema = is_schema;
        self
    }
}

/// Database operations.
#[async_trait]
pub trait DatabaseService: Send + Sync {
    /// Lists all databases in the organization.
    async fn list_databases(&self) -> Result<ListDatabasesResponse, ApiError>;

    /// Creates a new database.
    async fn create_database(
        &self,
        request: &CreateDatabaseRequest,
    ) -> Result<CreateDatabaseResponse, ApiError>;

    /// Gets a database by name.
    async fn get_database(&self, db_name: &str) -> Result<GetDatabaseResponse, ApiError>;

    /// Deletes a database by name.
    async fn delete_database(&self, db_name: &str) -> Result<DeleteDatabaseResponse, ApiError>;
}

impl TursoClient {
    fn databases_url(&self) -> Result<Url, ApiError> {
        self.organization_url(&[Segment::Route("databases")])
    }

    fn database_url(&self, db_name: &str) -> Result<Url, ApiError> {
        self.organization_url(&[Segment::Route("databases"), Segment::Name("name", db_name)])
    }
}

#[async_trait]
impl DatabaseService for TursoClient {
    async fn list_databases(&self) -> Result<ListDatabasesResponse, ApiError> {
        let url = self.databases_url()?;

        self.execute(Method::GET, url.as_str(), NO_BODY, "databases", "listing")
            .await
    }

    async fn create_database(
        &self,
        request: &CreateDatabaseRequest,
    ) -> Result<CreateDatabaseResponse, ApiError> {
        if let Err(e) = validate_database_create_request(request) {
            tracing::debug!(name = %request.name, "rejected create database request");
            return Err(e);
        }

        let url = self.databases_url()?;

        self.execute(Method::POST, url.as_str(), Some(request), "database", "creating")
            .await
    }

    async fn get_database(&self, db_name: &str) -> Result<GetDatabaseResponse, ApiError> {
        let url = self.database_url(db_name)?;

        self.execute(Method::GET, url.as_str(), NO_BODY, "database", "getting")
            .await
    }

    async fn delete_database(&self, db_name: &str) -> Result<DeleteDatabaseResponse, ApiError> {
        let url = self.database_url(db_name)?;

        self.execute(Method::DELETE, url.as_str(), NO_BODY, "database", "deleting")
            .await
    }
}
