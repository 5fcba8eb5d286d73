//
//  turso-cli
//  api/mock.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Test Doubles
//!
//! Two kinds of doubles are provided so code built on this crate can be tested
//! without reaching the real API:
//!
//! - [`MockTransport`] sits below [`TursoClient`]. It records every request and
//!   replays queued responses, so the real request building, validation and
//!   decoding are exercised.
//! - `Mock*Service` types implement the resource traits directly and return
//!   canned values, for code that only depends on a trait.
//!
//! ## Example
//!
//! ```rust
//! use reqwest::StatusCode;
//! use turso_cli::api::mock::MockTransport;
//! use turso_cli::api::{CreateDatabaseRequest, DatabaseService};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let transport = MockTransport::with_response(
//!     StatusCode::OK,
//!     r#"{"database": {"Name": "my-db", "DbId": "1"}}"#,
//! );
//! let client = transport.client().unwrap();
//!
//! let response = client.create_database(&CreateDatabaseRequest::new("my-db")).await.unwrap();
//! assert_eq!(response.database.name, "my-db");
//! assert_eq!(transport.call_count(), 1);
//! # });
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use reqwest::StatusCode;

use super::client::{ClientConfig, TursoClient};
use super::common::ApiError;
use super::databases::{
    CreateDatabaseRequest, CreateDatabaseResponse, CreatedDatabase, Database, DatabaseService,
    DeleteDatabaseResponse, GetDatabaseResponse, ListDatabasesResponse,
};
use super::groups::{
    CreateGroupRequest, CreateGroupResponse, DeleteGroupResponse, GetGroupResponse, Group,
    GroupLocationRequest, GroupLocationResponse, GroupService, ListGroupsResponse,
};
use super::organizations::{Organization, OrganizationService};
use super::tokens::{CreateDatabaseTokenRequest, CreateDatabaseTokenResponse, DatabaseTokenService};
use super::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};

#[derive(Debug, Default)]
struct MockState {
    responses: VecDeque<Result<HttpResponse, String>>,
    requests: Vec<HttpRequest>,
}

/// Recording transport that replays queued responses in order.
///
/// Cloning shares the queue and the request log, so a test can hand one clone
/// to the client and inspect the other afterwards.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// Token used by [`MockTransport::client`].
    pub const TOKEN: &'static str = "test-token";

    /// Base URL used by [`MockTransport::client`].
    pub const BASE_URL: &'static str = "http://localhost";

    /// Organization used by [`MockTransport::client`].
    pub const ORG_NAME: &'static str = "acme";

    /// Creates a transport with an empty response queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport with a single queued response.
    pub fn with_response(status: StatusCode, body: &str) -> Self {
        let transport = Self::new();
        transport.push_response(status, body);
        transport
    }

    /// Queues a response.
    pub fn push_response(&self, status: StatusCode, body: &str) {
        self.lock()
            .responses
            .push_back(Ok(HttpResponse::new(status, body.as_bytes())));
    }

    /// Queues a transport failure.
    pub fn push_error(&self, message: &str) {
        self.lock().responses.push_back(Err(message.to_string()));
    }

    /// Returns every request received so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.lock().requests.clone()
    }

    /// Returns the number of requests received so far.
    pub fn call_count(&self) -> usize {
        self.lock().requests.len()
    }

    /// Builds a client for the `acme` organization that sends through this transport.
    pub fn client(&self) -> Result<TursoClient, ApiError> {
        self.client_for_org(Self::ORG_NAME)
    }

    /// Builds a client for `org_name` that sends through this transport.
    pub fn client_for_org(&self, org_name: &str) -> Result<TursoClient, ApiError> {
        let config = ClientConfig::new(Self::TOKEN, org_name).with_base_url(Self::BASE_URL);
        TursoClient::with_transport(config, Arc::new(self.clone()))
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut state = self.lock();
        state.requests.push(request);

        match state.responses.pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(TransportError::Other(message)),
            None => Err(TransportError::Other("no mock response queued".to_string())),
        }
    }
}

fn sample_group(name: &str, archived: bool) -> Group {
    Group {
        archived,
        locations: vec!["lhr".to_string(), "ams".to_string(), "bos".to_string()],
        name: name.to_string(),
        primary: "lhr".to_string(),
        uuid: "0a28102d-6906-11ee-8553-eaa7715aeaf2".to_string(),
        version: "v0.23.7".to_string(),
    }
}

fn sample_database() -> Database {
    Database {
        name: "my-db".to_string(),
        id: "0eb771dd-6906-11ee-8553-eaa7715aeaf2".to_string(),
        hostname: Some("[databaseName]-[organizationName].turso.io".to_string()),
        ..Default::default()
    }
}

/// Canned [`OrganizationService`].
#[derive(Debug, Clone)]
pub struct MockOrganizationService {
    /// Returned by `list_organizations`.
    pub list_organizations_response: Vec<Organization>,
    /// When set, every call fails with this status.
    pub failure: Option<StatusCode>,
}

impl Default for MockOrganizationService {
    fn default() -> Self {
        Self {
            list_organizations_response: vec![Organization {
                name: "meow".to_string(),
                slug: "meow".to_string(),
                ..Default::default()
            }],
            failure: None,
        }
    }
}

#[async_trait]
impl OrganizationService for MockOrganizationService {
    async fn list_organizations(&self) -> Result<Vec<Organization>, ApiError> {
        if let Some(status) = self.failure {
            return Err(ApiError::request_failed("organizations", "listing", status));
        }
        Ok(self.list_organizations_response.clone())
    }
}

/// Canned [`GroupService`].
#[derive(Debug, Clone)]
pub struct MockGroupService {
    /// Returned by `list_groups`.
    pub list_groups_response: ListGroupsResponse,
    /// Returned by `create_group`.
    pub create_group_response: CreateGroupResponse,
    /// Returned by `get_group`.
    pub get_group_response: GetGroupResponse,
    /// Returned by `delete_group`.
    pub delete_group_response: DeleteGroupResponse,
    /// Returned by `add_location` and `remove_location`.
    pub group_location_response: GroupLocationResponse,
    /// When set, every call fails with this status.
    pub failure: Option<StatusCode>,
}

impl MockGroupService {
    /// A service whose every call fails with `status`.
    pub fn failing(status: StatusCode) -> Self {
        Self {
            failure: Some(status),
            ..Default::default()
        }
    }

    fn check(&self, subject: &'static str, action: &'static str) -> Result<(), ApiError> {
        match self.failure {
            Some(status) => Err(ApiError::request_failed(subject, action, status)),
            None => Ok(()),
        }
    }
}

impl Default for MockGroupService {
    fn default() -> Self {
        Self {
            list_groups_response: ListGroupsResponse {
                groups: vec![sample_group("meow", false)],
            },
            create_group_response: CreateGroupResponse {
                group: sample_group("meow", false),
            },
            get_group_response: GetGroupResponse {
                group: sample_group("meow", false),
            },
            delete_group_response: DeleteGroupResponse {
                group: sample_group("woof", true),
            },
            group_location_response: GroupLocationResponse {
                group: sample_group("meow", false),
            },
            failure: None,
        }
    }
}

#[async_trait]
impl GroupService for MockGroupService {
    async fn list_groups(&self) -> Result<ListGroupsResponse, ApiError> {
        self.check("groups", "listing")?;
        Ok(self.list_groups_response.clone())
    }

    async fn create_group(&self, _request: &CreateGroupRequest) -> Result<CreateGroupResponse, ApiError> {
        self.check("group", "creating")?;
        Ok(self.create_group_response.clone())
    }

    async fn get_group(&self, _group_name: &str) -> Result<GetGroupResponse, ApiError> {
        self.check("group", "getting")?;
        Ok(self.get_group_response.clone())
    }

    async fn delete_group(&self, _group_name: &str) -> Result<DeleteGroupResponse, ApiError> {
        self.check("group", "deleting")?;
        Ok(self.delete_group_response.clone())
    }

    async fn add_location(&self, _request: &GroupLocationRequest) -> Result<GroupLocationResponse, ApiError> {
        self.check("group", "adding location to")?;
        Ok(self.group_location_response.clone())
    }

    async fn remove_location(
        &self,
        _request: &GroupLocationRequest,
    ) -> Result<GroupLocationResponse, ApiError> {
        self.check("group", "removing location from")?;
        Ok(self.group_location_response.clone())
    }
}

/// Canned [`DatabaseService`].
#[derive(Debug, Clone)]
pub struct MockDatabaseService {
    /// Returned by `list_databases`.
    pub list_databases_response: ListDatabasesResponse,
    /// Returned by `create_database`.
    pub create_database_response: CreateDatabaseResponse,
    /// Returned by `get_database`.
    pub get_database_response: GetDatabaseResponse,
    /// Returned by `delete_database`.
    pub delete_database_response: DeleteDatabaseResponse,
    /// When set, every call fails with this status.
    pub failure: Option<StatusCode>,
}

impl MockDatabaseService {
    /// A service whose every call fails with `status`.
    pub fn failing(status: StatusCode) -> Self {
        Self {
            failure: Some(status),
            ..Default::default()
        }
    }

    fn check(&self, subject: &'static str, action: &'static str) -> Result<(), ApiError> {
        match self.failure {
            Some(status) => Err(ApiError::request_failed(subject, action, status)),
            None => Ok(()),
        }
    }
}

impl Default for MockDatabaseService {
    fn default() -> Self {
        let database = sample_database();

        Self {
            list_databases_response: ListDatabasesResponse {
                databases: vec![database.clone()],
            },
            create_database_response: CreateDatabaseResponse {
                database: CreatedDatabase {
                    id: database.id.clone(),
                    name: database.name.clone(),
                    hostname: database.hostname.clone(),
                    ..Default::default()
                },
            },
            get_database_response: GetDatabaseResponse {
                database: database.clone(),
            },
            delete_database_response: DeleteDatabaseResponse {
                database: database.name,
            },
            failure: None,
        }
    }
}

#[async_trait]
impl DatabaseService for MockDatabaseService {
    async fn list_databases(&self) -> Result<ListDatabasesResponse, ApiError> {
        self.check("databases", "listing")?;
        Ok(self.list_databases_response.clone())
    }

    async fn create_database(
        &self,
        _request: &CreateDatabaseRequest,
    ) -> Result<CreateDatabaseResponse, ApiError> {
        self.check("database", "creating")?;
        Ok(self.create_database_response.clone())
    }

    async fn get_database(&self, _db_name: &str) -> Result<GetDatabaseResponse, ApiError> {
        self.check("database", "getting")?;
        Ok(self.get_database_response.clone())
    }

    async fn delete_database(&self, _db_name: &str) -> Result<DeleteDatabaseResponse, ApiError> {
        self.check("database", "deleting")?;
        Ok(self.delete_database_response.clone())
    }
}

/// Canned [`DatabaseTokenService`].
#[derive(Debug, Clone)]
pub struct MockDatabaseTokenService {
    /// Returned by `create_database_token`.
    pub create_database_token_response: CreateDatabaseTokenResponse,
    /// When set, every call fails with this status.
    pub failure: Option<StatusCode>,
}

impl Default for MockDatabaseTokenService {
    fn default() -> Self {
        Self {
            create_database_token_response: CreateDatabaseTokenResponse {
                jwt: "jwt-token".to_string(),
            },
            failure: None,
        }
    }
}

#[async_trait]
impl DatabaseTokenService for MockDatabaseTokenService {
    async fn create_database_token(
        &self,
        _request: &CreateDatabaseTokenRequest,
    ) -> Result<CreateDatabaseTokenResponse, ApiError> {
        if let Some(status) = self.failure {
            return Err(ApiError::request_failed("database token", "creating", status));
        }
        Ok(self.create_database_token_response.clone())
    }
}
