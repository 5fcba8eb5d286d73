//
//  turso-cli
//  api/tokens.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Database token API types and operations.
//!
//! A database token is a bearer credential scoped to one database. It carries
//! an expiration (`never` or a relative duration such as `12w`) and an
//! authorization level (`full-access` or `read-only`), and may additionally
//! grant read access to other databases through ATTACH.
//!
//! The expiration and authorization are sent both in the query string and in
//! the request body.

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use url::Url;

use super::client::{Segment, TursoClient};
use super::common::ApiError;
use super::validation::validate_database_token_request;

/// Authorization level granting read and write access.
pub const FULL_ACCESS: &str = "full-access";

/// Authorization level granting read access only.
pub const READ_ONLY: &str = "read-only";

/// Expiration value for tokens that never expire.
pub const DEFAULT_EXPIRATION: &str = "never";

/// Extra permissions attached to a database token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Permissions {
    /// Databases the token may read through ATTACH.
    pub read_attach: ReadAttach,
}

/// Databases readable through ATTACH.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadAttach {
    /// Names of the attachable databases.
    #[serde(rename = "database")]
    pub databases: Vec<String>,
}

/// Request for a new database token.
///
/// # Example
///
/// ```rust
/// use turso_cli::api::{CreateDatabaseTokenRequest, READ_ONLY};
///
/// let request = CreateDatabaseTokenRequest::new("my-db")
///     .expiration("12w")
///     .authorization(READ_ONLY)
///     .read_attach(vec!["shared".to_string()]);
/// assert_eq!(request.attach_permissions.read_attach.databases, vec!["shared"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateDatabaseTokenRequest {
    /// Database the token is scoped to.
    #[serde(rename = "DatabaseName")]
    pub database_name: String,

    /// `never` or a relative duration such as `1h30m` or `12w`.
    #[serde(rename = "Expiration")]
    pub expiration: String,

    /// `full-access` or `read-only`.
    #[serde(rename = "Authorization")]
    pub authorization: String,

    /// Additional ATTACH permissions.
    #[serde(rename = "permissions")]
    pub attach_permissions: Permissions,
}

impl CreateDatabaseTokenRequest {
    /// Creates a non-expiring, full-access token request for `database_name`.
    pub fn new(database_name: impl Into<String>) -> Self {
        Self {
            database_name: database_name.into(),
            expiration: DEFAULT_EXPIRATION.to_string(),
            authorization: FULL_ACCESS.to_string(),
            attach_permissions: Permissions::default(),
        }
    }

    /// Sets the expiration.
    pub fn expiration(mut self, expiration: impl Into<String>) -> Self {
        self.expiration = expiration.into();
        self
    }

    /// Sets the authorization level.
    pub fn authorization(mut self, authorization: impl Into<String>) -> Self {
        self.authorization = authorization.into();
        self
    }

    /// Grants read access to `databases` through ATTACH.
    pub fn read_attach(mut self, databases: Vec<String>) -> Self {
        self.attach_permissions.read_attach.databases = databases;
        self
    }
}

/// Response of the create-token endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateDatabaseTokenResponse {
    /// The signed token.
    pub jwt: String,
}

/// Database token operations.
#[async_trait]
pub trait DatabaseTokenService: Send + Sync {
    /// Creates a new token for a database.
    async fn create_database_token(
        &self,
        request: &CreateDatabaseTokenRequest,
    ) -> Result<CreateDatabaseTokenResponse, ApiError>;
}

impl TursoClient {
    fn database_tokens_url(&self, request: &CreateDatabaseTokenRequest) -> Result<Url, ApiError> {
        let mut url = self.organization_url(&[
            Segment::Route("databases"),
            Segment::Name("name", &request.database_name),
            Segment::Route("auth"),
            Segment::Route("tokens"),
        ])?;
        url.query_pairs_mut()
            .append_pair("expiration", &request.expiration)
            .append_pair("authorization", &request.authorization);

        Ok(url)
    }
}

#[async_trait]
impl DatabaseTokenService for TursoClient {
    async fn create_database_token(
        &self,
        request: &CreateDatabaseTokenRequest,
    ) -> Result<CreateDatabaseTokenResponse, ApiError> {
        if let Err(e) = validate_database_token_request(request) {
            tracing::debug!(error = %e, "rejected create database token request");
            return Err(e);
        }

        let url = self.database_tokens_url(request)?;

        self.execute(Method::POST, url.as_str(), Some(request), "database token", "creating")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{MockDatabaseTokenService, MockTransport};
    use reqwest::StatusCode;

    const TOKEN_BODY: &str = r#"{"jwt": "areallylongstringjwtgoeshere"}"#;

    #[tokio::test]
    async fn test_create_database_token() {
        let transport = MockTransport::with_response(StatusCode::OK, TOKEN_BODY);
        let client = transport.client().unwrap();

        let request = CreateDatabaseTokenRequest::new("my-db")
            .expiration("1h30m")
            .authorization(FULL_ACCESS);
        let response = client.create_database_token(&request).await.unwrap();
        assert_eq!(response.jwt, "areallylongstringjwtgoeshere");

        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::POST);
        assert_eq!(
            sent.url,
            "http://localhost/v1/organizations/acme/databases/my-db/auth/tokens?expiration=1h30m&authorization=full-access"
        );

        let body: serde_json::Value = serde_json::from_slice(sent.body.as_ref().unwrap()).unwrap();
        assert_eq!(body["Expiration"], "1h30m");
        assert_eq!(body["Authorization"], "full-access");
        assert_eq!(body["DatabaseName"], "my-db");
        assert_eq!(body["permissions"]["read_attach"]["database"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_create_database_token_read_attach() {
        let transport = MockTransport::with_response(StatusCode::OK, TOKEN_BODY);
        let client = transport.client().unwrap();

        let request = CreateDatabaseTokenRequest::new("my-db")
            .authorization(READ_ONLY)
            .read_attach(vec!["shared".to_string()]);
        client.create_database_token(&request).await.unwrap();

        let sent = &transport.requests()[0];
        assert!(sent.url.ends_with("?expiration=never&authorization=read-only"));
        let body: serde_json::Value = serde_json::from_slice(sent.body.as_ref().unwrap()).unwrap();
        assert_eq!(body["permissions"]["read_attach"]["database"], serde_json::json!(["shared"]));
    }

    #[tokio::test]
    async fn test_create_database_token_validation_skips_network() {
        let transport = MockTransport::with_response(StatusCode::OK, TOKEN_BODY);
        let client = transport.client().unwrap();

        let request = CreateDatabaseTokenRequest::new("my-db").expiration("");
        let err = client.create_database_token(&request).await.unwrap_err();
        assert!(matches!(err, ApiError::ExpirationInvalid));

        let request = CreateDatabaseTokenRequest::new("my-db")
            .expiration("1h30m")
            .authorization("invalid");
        let err = client.create_database_token(&request).await.unwrap_err();
        assert!(matches!(err, ApiError::AuthorizationInvalid));

        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_create_database_token_error_status() {
        let transport = MockTransport::with_response(StatusCode::BAD_REQUEST, TOKEN_BODY);
        let client = transport.client().unwrap();

        let err = client
            .create_database_token(&CreateDatabaseTokenRequest::new("my-db"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "error creating database token: 400");
    }

    #[tokio::test]
    async fn test_mock_database_token_service() {
        let service = MockDatabaseTokenService::default();
        let response = service
            .create_database_token(&CreateDatabaseTokenRequest::new("my-db"))
            .await
            .unwrap();
        assert_eq!(response.jwt, "jwt-token");
    }
}
