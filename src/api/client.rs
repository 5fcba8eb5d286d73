//
//  turso-cli
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for the Turso Platform API
//!
//! This module provides [`TursoClient`], the authenticated entry point for
//! every resource operation, and the request executor shared by all of them.
//!
//! ## Features
//!
//! - Bearer token authentication on every request
//! - JSON serialization of request bodies
//! - Pluggable transport ([`HttpTransport`]) for tests and custom HTTP stacks
//! - Uniform decode-then-status-check handling of responses

use std::fmt;
use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use super::common::ApiError;
use super::transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};

/// Production endpoint of the Turso platform API.
pub const DEFAULT_BASE_URL: &str = "https://api.turso.tech";

/// Placeholder body for operations that send none.
pub(crate) const NO_BODY: Option<&()> = None;

/// Settings consumed by [`TursoClient`].
///
/// # Fields
///
/// * `token` - API token sent as a bearer credential (required)
/// * `base_url` - API root, defaults to [`DEFAULT_BASE_URL`]
/// * `org_name` - Organization slug used by every organization-scoped call
///
/// # Example
///
/// ```rust
/// use turso_cli::api::{ClientConfig, DEFAULT_BASE_URL};
///
/// let config = ClientConfig::new("my-token", "acme");
/// assert_eq!(config.base_url, DEFAULT_BASE_URL);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Token used to authenticate with the API.
    pub token: String,

    /// Base URL of the API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Organization to operate on.
    #[serde(default)]
    pub org_name: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            base_url: default_base_url(),
            org_name: String::new(),
        }
    }
}

impl ClientConfig {
    /// Creates a configuration for the production endpoint.
    pub fn new(token: impl Into<String>, org_name: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            org_name: org_name.into(),
            ..Default::default()
        }
    }

    /// Overrides the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// One path segment of an organization-scoped endpoint.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Segment<'a> {
    /// Fixed part of the route, such as `databases`.
    Route(&'static str),
    /// Caller-supplied name, checked and reported under the given field.
    Name(&'static str, &'a str),
}

impl Segment<'_> {
    fn as_str(&self) -> &str {
        match self {
            Segment::Route(route) => route,
            Segment::Name(_, value) => value,
        }
    }
}

/// Rejects names that would not address a single resource.
fn check_segment(field: &str, value: &str) -> Result<(), ApiError> {
    match value {
        "" => Err(ApiError::missing_field(field)),
        "." | ".." => Err(ApiError::invalid_field(field, "must not be \".\" or \"..\"")),
        _ => Ok(()),
    }
}

/// Authenticated client for the Turso platform API.
///
/// The client holds only static configuration and a shared transport, so it is
/// cheap to clone and safe to use from many tasks at once. Resource operations
/// are provided through the capability traits
/// [`OrganizationService`](super::OrganizationService),
/// [`GroupService`](super::GroupService),
/// [`DatabaseService`](super::DatabaseService) and
/// [`DatabaseTokenService`](super::DatabaseTokenService).
///
/// # Example
///
/// ```rust,no_run
/// use turso_cli::api::{ClientConfig, DatabaseService, TursoClient};
///
/// # async fn example() -> Result<(), turso_cli::api::ApiError> {
/// let client = TursoClient::new(ClientConfig::new("my-token", "acme"))?;
/// let response = client.list_databases().await?;
/// for db in response.databases {
///     println!("{}", db.name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TursoClient {
    /// API root without a trailing slash
    base_url: String,
    /// Organization slug
    org_name: String,
    /// Pre-built `Bearer <token>` header, marked sensitive
    auth_header: HeaderValue,
    /// Transport used to dispatch requests
    transport: Arc<dyn HttpTransport>,
    /// Apply the location format check to add/remove-location requests
    strict_locations: bool,
}

impl fmt::Debug for TursoClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TursoClient")
            .field("base_url", &self.base_url)
            .field("org_name", &self.org_name)
            .field("strict_locations", &self.strict_locations)
            .finish_non_exhaustive()
    }
}

impl TursoClient {
    /// Creates a client backed by the default [`ReqwestTransport`].
    ///
    /// # Errors
    ///
    /// - [`ApiError::ApiTokenNotSet`] if `config.token` is empty
    /// - [`ApiError::InvalidBaseUrl`] if `config.base_url` does not parse
    /// - [`ApiError::Network`] if the HTTP client cannot be initialised
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        if config.token.is_empty() {
            return Err(ApiError::ApiTokenNotSet);
        }

        let transport = ReqwestTransport::new()?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Creates a client that dispatches every request through `transport`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::ApiTokenNotSet`] if `config.token` is empty
    /// - [`ApiError::InvalidApiToken`] if the token cannot be sent in a header
    /// - [`ApiError::InvalidBaseUrl`] if `config.base_url` does not parse
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, ApiError> {
        if config.token.is_empty() {
            return Err(ApiError::ApiTokenNotSet);
        }

        let base_url = match config.base_url.trim_end_matches('/') {
            "" => DEFAULT_BASE_URL.to_string(),
            url => url.to_string(),
        };
        Url::parse(&base_url)?;

        let mut auth_header = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| ApiError::InvalidApiToken)?;
        auth_header.set_sensitive(true);

        Ok(Self {
            base_url,
            org_name: config.org_name,
            auth_header,
            transport,
            strict_locations: false,
        })
    }

    /// Also reject add/remove-location requests whose location is not a
    /// three character region code.
    ///
    /// Off by default: group creation checks the location format, location
    /// changes only check presence.
    pub fn with_strict_locations(mut self, enabled: bool) -> Self {
        self.strict_locations = enabled;
        self
    }

    /// Returns the API root this client targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the organization slug used by organization-scoped calls.
    pub fn org_name(&self) -> &str {
        &self.org_name
    }

    /// Returns `true` if location changes are format checked.
    pub fn strict_locations(&self) -> bool {
        self.strict_locations
    }

    /// Returns `<base>/v1/organizations/<org>/<segments...>`.
    ///
    /// Every segment is percent-encoded as a single path segment, so a name
    /// containing `/`, `?` or `#` cannot reach another endpoint.
    ///
    /// # Errors
    ///
    /// - [`ApiError::MissingRequiredField`] for `organization` when no
    ///   organization was configured, or for a named segment that is empty
    /// - [`ApiError::InvalidField`] for a named segment that is `.` or `..`
    pub(crate) fn organization_url(&self, segments: &[Segment<'_>]) -> Result<Url, ApiError> {
        check_segment("organization", &self.org_name)?;
        for segment in segments {
            if let Segment::Name(field, value) = segment {
                check_segment(field, value)?;
            }
        }

        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidBaseUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(["v1", "organizations", self.org_name.as_str()])
            .extend(segments.iter().map(Segment::as_str));

        Ok(url)
    }

    /// Performs one authenticated request and returns the raw response.
    ///
    /// The body, when present, is serialized as JSON. Every request carries
    /// `Authorization: Bearer <token>` and `Content-Type: application/json`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Encode`] if the body cannot be serialized
    /// - [`ApiError::Network`] if the transport fails
    pub async fn do_request<B>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<HttpResponse, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(ApiError::Encode)?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.auth_header.clone());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        tracing::debug!(%method, url, "sending request");

        let response = self
            .transport
            .send(HttpRequest {
                method,
                url: url.to_string(),
                headers,
                body,
            })
            .await?;

        tracing::debug!(status = response.status.as_u16(), url, "received response");

        Ok(response)
    }

    /// Runs the shared operation protocol: request, decode, then status check.
    ///
    /// The body is decoded before the status is inspected, so an error
    /// response whose body is not valid JSON surfaces as [`ApiError::Decode`].
    /// A non-success status discards the decoded value and yields
    /// [`ApiError::RequestFailed`].
    pub(crate) async fn execute<T, B>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
        subject: &'static str,
        action: &'static str,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.do_request(method, url, body).await?;
        let out: T = serde_json::from_slice(&response.body).map_err(ApiError::Decode)?;

        if !response.status.is_success() {
            tracing::debug!(
                subject,
                action,
                status = response.status.as_u16(),
                "request rejected by the API"
            );
            return Err(ApiError::request_failed(subject, action, response.status));
        }

        Ok(out)
    }
}
