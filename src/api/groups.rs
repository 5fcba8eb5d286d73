//
//  turso-cli
//  api/groups.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Group API types and operations.
//!
//! A group is a regional deployment cluster that databases belong to. It has a
//! primary location and any number of replica locations, each identified by a
//! three letter region code (e.g. `lhr`, `ams`, `bos`).
//!
//! # Endpoints
//!
//! ```text
//! GET    /v1/organizations/{org}/groups
//! POST   /v1/organizations/{org}/groups
//! GET    /v1/organizations/{org}/groups/{name}
//! DELETE /v1/organizations/{org}/groups/{name}
//! POST   /v1/organizations/{org}/groups/{name}/locations/{location}
//! DELETE /v1/organizations/{org}/groups/{name}/locations/{location}
//! ```

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use url::Url;

use super::client::{Segment, TursoClient, NO_BODY};
use super::common::{null_as_default, ApiError};
use super::validation::{validate_group_create_request, validate_location, validate_location_request};

/// Represents a Turso group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Group {
    /// Whether the group has been archived after a period of inactivity.
    pub archived: bool,

    /// Every location the group is deployed to, primary included.
    #[serde(deserialize_with = "null_as_default")]
    pub locations: Vec<String>,

    /// Name of the group.
    pub name: String,

    /// Primary location.
    pub primary: String,

    /// Unique identifier of the group.
    pub uuid: String,

    /// libSQL server version the group runs.
    pub version: String,
}

/// Response of the list-groups endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListGroupsResponse {
    /// Groups in the organization.
    #[serde(deserialize_with = "null_as_default")]
    pub groups: Vec<Group>,
}

/// Response of the get-group endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetGroupResponse {
    /// The requested group.
    pub group: Group,
}

/// Response of the create-group endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateGroupResponse {
    /// The created group.
    pub group: Group,
}

/// Response of the delete-group endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteGroupResponse {
    /// The deleted group.
    pub group: Group,
}

/// Response of the add/remove-location endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupLocationResponse {
    /// The group after the change.
    pub group: Group,
}

/// Request body for creating a group.
///
/// # Fields
///
/// * `extensions` - SQLite extensions to enable (`all` or empty)
/// * `location` - Primary location, a three letter region code
/// * `name` - Group name, must not contain spaces
///
/// # Example
///
/// ```rust
/// use turso_cli::api::CreateGroupRequest;
///
/// let request = CreateGroupRequest::new("default", "lhr");
/// assert_eq!(request.extensions, "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateGroupRequest {
    /// SQLite extensions to enable.
    pub extensions: String,

    /// Primary location of the group.
    pub location: String,

    /// Name of the group.
    pub name: String,
}

impl CreateGroupRequest {
    /// Creates a request for `name` in `location` with no extensions.
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            ..Default::default()
        }
    }

    /// Sets the extensions to enable.
    pub fn extensions(mut self, extensions: impl Into<String>) -> Self {
        self.extensions = extensions.into();
        self
    }
}

/// Identifies a location to add to or remove from a group.
///
/// Both values are sent in the URL path; there is no request body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupLocationRequest {
    /// Name of the group.
    pub group_name: String,

    /// Location code.
    pub location: String,
}

impl GroupLocationRequest {
    /// Creates a request for `location` on `group_name`.
    pub fn new(group_name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            group_name: group_name.into(),
            location: location.into(),
        }
    }
}

/// Group operations.
#[async_trait]
pub trait GroupService: Send + Sync {
    /// Lists all groups in the organization.
    async fn list_groups(&self) -> Result<ListGroupsResponse, ApiError>;

    /// Creates a new group in the organization.
    async fn create_group(&self, request: &CreateGroupRequest) -> Result<CreateGroupResponse, ApiError>;

    /// Gets a group by name.
    async fn get_group(&self, group_name: &str) -> Result<GetGroupResponse, ApiError>;

    /// Deletes a group by name.
    async fn delete_group(&self, group_name: &str) -> Result<DeleteGroupResponse, ApiError>;

    /// Adds a location to a group.
    async fn add_location(&self, request: &GroupLocationRequest) -> Result<GroupLocationResponse, ApiError>;

    /// Removes a location from a group.
    async fn remove_location(
        &self,
        request: &GroupLocationRequest,
    ) -> Result<GroupLocationResponse, ApiError>;
}

impl TursoClient {
    fn groups_url(&self) -> Result<Url, ApiError> {
        self.organization_url(&[Segment::Route("groups")])
    }

    fn group_url(&self, group_name: &str) -> Result<Url, ApiError> {
        self.organization_url(&[Segment::Route("groups"), Segment::Name("name", group_name)])
    }

    fn group_location_url(&self, request: &GroupLocationRequest) -> Result<Url, ApiError> {
        self.organization_url(&[
            Segment::Route("groups"),
            Segment::Name("name", &request.group_name),
            Segment::Route("locations"),
            Segment::Name("location", &request.location),
        ])
    }

    fn check_location_request(&self, request: &GroupLocationRequest) -> Result<(), ApiError> {
        validate_location_request(request)?;

        if self.strict_locations() {
            validate_location(&request.location)?;
        }

        Ok(())
    }
}

#[async_trait]
impl GroupService for TursoClient {
    async fn list_groups(&self) -> Result<ListGroupsResponse, ApiError> {
        let url = self.groups_url()?;

        self.execute(Method::GET, url.as_str(), NO_BODY, "groups", "listing")
            .await
    }

    async fn create_group(&self, request: &CreateGroupRequest) -> Result<CreateGroupResponse, ApiError> {
        if let Err(e) = validate_group_create_request(request) {
            tracing::debug!(error = %e, "rejected create group request");
            return Err(e);
        }

        let url = self.groups_url()?;

        self.execute(Method::POST, url.as_str(), Some(request), "group", "creating")
            .await
    }

    async fn get_group(&self, group_name: &str) -> Result<GetGroupResponse, ApiError> {
        let url = self.group_url(group_name)?;

        self.execute(Method::GET, url.as_str(), NO_BODY, "group", "getting")
            .await
    }

    async fn delete_group(&self, group_name: &str) -> Result<DeleteGroupResponse, ApiError> {
        let url = self.group_url(group_name)?;

        self.execute(Method::DELETE, url.as_str(), NO_BODY, "group", "deleting")
            .await
    }

    async fn add_location(&self, request: &GroupLocationRequest) -> Result<GroupLocationResponse, ApiError> {
        self.check_location_request(request)?;
        let url = self.group_location_url(request)?;

        self.execute(Method::POST, url.as_str(), NO_BODY, "group", "adding location to")
            .await
    }

    async fn remove_location(
        &self,
        request: &GroupLocationRequest,
    ) -> Result<GroupLocationResponse, ApiError> {
        self.check_location_request(request)?;
        let url = self.group_location_url(request)?;

        self.execute(Method::DELETE, url.as_str(), NO_BODY, "group", "removing location from")
            .await
    }
}
