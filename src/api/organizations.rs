//
//  turso-cli
//  api/organizations.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Organization API types and operations.
//!
//! Organizations are the top-level account unit. Every group and database
//! belongs to exactly one organization, identified by its slug.

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::client::{TursoClient, NO_BODY};
use super::common::ApiError;

/// Represents a Turso organization.
///
/// # Example
///
/// ```rust
/// use turso_cli::api::Organization;
///
/// let json = r#"{"name": "acme", "slug": "acme", "type": "team", "overages": true}"#;
/// let org: Organization = serde_json::from_str(json).unwrap();
/// assert_eq!(org.kind, "team");
/// assert!(org.overages);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Organization {
    /// Display name of the organization.
    pub name: String,

    /// URL-safe identifier used in API paths.
    pub slug: String,

    /// Organization type (`personal` or `team`).
    #[serde(rename = "type")]
    pub kind: String,

    /// Identifier of the subscribed plan.
    pub plan_id: String,

    /// Whether usage beyond the plan quota is allowed.
    pub overages: bool,

    /// Whether reads are blocked for every database in the organization.
    pub blocked_reads: bool,

    /// Whether writes are blocked for every database in the organization.
    pub blocked_writes: bool,

    /// Billing timeline of the plan.
    pub plan_timeline: String,

    /// Memory allotment.
    pub memory: i64,
}

/// Organization operations.
#[async_trait]
pub trait OrganizationService: Send + Sync {
    /// Lists all organizations the authenticated user belongs to.
    async fn list_organizations(&self) -> Result<Vec<Organization>, ApiError>;
}

#[async_trait]
impl OrganizationService for TursoClient {
    async fn list_organizations(&self) -> Result<Vec<Organization>, ApiError> {
        let url = format!("{}/v1/organizations", self.base_url());

        self.execute(Method::GET, &url, NO_BODY, "organizations", "listing")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{MockOrganizationService, MockTransport};
    use reqwest::StatusCode;

    #[tokio::test]
    async fn test_list_organizations() {
        let body = r#"[{"name": "meow", "slug": "meow", "type": "personal", "plan_id": "starter", "memory": 0}]"#;
        let transport = MockTransport::with_response(StatusCode::OK, body);
        let client = transport.client().unwrap();

        let orgs = client.list_organizations().await.unwrap();
        assert_eq!(orgs.len(), 1);
        assert_eq!(orgs[0].slug, "meow");
        assert_eq!(orgs[0].plan_id, "starter");

        let request = &transport.requests()[0];
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.url, "http://localhost/v1/organizations");
    }

    #[tokio::test]
    async fn test_list_organizations_does_not_need_org_name() {
        let transport = MockTransport::with_response(StatusCode::OK, "[]");
        let client = transport.client_for_org("").unwrap();

        assert!(client.list_organizations().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_organizations_error_status() {
        let transport = MockTransport::with_response(StatusCode::UNAUTHORIZED, "[]");
        let client = transport.client().unwrap();

        let err = client.list_organizations().await.unwrap_err();
        assert_eq!(err.to_string(), "error listing organizations: 401");
    }

    #[tokio::test]
    async fn test_mock_organization_service() {
        let service = MockOrganizationService::default();
        let orgs = service.list_organizations().await.unwrap();
        assert_eq!(orgs[0].name, "meow");
    }
}
