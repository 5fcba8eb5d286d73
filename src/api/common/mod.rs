//
//  turso-cli
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the Turso Platform API
//!
//! This module provides the error taxonomy shared by every resource operation.
//! Errors fall into three groups:
//!
//! - **Local validation** - produced before any network call is attempted
//!   ([`ApiError::InvalidDatabaseName`], [`ApiError::ExpirationInvalid`],
//!   [`ApiError::AuthorizationInvalid`], [`ApiError::MissingRequiredField`],
//!   [`ApiError::InvalidField`])
//! - **Remote failure** - the service answered with a non-success status
//!   ([`ApiError::RequestFailed`])
//! - **Pass-through** - transport, encoding and decoding failures, surfaced
//!   unchanged ([`ApiError::Network`], [`ApiError::Encode`], [`ApiError::Decode`])
//!
//! # Example
//!
//! ```rust
//! use turso_cli::api::common::ApiError;
//!
//! fn describe(result: Result<(), ApiError>) -> String {
//!     match result {
//!         Ok(()) => "ok".to_string(),
//!         Err(ApiError::MissingRequiredField { field }) => format!("{field} is missing"),
//!         Err(ApiError::RequestFailed { status, .. }) => format!("remote said {status}"),
//!         Err(e) => e.to_string(),
//!     }
//! }
//!
//! assert_eq!(
//!     describe(Err(ApiError::MissingRequiredField { field: "name".to_string() })),
//!     "name is missing"
//! );
//! ```

use reqwest::StatusCode;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use super::transport::TransportError;

/// Unified error type for all Turso API operations.
///
/// Calling code is expected to distinguish kinds by matching on the variant,
/// not by inspecting the message text.
///
/// # Variants
///
/// | Variant | Trigger |
/// |---------|---------|
/// | `ApiTokenNotSet` | Client constructed without a credential |
/// | `InvalidApiToken` | Credential cannot be sent as an HTTP header |
/// | `InvalidBaseUrl` | Base URL does not parse |
/// | `InvalidDatabaseName` | Database name fails the pattern or length check |
/// | `ExpirationInvalid` | Token expiration empty or unparseable |
/// | `AuthorizationInvalid` | Token authorization not `full-access`/`read-only` |
/// | `MissingRequiredField` | A required string field is empty |
/// | `InvalidField` | A field fails a shape constraint |
/// | `RequestFailed` | The service returned a non-success status |
/// | `Network` | Transport-level failure |
/// | `Encode` | Request body could not be serialized |
/// | `Decode` | Response body could not be decoded |
#[derive(Error, Debug)]
pub enum ApiError {
    /// No API token was supplied when building the client.
    #[error("api token not set, but required")]
    ApiTokenNotSet,

    /// The API token contains characters that cannot appear in a header.
    #[error("api token contains characters that are not allowed in an HTTP header")]
    InvalidApiToken,

    /// The configured base URL is not a valid absolute URL.
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// The database name does not match `^[a-z0-9-]+$` or is longer than 32 characters.
    #[error("invalid database name, can only contain lowercase letters, numbers, dashes with a maximum of 32 characters")]
    InvalidDatabaseName,

    /// The token expiration is empty, or neither `never` nor a relative duration.
    #[error("expiration invalid, must be a valid duration (e.g. 12w) or never")]
    ExpirationInvalid,

    /// The token authorization is not one of the two supported levels.
    #[error("authorization invalid, valid options are full-access or read-only")]
    AuthorizationInvalid,

    /// A required field was not provided in a request.
    ///
    /// # Parameters
    ///
    /// - `field` - Name of the missing field
    #[error("{field} is required")]
    MissingRequiredField {
        /// Name of the missing field.
        field: String,
    },

    /// A field was provided but does not meet the required criteria.
    ///
    /// # Parameters
    ///
    /// - `field` - Name of the offending field
    /// - `message` - Human readable description of the constraint
    #[error("{field} is invalid, {message}")]
    InvalidField {
        /// Name of the offending field.
        field: String,
        /// Description of the violated constraint.
        message: String,
    },

    /// The remote call returned a non-success status.
    ///
    /// The decoded response body is discarded on this path.
    ///
    /// # Parameters
    ///
    /// - `subject` - The resource acted upon (e.g. `database`, `groups`)
    /// - `action` - The attempted action (e.g. `creating`, `listing`)
    /// - `status` - The HTTP status returned by the service
    #[error("error {action} {subject}: {}", .status.as_u16())]
    RequestFailed {
        /// The resource acted upon.
        subject: &'static str,
        /// The attempted action.
        action: &'static str,
        /// The HTTP status returned by the service.
        status: StatusCode,
    },

    /// A transport-level error occurred while sending the request.
    #[error("network error: {0}")]
    Network(#[from] TransportError),

    /// The request body could not be serialized to JSON.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The response body could not be decoded into the expected shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ApiError {
    /// Builds a [`ApiError::MissingRequiredField`] for `field`.
    pub fn missing_field(field: &str) -> Self {
        Self::MissingRequiredField {
            field: field.to_string(),
        }
    }

    /// Builds a [`ApiError::InvalidField`] for `field` with a human readable message.
    pub fn invalid_field(field: &str, message: &str) -> Self {
        Self::InvalidField {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    /// Builds a [`ApiError::RequestFailed`] for a non-success response.
    pub fn request_failed(subject: &'static str, action: &'static str, status: StatusCode) -> Self {
        Self::RequestFailed {
            subject,
            action,
            status,
        }
    }

    /// Returns the HTTP status carried by a [`ApiError::RequestFailed`].
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` for errors raised by local request validation.
    ///
    /// These never involve the network.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidDatabaseName
                | Self::ExpirationInvalid
                | Self::AuthorizationInvalid
                | Self::MissingRequiredField { .. }
                | Self::InvalidField { .. }
        )
    }
}

/// Decodes an explicit JSON `null` as `T::default()`.
///
/// The API sends `null` for empty lists in some responses.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failed_message() {
        let err = ApiError::request_failed("database", "creating", StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "error creating database: 400");
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert!(!err.is_validation());
    }

    #[test]
    fn test_field_error_messages() {
        assert_eq!(ApiError::missing_field("location").to_string(), "location is required");
        assert_eq!(
            ApiError::invalid_field("name", "spaces are not allowed").to_string(),
            "name is invalid, spaces are not allowed"
        );
    }

    #[test]
    fn test_validation_kinds() {
        assert!(ApiError::InvalidDatabaseName.is_validation());
        assert!(ApiError::ExpirationInvalid.is_validation());
        assert!(ApiError::AuthorizationInvalid.is_validation());
        assert!(ApiError::missing_field("name").is_validation());
        assert!(!ApiError::ApiTokenNotSet.is_validation());
        assert_eq!(ApiError::ApiTokenNotSet.status(), None);
    }

    #[test]
    fn test_null_as_default() {
        #[derive(Deserialize, Default)]
        #[serde(default)]
        struct Wrapper {
            #[serde(deserialize_with = "null_as_default")]
            items: Vec<String>,
        }

        let w: Wrapper = serde_json::from_str(r#"{"items": null}"#).unwrap();
        assert!(w.items.is_empty());
        let w: Wrapper = serde_json::from_str("{}").unwrap();
        assert!(w.items.is_empty());
        let w: Wrapper = serde_json::from_str(r#"{"items": ["a"]}"#).unwrap();
        assert_eq!(w.items, vec!["a"]);
    }
}
