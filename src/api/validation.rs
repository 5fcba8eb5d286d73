//
//  turso-cli
//  api/validation.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Request Validation
//!
//! Shape checks applied to user supplied fields before any network call.
//! Every function here is pure and synchronous; a failure is returned as the
//! matching [`ApiError`] kind so callers can react programmatically.
//!
//! ## Rules
//!
//! | Field | Rule | Error |
//! |-------|------|-------|
//! | database name | `^[a-z0-9-]+$`, at most 32 characters | `InvalidDatabaseName` |
//! | group name | non-empty, no spaces | `MissingRequiredField` / `InvalidField` |
//! | group location | non-empty, exactly 3 characters | `MissingRequiredField` / `InvalidField` |
//! | token expiration | `never` or a relative duration | `ExpirationInvalid` |
//! | token authorization | `full-access` or `read-only` | `AuthorizationInvalid` |

use once_cell::sync::Lazy;
use regex::Regex;

use super::common::ApiError;
use super::databases::CreateDatabaseRequest;
use super::groups::{CreateGroupRequest, GroupLocationRequest};
use super::tokens::{CreateDatabaseTokenRequest, DEFAULT_EXPIRATION, FULL_ACCESS, READ_ONLY};
use crate::util::parse_duration;

/// Maximum length of a database name.
pub const MAX_DATABASE_NAME_LENGTH: usize = 32;

/// Every Turso location is a three letter region code.
pub const LOCATION_CODE_LENGTH: usize = 3;

static DATABASE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9-]+$").expect("database name pattern is valid"));

const VALID_AUTHORIZATIONS: [&str; 2] = [FULL_ACCESS, READ_ONLY];

/// Checks a database name against the platform naming rules.
///
/// # Errors
///
/// Returns [`ApiError::InvalidDatabaseName`] if the name contains anything
/// other than lowercase letters, digits and dashes, or is longer than
/// [`MAX_DATABASE_NAME_LENGTH`].
///
/// # Example
///
/// ```rust
/// use turso_cli::api::validation::validate_database_name;
///
/// assert!(validate_database_name("my-db").is_ok());
/// assert!(validate_database_name("myAWESOMEdb").is_err());
/// ```
pub fn validate_database_name(name: &str) -> Result<(), ApiError> {
    if !DATABASE_NAME_RE.is_match(name) {
        return Err(ApiError::InvalidDatabaseName);
    }

    if name.len() > MAX_DATABASE_NAME_LENGTH {
        return Err(ApiError::InvalidDatabaseName);
    }

    Ok(())
}

/// Validates a create-database request.
pub fn validate_database_create_request(request: &CreateDatabaseRequest) -> Result<(), ApiError> {
    validate_database_name(&request.name)
}

/// Checks that a group name is present and contains no spaces.
pub fn validate_group_name(name: &str) -> Result<(), ApiError> {
    if name.is_empty() {
        return Err(ApiError::missing_field("name"));
    }

    if name.contains(' ') {
        return Err(ApiError::invalid_field("name", "spaces are not allowed"));
    }

    Ok(())
}

/// Checks that a location is present and is a three character region code.
pub fn validate_location(location: &str) -> Result<(), ApiError> {
    if location.is_empty() {
        return Err(ApiError::missing_field("location"));
    }

    if location.chars().count() != LOCATION_CODE_LENGTH {
        return Err(ApiError::invalid_field("location", "must be 3 characters"));
    }

    Ok(())
}

/// Validates a create-group request.
///
/// The name is checked first; the location is only checked once the name
/// passes, so the first failing rule is the one reported.
pub fn validate_group_create_request(request: &CreateGroupRequest) -> Result<(), ApiError> {
    validate_group_name(&request.name)?;
    validate_location(&request.location)
}

/// Validates an add/remove-location request.
///
/// Only presence is checked here. The location format is not enforced, unlike
/// [`validate_group_create_request`]; see
/// [`TursoClient::with_strict_locations`](super::TursoClient::with_strict_locations)
/// to opt into the format check.
pub fn validate_location_request(request: &GroupLocationRequest) -> Result<(), ApiError> {
    if request.group_name.is_empty() {
        return Err(ApiError::missing_field("name"));
    }

    if request.location.is_empty() {
        return Err(ApiError::missing_field("location"));
    }

    Ok(())
}

/// Returns `true` if `expiration` is `never` or a parseable relative duration.
///
/// # Example
///
/// ```rust
/// use turso_cli::api::validation::is_valid_expiration;
///
/// assert!(is_valid_expiration("never"));
/// assert!(is_valid_expiration("12w"));
/// assert!(!is_valid_expiration(""));
/// assert!(!is_valid_expiration("2030-01-01"));
/// ```
pub fn is_valid_expiration(expiration: &str) -> bool {
    if expiration.is_empty() {
        return false;
    }

    if expiration == DEFAULT_EXPIRATION {
        return true;
    }

    parse_duration(expiration).is_ok()
}

/// Returns `true` if `authorization` is exactly `full-access` or `read-only`.
pub fn is_valid_authorization(authorization: &str) -> bool {
    VALID_AUTHORIZATIONS.contains(&authorization)
}

/// Validates a create-token request: expiration first, then authorization.
pub fn validate_database_token_request(request: &CreateDatabaseTokenRequest) -> Result<(), ApiError> {
    if !is_valid_expiration(&request.expiration) {
        return Err(ApiError::ExpirationInvalid);
    }

    if !is_valid_authorization(&request.authorization) {
        return Err(ApiError::AuthorizationInvalid);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(name: &str, location: &str) -> CreateGroupRequest {
        CreateGroupRequest {
            name: name.to_string(),
            location: location.to_string(),
            ..Default::default()
        }
    }

    fn token(expiration: &str, authorization: &str) -> CreateDatabaseTokenRequest {
        CreateDatabaseTokenRequest {
            database_name: "my-db".to_string(),
            expiration: expiration.to_string(),
            authorization: authorization.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_database_name_accepts_valid_names() {
        for name in ["my-db", "db1", "a", "0-0-0", &"a".repeat(32)] {
            assert!(validate_database_name(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_database_name_rejects_invalid_names() {
        for name in ["", "myAWESOMEdb", "my_db", "my db", "db.prod", &"a".repeat(33)] {
            assert!(
                matches!(validate_database_name(name), Err(ApiError::InvalidDatabaseName)),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_group_create_request() {
        assert!(validate_group_create_request(&group("meow", "lhr")).is_ok());

        match validate_group_create_request(&group("", "lhr")) {
            Err(ApiError::MissingRequiredField { field }) => assert_eq!(field, "name"),
            other => panic!("unexpected result: {other:?}"),
        }

        match validate_group_create_request(&group("my group", "lhr")) {
            Err(ApiError::InvalidField { field, message }) => {
                assert_eq!(field, "name");
                assert_eq!(message, "spaces are not allowed");
            }
            other => panic!("unexpected result: {other:?}"),
        }

        match validate_group_create_request(&group("meow", "")) {
            Err(ApiError::MissingRequiredField { field }) => assert_eq!(field, "location"),
            other => panic!("unexpected result: {other:?}"),
        }

        match validate_group_create_request(&group("meow", "london")) {
            Err(ApiError::InvalidField { field, message }) => {
                assert_eq!(field, "location");
                assert_eq!(message, "must be 3 characters");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_group_name_checked_before_location() {
        match validate_group_create_request(&group("", "")) {
            Err(ApiError::MissingRequiredField { field }) => assert_eq!(field, "name"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_location_request_checks_presence_only() {
        let request = GroupLocationRequest {
            group_name: "meow".to_string(),
            location: "london".to_string(),
        };
        assert!(validate_location_request(&request).is_ok());

        let request = GroupLocationRequest {
            group_name: String::new(),
            location: String::new(),
        };
        match validate_location_request(&request) {
            Err(ApiError::MissingRequiredField { field }) => assert_eq!(field, "name"),
            other => panic!("unexpected result: {other:?}"),
        }

        let request = GroupLocationRequest {
            group_name: "meow".to_string(),
            location: String::new(),
        };
        match validate_location_request(&request) {
            Err(ApiError::MissingRequiredField { field }) => assert_eq!(field, "location"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_expiration() {
        assert!(is_valid_expiration("never"));
        assert!(is_valid_expiration("12w"));
        assert!(is_valid_expiration("1h30m"));
        assert!(!is_valid_expiration(""));
        assert!(!is_valid_expiration("2030-01-01"));
        assert!(!is_valid_expiration("Never"));
    }

    #[test]
    fn test_authorization() {
        assert!(is_valid_authorization("full-access"));
        assert!(is_valid_authorization("read-only"));
        assert!(!is_valid_authorization(""));
        assert!(!is_valid_authorization("invalid"));
        assert!(!is_valid_authorization("READ-ONLY"));
    }

    #[test]
    fn test_database_token_request() {
        assert!(validate_database_token_request(&token("never", "full-access")).is_ok());
        assert!(validate_database_token_request(&token("never", "read-only")).is_ok());
        assert!(validate_database_token_request(&token("12w", "read-only")).is_ok());

        assert!(matches!(
            validate_database_token_request(&token("", "read-only")),
            Err(ApiError::ExpirationInvalid)
        ));
        assert!(matches!(
            validate_database_token_request(&token("never", "invalid")),
            Err(ApiError::AuthorizationInvalid)
        ));
        // expiration wins when both are wrong
        assert!(matches!(
            validate_database_token_request(&token("2030-01-01", "invalid")),
            Err(ApiError::ExpirationInvalid)
        ));
    }
}
