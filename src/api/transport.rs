//
//  turso-cli
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Transport
//!
//! The request executor never talks to the network directly. It hands a fully
//! built [`HttpRequest`] to an injected [`HttpTransport`] and receives an
//! [`HttpResponse`] back. This keeps timeouts, proxies and TLS settings in the
//! caller's hands and lets tests substitute a recording double
//! (see [`MockTransport`](super::mock::MockTransport)).
//!
//! [`ReqwestTransport`] is the default implementation, backed by a
//! `reqwest::Client`.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, StatusCode};
use thiserror::Error;

/// Errors raised by a transport while sending a request.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The reqwest client failed (connection refused, TLS, timeout, ...).
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Any other transport failure, used by custom transports and test doubles.
    #[error("{0}")]
    Other(String),
}

/// A fully built, authenticated request ready to be dispatched.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Fully-qualified URL including any query string.
    pub url: String,
    /// Request headers (`Authorization` and `Content-Type` at minimum).
    pub headers: HeaderMap,
    /// Serialized JSON body, if the operation sends one.
    pub body: Option<Vec<u8>>,
}

/// Raw response handed back to the caller for decoding and status checks.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status returned by the remote service.
    pub status: StatusCode,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Builds a response from a status and a body.
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Capability to send one HTTP request and return its response.
///
/// Implementations must be safe to share between tasks; the client holds the
/// transport behind an `Arc` and may be used concurrently.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends `request` and returns the response, or a transport-level failure.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Default transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Creates a transport with a `turso/<version>` user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying TLS backend cannot be initialised.
    pub fn new() -> Result<Self, TransportError> {
        Ok(Self {
            http: Client::builder()
                .user_agent(format!("turso/{}", crate::VERSION))
                .build()?,
        })
    }

    /// Wraps an already configured `reqwest::Client`.
    ///
    /// Use this to control timeouts, proxies or connection pooling.
    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .http
            .request(request.method, &request.url)
            .headers(request.headers);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        Ok(HttpResponse::new(status, body.to_vec()))
    }
}
