//! Outbound request forwarding.
//!
//! # Responsibilities
//! - Define the `Forwarder` capability the proxy handler depends on
//! - Provide the production implementation over a standard HTTP client
//!
//! # Design Decisions
//! - The trait seam keeps the handler testable without a real network
//! - Redirects are not followed; upstream redirects relay to the client
//! - Upstream response bodies stream back without buffering

use std::future::Future;

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, Method, Uri};
use axum::response::Response;
use reqwest::redirect::Policy;

/// The single runtime error kind: the outbound forward failed at the
/// network level. Carries the client's textual description, which is
/// relayed to the caller in the 500 body.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ForwardError {
    message: String,
}

impl ForwardError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for ForwardError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

/// Injected HTTP-client capability.
///
/// Given a method, target URL, headers, and a buffered body, issue the
/// outbound request and return the upstream response.
pub trait Forwarder: Clone + Send + Sync + 'static {
    fn forward(
        &self,
        method: Method,
        target: Uri,
        headers: HeaderMap,
        body: Bytes,
    ) -> impl Future<Output = Result<Response, ForwardError>> + Send;
}

/// Production forwarder over a pooled `reqwest` client.
#[derive(Clone)]
pub struct HttpForwarder {
    client: reqwest::Client,
}

impl HttpForwarder {
    /// Build the outbound client. Redirect following is disabled so
    /// upstream redirects reach the caller verbatim.
    pub fn new() -> Result<Self, ForwardError> {
        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .build()?;
        Ok(Self { client })
    }
}

impl Forwarder for HttpForwarder {
    async fn forward(
        &self,
        method: Method,
        target: Uri,
        mut headers: HeaderMap,
        body: Bytes,
    ) -> Result<Response, ForwardError> {
        // The client derives Host and Content-Length from the target URL
        // and body; stale inbound values would break virtual-hosted
        // upstreams.
        headers.remove(header::HOST);
        headers.remove(header::CONTENT_LENGTH);

        let upstream = self
            .client
            .request(method, target.to_string())
            .headers(headers)
            .body(body)
            .send()
            .await?;

        let status = upstream.status();
        let headers = upstream.headers().clone();

        let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        Ok(response)
    }
}
