//! CORS preflight synthesis and response header injection.
//!
//! Preflight (`OPTIONS`) requests are answered locally and never reach the
//! upstream. Every relayed response gets the allow-origin and
//! allow-methods headers overwritten, regardless of what the upstream set.

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::Response;

/// Methods advertised on preflight and forwarded responses.
pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";

/// Fallback allow-headers when the client does not request specific ones.
/// Covers content negotiation and credential-carrying headers.
pub const DEFAULT_ALLOW_HEADERS: &str = "Content-Type, X-Api-Key, Authorization";

/// Preflight cache lifetime: 24 hours, in seconds.
pub const MAX_AGE_SECS: &str = "86400";

/// Synthesize a CORS preflight response for an `OPTIONS` request.
///
/// Status 204 with an empty body. The allow-origin echoes the inbound
/// `Origin` (falling back to `*`), and the allow-headers echo the inbound
/// `Access-Control-Request-Headers` (falling back to the fixed default).
pub fn preflight_response(request_headers: &HeaderMap) -> Response {
    let allow_origin = request_headers
        .get(header::ORIGIN)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("*"));

    let allow_headers = request_headers
        .get(header::ACCESS_CONTROL_REQUEST_HEADERS)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_ALLOW_HEADERS));

    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::NO_CONTENT;

    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, allow_origin);
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, allow_headers);
    headers.insert(
        header::ACCESS_CONTROL_MAX_AGE,
        HeaderValue::from_static(MAX_AGE_SECS),
    );

    response
}

/// Inject CORS headers into a relayed upstream response.
///
/// Overwrites any allow-origin/allow-methods values the upstream returned.
pub fn apply_cors(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
}
