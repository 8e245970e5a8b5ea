//! Target URL computation.

use std::collections::HashMap;

use axum::http::Uri;

use crate::config::schema::UpstreamConfig;

/// Error type for target URL computation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RewriteError {
    #[error("request carries no Host header to resolve against the origin map")]
    MissingHost,

    #[error("computed target `{0}` is not a valid URI")]
    InvalidTarget(String),
}

/// The rewrite policy, compiled from configuration at startup.
///
/// Immutable after construction and shared read-only across request
/// handlers.
#[derive(Debug, Clone)]
pub enum RewritePolicy {
    /// Target = `<base><path><query>`. The inbound host is discarded.
    FixedBase { base: String },

    /// Substitute the hostname via exact-match lookup. Unmapped hosts are
    /// forwarded to their original destination (pass-through, not an
    /// error). Only the hostname is replaced; an inbound port survives.
    OriginMap {
        origins: HashMap<String, String>,
        scheme: String,
    },
}

impl RewritePolicy {
    /// Compile the policy from its configuration form.
    pub fn from_config(config: &UpstreamConfig) -> Self {
        match config {
            UpstreamConfig::BaseUrl { base_url } => Self::FixedBase {
                base: base_url.clone(),
            },
            UpstreamConfig::OriginMap { origins, scheme } => Self::OriginMap {
                origins: origins.clone(),
                scheme: scheme.clone(),
            },
        }
    }

    /// Compute the outbound target for an inbound request.
    ///
    /// `authority` is the inbound host as seen on the wire (Host header or
    /// absolute-form URI authority), possibly carrying a port.
    pub fn rewrite(&self, uri: &Uri, authority: Option<&str>) -> Result<Uri, RewriteError> {
        let path_and_query = uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");

        let target = match self {
            RewritePolicy::FixedBase { base } => {
                format!("{base}{path_and_query}")
            }
            RewritePolicy::OriginMap { origins, scheme } => {
                let authority = authority.ok_or(RewriteError::MissingHost)?;
                let (hostname, port) = split_host_port(authority);
                let outbound = origins.get(hostname).map(String::as_str).unwrap_or(hostname);
                match port {
                    Some(port) => format!("{scheme}://{outbound}:{port}{path_and_query}"),
                    None => format!("{scheme}://{outbound}{path_and_query}"),
                }
            }
        };

        target
            .parse::<Uri>()
            .map_err(|_| RewriteError::InvalidTarget(target))
    }
}

/// Split an authority string into hostname and optional port.
///
/// Lookup keys are bare hostnames; the port, when present, is carried
/// through to the outbound URL unchanged.
fn split_host_port(authority: &str) -> (&str, Option<&str>) {
    match authority.rsplit_once(':') {
        Some((host, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => {
            (host, Some(port))
        }
        _ => (authority, None),
    }
}
