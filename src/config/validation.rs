//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, URLs, and hostname tables
//! - Validate value ranges (timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::{ProxyConfig, UpstreamConfig};

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a valid socket address")]
    BindAddress(String),

    #[error("upstream.base_url `{0}` is not an absolute http(s) URL")]
    BaseUrl(String),

    #[error("upstream.scheme `{0}` must be `http` or `https`")]
    Scheme(String),

    #[error("origin mapping `{0}` → `{1}` must use bare hostnames (no scheme, port, or path)")]
    OriginEntry(String, String),

    #[error("timeouts.request_secs must be greater than zero")]
    RequestTimeout,

    #[error("limits.max_body_size must be greater than zero")]
    MaxBodySize,
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    match &config.upstream {
        UpstreamConfig::BaseUrl { base_url } => match Url::parse(base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => errors.push(ValidationError::BaseUrl(base_url.clone())),
        },
        UpstreamConfig::OriginMap { origins, scheme } => {
            if !matches!(scheme.as_str(), "http" | "https") {
                errors.push(ValidationError::Scheme(scheme.clone()));
            }
            for (inbound, outbound) in origins {
                if !is_bare_hostname(inbound) || !is_bare_hostname(outbound) {
                    errors.push(ValidationError::OriginEntry(
                        inbound.clone(),
                        outbound.clone(),
                    ));
                }
            }
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::RequestTimeout);
    }

    if config.limits.max_body_size == 0 {
        errors.push(ValidationError::MaxBodySize);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_bare_hostname(s: &str) -> bool {
    !s.is_empty() && !s.contains('/') && !s.contains(':')
}
