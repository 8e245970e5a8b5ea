//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Root configuration for the forwarder.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream rewrite policy.
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request size limits.
    pub limits: LimitConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream rewrite policy.
///
/// Exactly one policy is active per deployment. The two modes handle the
/// host component of the URL differently (discarded vs. substituted), so
/// they are mutually exclusive rather than merged.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum UpstreamConfig {
    /// Replace the entire destination with a fixed base URL; only the
    /// inbound path and query survive.
    BaseUrl {
        /// Absolute base URL, scheme included, no trailing slash.
        #[serde(default = "default_base_url")]
        base_url: String,
    },

    /// Substitute the inbound hostname via an exact-match lookup table.
    /// Hosts absent from the table are forwarded to their original
    /// destination unchanged.
    OriginMap {
        /// Inbound hostname → outbound hostname. Bare hostnames only.
        #[serde(default)]
        origins: HashMap<String, String>,

        /// Scheme for outbound URLs ("http" or "https").
        #[serde(default = "default_scheme")]
        scheme: String,
    },
}

impl UpstreamConfig {
    /// Short policy name for logging.
    pub fn mode_name(&self) -> &'static str {
        match self {
            UpstreamConfig::BaseUrl { .. } => "base_url",
            UpstreamConfig::OriginMap { .. } => "origin_map",
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self::BaseUrl {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_scheme() -> String {
    "https".to_string()
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Request size limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitConfig {
    /// Maximum inbound body size in bytes. Bodies are buffered before
    /// forwarding, so this bounds per-request memory.
    pub max_body_size: usize,
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            // Generative-API payloads can carry inline media.
            max_body_size: 32 * 1024 * 1024,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: ProxyConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.timeouts.request_secs, 30);
        match config.upstream {
            UpstreamConfig::BaseUrl { base_url } => {
                assert_eq!(base_url, "https://generativelanguage.googleapis.com");
            }
            other => panic!("unexpected default policy: {:?}", other),
        }
    }

    #[test]
    fn origin_map_config_parses() {
        let toml = r#"
            [upstream]
            mode = "origin_map"
            scheme = "https"

            [upstream.origins]
            "js.remoting.workers.dev" = "generativelanguage.googleapis.com"
        "#;
        let config: ProxyConfig = toml::from_str(toml).unwrap();
        match config.upstream {
            UpstreamConfig::OriginMap { origins, scheme } => {
                assert_eq!(scheme, "https");
                assert_eq!(
                    origins.get("js.remoting.workers.dev").map(String::as_str),
                    Some("generativelanguage.googleapis.com")
                );
            }
            other => panic!("unexpected policy: {:?}", other),
        }
    }

    #[test]
    fn base_url_config_parses() {
        let toml = r#"
            [upstream]
            mode = "base_url"
            base_url = "https://api.example.com"
        "#;
        let config: ProxyConfig = toml::from_str(toml).unwrap();
        match config.upstream {
            UpstreamConfig::BaseUrl { base_url } => {
                assert_eq!(base_url, "https://api.example.com");
            }
            other => panic!("unexpected policy: {:?}", other),
        }
    }
}
