//! CORS-injecting rewriting forwarder library.

pub mod config;
pub mod cors;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod rewrite;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
