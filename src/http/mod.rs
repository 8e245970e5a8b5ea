//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, proxy handler)
//!     → [OPTIONS short-circuits to a synthesized preflight]
//!     → [rewrite layer computes the outbound target]
//!     → forward.rs (outbound HTTP client behind the Forwarder trait)
//!     → response relayed with CORS headers injected
//! ```

pub mod forward;
pub mod server;

pub use forward::{ForwardError, Forwarder, HttpForwarder};
pub use server::HttpServer;
