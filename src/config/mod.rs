//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → shared with the server at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the rewrite policy never changes at runtime
//! - All fields have defaults so the binary runs without any config file
//! - Validation separates syntactic (serde) from semantic checks
//! - Exactly one rewrite policy per deployment, enforced by the tagged enum

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::ListenerConfig;
pub use schema::ProxyConfig;
pub use schema::UpstreamConfig;
