//! URL rewriting subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (host, path, query)
//!     → policy.rs (compiled RewritePolicy)
//!     → Fixed base:  <base><path><query>, inbound host discarded
//!     → Origin map:  hostname substituted on exact match,
//!                    pass-through to original destination on miss
//!     → Return: outbound Uri
//! ```
//!
//! # Design Decisions
//! - Policy compiled once at startup, immutable at runtime
//! - Exact-match hostname lookup only (no wildcards)
//! - Path and query survive byte-for-byte; no normalization

pub mod policy;

pub use policy::{RewriteError, RewritePolicy};
