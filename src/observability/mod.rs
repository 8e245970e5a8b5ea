//! Observability subsystem.
//!
//! Structured logging only: request handling emits `tracing` events with a
//! per-request correlation id, and `tower_http::trace` covers the HTTP
//! span lifecycle. No metrics pipeline; that belongs to the platform.

pub mod logging;
