//! Structured logging initialization.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::schema::ObservabilityConfig;

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the configured level seeds the
/// filter for this crate and the HTTP trace layer.
pub fn init_logging(config: &ObservabilityConfig) {
    let default_filter = format!(
        "edge_proxy={level},tower_http={level}",
        level = config.log_level
    );

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
