//! HTTP server setup and request handling.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all proxy handler
//! - Wire up middleware (tracing, request timeout)
//! - Answer CORS preflights locally
//! - Rewrite the target URL and forward via the injected client
//! - Relay the upstream response with CORS headers injected
//! - Convert forward failures into a single 500 response

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{header, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::config::ProxyConfig;
use crate::cors;
use crate::http::forward::{Forwarder, HttpForwarder};
use crate::rewrite::RewritePolicy;

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState<F: Forwarder> {
    pub policy: Arc<RewritePolicy>,
    pub forwarder: F,
    pub max_body_size: usize,
}

/// HTTP server for the forwarder.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the production forwarder.
    pub fn new(config: ProxyConfig) -> Result<Self, crate::http::ForwardError> {
        let forwarder = HttpForwarder::new()?;
        Ok(Self::with_forwarder(config, forwarder))
    }

    /// Create a server with an injected forwarder (used by tests).
    pub fn with_forwarder<F: Forwarder>(config: ProxyConfig, forwarder: F) -> Self {
        let state = AppState {
            policy: Arc::new(RewritePolicy::from_config(&config.upstream)),
            forwarder,
            max_body_size: config.limits.max_body_size,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router<F: Forwarder>(config: &ProxyConfig, state: AppState<F>) -> Router {
        Router::new()
            .route("/{*path}", any(proxy_handler::<F>))
            .route("/", any(proxy_handler::<F>))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until Ctrl+C or an external shutdown trigger.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            policy = self.config.upstream.mode_name(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    result = tokio::signal::ctrl_c() => {
                        if let Err(e) = result {
                            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                        }
                        tracing::info!("Shutdown signal received");
                    }
                    _ = shutdown.recv() => {
                        tracing::info!("Shutdown triggered");
                    }
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// Main proxy handler: preflight short-circuit, rewrite, forward, relay.
async fn proxy_handler<F: Forwarder>(
    State(state): State<AppState<F>>,
    request: Request<Body>,
) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Handling request"
    );

    // Preflights are answered locally under both policies.
    if method == Method::OPTIONS {
        return cors::preflight_response(request.headers());
    }

    let authority = request_authority(&request);
    let target = match state.policy.rewrite(request.uri(), authority.as_deref()) {
        Ok(target) => target,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Rewrite failed");
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    tracing::debug!(
        request_id = %request_id,
        target = %target,
        "Forwarding request"
    );

    let (parts, body) = request.into_parts();
    let body_bytes = match axum::body::to_bytes(body, state.max_body_size).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Failed to buffer request body");
            return (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response();
        }
    };

    match state
        .forwarder
        .forward(method, target, parts.headers, body_bytes)
        .await
    {
        Ok(mut response) => {
            // Upstream status codes, 4xx/5xx included, relay as-is.
            cors::apply_cors(response.headers_mut());
            response
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Upstream request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Proxy error: {e}"),
            )
                .into_response()
        }
    }
}

/// Inbound authority: absolute-form URI first, Host header otherwise.
fn request_authority(request: &Request<Body>) -> Option<String> {
    if let Some(authority) = request.uri().authority() {
        return Some(authority.to_string());
    }
    request
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}
