//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing)
//! - Inject the backend origin and upstream client into handler state
//! - Serve until the shutdown signal fires

use axum::{
    body::Body,
    http::Request,
    routing::{any, get},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::{GatewayConfig, BACKEND_URL_ENV};
use crate::error::GatewayError;
use crate::http::health::get_status;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, RequestIdExt};
use crate::lifecycle::ShutdownSignal;
use crate::proxy::forward::forward_request;
use crate::proxy::{BackendOrigin, UpstreamClient};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Normalized backend origin; `None` when unconfigured.
    pub origin: Option<BackendOrigin>,
    pub client: UpstreamClient,
    pub forward_query: bool,
    pub max_body_size: usize,
}

impl AppState {
    pub fn from_config(config: &GatewayConfig) -> Result<Self, GatewayError> {
        Ok(Self {
            origin: config.backend.url.as_deref().and_then(BackendOrigin::parse),
            client: UpstreamClient::new(&config.timeouts)?,
            forward_query: config.backend.forward_query,
            max_body_size: config.limits.max_body_size,
        })
    }
}

/// HTTP server for the API gateway.
pub struct GatewayServer {
    router: Router,
}

impl GatewayServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let state = AppState::from_config(&config)?;

        match &state.origin {
            Some(origin) => tracing::info!(backend = %origin, "Forwarding /api to backend"),
            None => tracing::warn!(
                "{} is not configured; /api requests will fail with 500",
                BACKEND_URL_ENV
            ),
        }

        Ok(Self {
            router: Self::build_router(state),
        })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The request deadline lives on the upstream client so it renders as a
    /// JSON 504 like every other gateway error.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/api", any(forward_request))
            .route("/api/{*path}", any(forward_request))
            .route("/healthz", get(get_status))
            .with_state(state)
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request.headers().request_id().unwrap_or("unknown"),
                )
            }))
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
    }

    /// The assembled router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on the given listener until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
