//! Booking API gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!     Browser                    ┌──────────────────────────────────────┐
//!     ──── ANY /api/{*path} ────▶│ request id → trace                   │
//!                                │      │                               │
//!                                │      ▼                               │
//!                                │ proxy::forward                       │
//!                                │   OPTIONS → 204                      │
//!                                │   no BACKEND_URL → 500 {message}     │
//!                                │   sanitize headers, classify body    │
//!                                │      │                               │
//!                                │      ▼                               │
//!     ◀── status, content-type, ─│ proxy::upstream (reqwest, 1 attempt) │──▶ <BACKEND_URL>/api/v1/{path}
//!         set-cookie, body       └──────────────────────────────────────┘
//! ```

use clap::Parser;
use tokio::net::TcpListener;

use booking_gateway::cli::Cli;
use booking_gateway::http::GatewayServer;
use booking_gateway::lifecycle::{wait_for_signal, Shutdown};
use booking_gateway::observability::{logging, metrics};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.resolve_config(|key| std::env::var(key).ok())?;

    logging::init(&config.observability);

    tracing::info!("booking-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        max_body_size = config.limits.max_body_size,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Validated as a socket address already.
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = GatewayServer::new(config)?;
    let server_shutdown = shutdown.subscribe();

    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        wait_for_signal().await;
        signal_shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
