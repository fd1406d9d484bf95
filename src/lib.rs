//! API forwarding gateway for the chauffeur booking site.
//!
//! Relays `ANY /api/{*path}` to `<BACKEND_URL>/api/v1/{path}`, stripping
//! connection-specific headers, forcing a JSON content type, and relaying the
//! upstream status, content type, cookies and body.

pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use http::GatewayServer;
pub use lifecycle::{Shutdown, ShutdownSignal};
