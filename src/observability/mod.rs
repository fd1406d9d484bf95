//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Gateway handlers produce:
//!     → logging.rs (structured log events, request ID in every span)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows from the inbound request to the upstream and back
//! - Header values and bodies are never logged

pub mod logging;
pub mod metrics;
