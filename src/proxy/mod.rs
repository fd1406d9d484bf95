//! API forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! ANY /api/{*path}
//!     → forward.rs (preflight short-circuit, backend check)
//!     → target.rs (<origin>/api/v1/<encoded path>[?query], dot segments refused)
//!     → headers.rs (sanitize inbound headers)
//!     → body.rs (Empty | Text | Structured | Binary)
//!     → upstream.rs (single reqwest call, buffered response)
//!     → headers.rs (relay status, content-type, set-cookie, body)
//! ```
//!
//! # Design Decisions
//! - Stateless: the outbound request is derived from the inbound one and the
//!   origin injected at construction
//! - No retries; upstream statuses are relayed, not translated

pub mod body;
pub mod forward;
pub mod headers;
pub mod target;
pub mod upstream;

pub use body::{method_carries_body, ForwardBody};
pub use headers::{relay_response_headers, sanitize, STRIPPED_REQUEST_HEADERS};
pub use target::{path_segments, upstream_url, BackendOrigin, API_VERSION_PREFIX};
pub use upstream::{OutboundRequest, UpstreamClient, UpstreamResponse};
