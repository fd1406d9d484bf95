//! Header manipulation for forwarded requests and relayed responses.
//!
//! # Responsibilities
//! - Strip connection-specific and CORS-triggering headers before forwarding
//! - Force the forwarded content type to JSON
//! - Reduce upstream response headers to the relayed subset
//!
//! # Design Decisions
//! - The removal set is a single constant; everything else passes through
//! - Multi-valued headers keep every value
//! - `HeaderName` is lowercase, so matching is case-insensitive by construction

use axum::http::{
    header::{CONNECTION, CONTENT_LENGTH, CONTENT_TYPE, HOST, ORIGIN, SET_COOKIE},
    HeaderMap, HeaderName, HeaderValue,
};

/// Inbound headers never forwarded to the upstream.
pub const STRIPPED_REQUEST_HEADERS: [HeaderName; 4] = [HOST, CONNECTION, CONTENT_LENGTH, ORIGIN];

/// Content type set on every forwarded request.
pub const FORWARDED_CONTENT_TYPE: &str = "application/json";

/// Build the header set forwarded to the upstream.
pub fn sanitize(inbound: &HeaderMap) -> HeaderMap {
    let mut forwarded = HeaderMap::with_capacity(inbound.len());

    for (name, value) in inbound {
        if STRIPPED_REQUEST_HEADERS.contains(name) {
            continue;
        }
        forwarded.append(name.clone(), value.clone());
    }

    forwarded.insert(CONTENT_TYPE, HeaderValue::from_static(FORWARDED_CONTENT_TYPE));
    forwarded
}

/// Select the upstream response headers relayed to the client.
///
/// Only `content-type` and every `set-cookie` survive. Length and encoding
/// headers are recomputed for the relayed body.
pub fn relay_response_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut relayed = HeaderMap::new();

    if let Some(content_type) = upstream.get(CONTENT_TYPE) {
        relayed.insert(CONTENT_TYPE, content_type.clone());
    }
    for cookie in upstream.get_all(SET_COOKIE) {
        relayed.append(SET_COOKIE, cookie.clone());
    }

    relayed
}
