//! The forwarding handler mounted under `/api`.
//!
//! Each invocation is a single pass with three terminal outcomes: an early
//! `204` for preflight, an early error (missing backend, unreadable body,
//! transport failure), or the relayed upstream response.

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use http_body_util::{BodyExt, LengthLimitError, Limited};

use crate::error::GatewayError;
use crate::http::request::RequestIdExt;
use crate::http::server::AppState;
use crate::observability::metrics::{self, Outcome};
use crate::proxy::body::{method_carries_body, ForwardBody};
use crate::proxy::headers::{relay_response_headers, sanitize};
use crate::proxy::target::{path_segments, upstream_url};
use crate::proxy::upstream::{OutboundRequest, UpstreamResponse};

/// `ANY /api` and `ANY /api/{*path}`.
///
/// The tail is read from the raw URI rather than a `Path` extractor so it
/// stays percent-encoded.
pub async fn forward_request(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Body,
) -> Response {
    let start_time = Instant::now();
    let request_id = headers.request_id().unwrap_or("unknown").to_string();

    if method == Method::OPTIONS {
        tracing::debug!(request_id = %request_id, path = %uri.path(), "Answering preflight");
        metrics::record_request(method.as_str(), 204, Outcome::Preflight, start_time);
        return StatusCode::NO_CONTENT.into_response();
    }

    match relay(&state, &method, &uri, headers, body).await {
        Ok(upstream) => {
            let status = upstream.status;
            tracing::info!(
                request_id = %request_id,
                method = %method,
                path = %uri.path(),
                status = status.as_u16(),
                latency_ms = start_time.elapsed().as_millis() as u64,
                "Request forwarded"
            );
            metrics::record_request(method.as_str(), status.as_u16(), Outcome::Relayed, start_time);
            into_client_response(upstream)
        }
        Err(err) => {
            match &err {
                GatewayError::MissingBackend => {
                    tracing::error!(request_id = %request_id, path = %uri.path(), "{}", err)
                }
                GatewayError::InvalidPath => {
                    tracing::warn!(request_id = %request_id, path = %uri.path(), "Rejected request path")
                }
                GatewayError::BodyRead | GatewayError::PayloadTooLarge { .. } => {
                    tracing::warn!(request_id = %request_id, path = %uri.path(), error = %err, "Rejected inbound body")
                }
                _ => tracing::error!(
                    request_id = %request_id,
                    method = %method,
                    path = %uri.path(),
                    error = %err,
                    "Upstream error"
                ),
            }
            metrics::record_upstream_error(err.kind());
            metrics::record_request(method.as_str(), err.status().as_u16(), Outcome::Failed, start_time);
            err.into_response()
        }
    }
}

/// Derive the outbound request and send it once.
async fn relay(
    state: &AppState,
    method: &Method,
    uri: &Uri,
    headers: HeaderMap,
    body: Body,
) -> Result<UpstreamResponse, GatewayError> {
    let origin = state.origin.as_ref().ok_or(GatewayError::MissingBackend)?;

    let tail = uri.path().strip_prefix("/api").unwrap_or_default();
    let query = if state.forward_query { uri.query() } else { None };
    let url = upstream_url(origin, &path_segments(tail)?, query);

    let body = if method_carries_body(method) {
        let bytes = read_body(body, state.max_body_size).await?;
        ForwardBody::from_inbound(headers.get(CONTENT_TYPE), bytes)
    } else {
        ForwardBody::Empty
    };

    tracing::debug!(method = %method, url = %url, has_body = !body.is_empty(), "Proxying request");

    let request = OutboundRequest {
        method: method.clone(),
        url,
        headers: sanitize(&headers),
        body: body.into_bytes(),
    };
    state.client.forward(request).await
}

async fn read_body(body: Body, limit: usize) -> Result<Bytes, GatewayError> {
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            Err(GatewayError::PayloadTooLarge { limit })
        }
        Err(_) => Err(GatewayError::BodyRead),
    }
}

fn into_client_response(upstream: UpstreamResponse) -> Response {
    let mut response = Response::new(Body::from(upstream.body));
    *response.status_mut() = upstream.status;
    *response.headers_mut() = relay_response_headers(&upstream.headers);
    response
}
