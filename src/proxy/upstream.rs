//! Upstream HTTP client.
//!
//! # Responsibilities
//! - Send one outbound request per inbound request
//! - Read the full upstream response before relaying
//!
//! # Design Decisions
//! - Single attempt: no retries, no circuit breaking
//! - `request_secs` bounds the whole exchange, so an expired deadline surfaces
//!   as `GatewayError::UpstreamTimeout` (504)
//! - Redirects are relayed to the browser, never followed here
//! - Response bodies are decoded (gzip/br/deflate) since encoding headers
//!   are not relayed
//! - Connection pooling is left to reqwest

use std::time::Duration;

use axum::http::{
    header::{ACCEPT_ENCODING, TRANSFER_ENCODING},
    HeaderMap, Method, StatusCode,
};
use bytes::Bytes;
use url::Url;

use crate::config::TimeoutConfig;
use crate::error::GatewayError;

/// Request sent to the upstream, fully derived from the inbound request.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

/// Buffered upstream response.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Shared, cloneable client for the configured backend.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    inner: reqwest::Client,
}

impl UpstreamClient {
    /// Build the client with the configured connect and request deadlines.
    pub fn new(timeouts: &TimeoutConfig) -> Result<Self, GatewayError> {
        let inner = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(Duration::from_secs(timeouts.request_secs))
            .redirect(reqwest::redirect::Policy::none())
            .no_proxy()
            .build()
            .map_err(GatewayError::ClientBuild)?;

        Ok(Self { inner })
    }

    /// Forward a request and buffer the response. Exactly one attempt.
    pub async fn forward(&self, request: OutboundRequest) -> Result<UpstreamResponse, GatewayError> {
        let OutboundRequest {
            method,
            url,
            mut headers,
            body,
        } = request;

        // The relayed body is decoded, so negotiate encodings reqwest can undo.
        headers.remove(ACCEPT_ENCODING);
        // The body is buffered; reqwest frames it with a content length.
        headers.remove(TRANSFER_ENCODING);

        let mut builder = self.inner.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(GatewayError::from_upstream)?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(GatewayError::from_upstream)?;

        Ok(UpstreamResponse {
            status,
            headers,
            body,
        })
    }
}
