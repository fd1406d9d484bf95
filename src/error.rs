//! Gateway error taxonomy.
//!
//! Upstream error statuses are not represented here: they are relayed to the
//! client verbatim. Only failures the gateway itself produces become a
//! `GatewayError`, rendered as a JSON `{ "message": ... }` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::config::BACKEND_URL_ENV;

/// Errors that can occur while forwarding a request.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No backend origin was configured.
    #[error("{} is not configured", BACKEND_URL_ENV)]
    MissingBackend,

    /// The upstream could not be reached or the exchange broke mid-flight.
    #[error("upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The upstream did not connect or answer within the configured deadline.
    #[error("upstream request timed out")]
    UpstreamTimeout(#[source] reqwest::Error),

    /// The request path contains a segment that would resolve outside the prefix.
    #[error("invalid request path")]
    InvalidPath,

    /// The inbound body could not be read.
    #[error("failed to read request body")]
    BodyRead,

    /// The inbound body exceeded the configured limit.
    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    /// The upstream HTTP client could not be constructed.
    #[error("failed to build upstream client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl GatewayError {
    /// Classify a reqwest failure raised while talking to the upstream.
    pub fn from_upstream(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::UpstreamTimeout(err)
        } else {
            GatewayError::Transport(err)
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MissingBackend | GatewayError::ClientBuild(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            GatewayError::Transport(_) => StatusCode::BAD_GATEWAY,
            GatewayError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::InvalidPath | GatewayError::BodyRead => StatusCode::BAD_REQUEST,
            GatewayError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::MissingBackend => "missing_backend",
            GatewayError::Transport(_) => "transport",
            GatewayError::UpstreamTimeout(_) => "timeout",
            GatewayError::InvalidPath => "invalid_path",
            GatewayError::BodyRead => "body_read",
            GatewayError::PayloadTooLarge { .. } => "payload_too_large",
            GatewayError::ClientBuild(_) => "client_build",
        }
    }

    /// Message exposed to clients. Transport details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            GatewayError::Transport(_) => "upstream request failed".to_string(),
            GatewayError::UpstreamTimeout(_) => "upstream request timed out".to_string(),
            other => other.to_string(),
        }
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: self.public_message(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_backend_names_the_variable() {
        let err = GatewayError::MissingBackend;
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "BACKEND_URL is not configured");
    }

    #[test]
    fn payload_limit_maps_to_413() {
        let err = GatewayError::PayloadTooLarge { limit: 10 };
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.kind(), "payload_too_large");
    }

    #[test]
    fn invalid_path_is_a_client_error() {
        let err = GatewayError::InvalidPath;
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "invalid request path");
    }

    #[tokio::test]
    async fn renders_json_message() {
        let response = GatewayError::MissingBackend.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()[axum::http::header::CONTENT_TYPE],
            "application/json"
        );

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["message"], "BACKEND_URL is not configured");
    }
}
