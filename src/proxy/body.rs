//! Forwarded request body.
//!
//! The inbound payload is classified once, then serialized per variant.
//! Only JSON objects and arrays count as structured; scalars, form payloads
//! and anything else travel as the bytes the client sent.

use axum::http::{HeaderValue, Method};
use bytes::Bytes;
use serde_json::Value;

/// Body of a forwarded request.
#[derive(Debug, Clone, PartialEq)]
pub enum ForwardBody {
    /// No body is sent upstream.
    Empty,
    /// UTF-8 payload forwarded verbatim.
    Text(String),
    /// Parsed JSON object or array, re-serialized on the way out.
    Structured(Value),
    /// Payload that is not valid UTF-8, forwarded verbatim.
    Binary(Bytes),
}

impl ForwardBody {
    /// Classify a buffered inbound body.
    pub fn from_inbound(content_type: Option<&HeaderValue>, bytes: Bytes) -> Self {
        if bytes.is_empty() {
            return ForwardBody::Empty;
        }

        if content_type.is_some_and(is_json) {
            if let Ok(value @ (Value::Object(_) | Value::Array(_))) =
                serde_json::from_slice::<Value>(&bytes)
            {
                return ForwardBody::Structured(value);
            }
        }

        match String::from_utf8(bytes.to_vec()) {
            Ok(text) => ForwardBody::Text(text),
            Err(_) => ForwardBody::Binary(bytes),
        }
    }

    /// Serialize for the wire. `None` means no body at all.
    pub fn into_bytes(self) -> Option<Bytes> {
        match self {
            ForwardBody::Empty => None,
            ForwardBody::Text(text) => Some(Bytes::from(text)),
            ForwardBody::Structured(value) => Some(Bytes::from(value.to_string())),
            ForwardBody::Binary(bytes) => Some(bytes),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ForwardBody::Empty)
    }
}

/// `GET` and `HEAD` never carry a body upstream; theirs is not even read.
pub fn method_carries_body(method: &Method) -> bool {
    *method != Method::GET && *method != Method::HEAD
}

/// `application/json` and `+json` suffixed types, parameters ignored.
fn is_json(value: &HeaderValue) -> bool {
    let Ok(raw) = value.to_str() else {
        return false;
    };
    let essence = raw.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}
