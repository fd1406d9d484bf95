//! Upstream URL construction.
//!
//! # Design Decisions
//! - The `/api/v1` prefix belongs to the gateway, callers only supply the tail
//! - The tail is taken still percent-encoded and copied as-is, so `%2F`, `%3F`
//!   and friends stay inside their segment
//! - Dot segments (literal or percent-encoded) are refused, they would climb
//!   out of the prefix once the URL is normalized
//! - Trailing slashes on the origin and empty path segments are dropped, so the
//!   target never contains `//` after the authority

use std::fmt;

use url::Url;

use crate::error::GatewayError;

/// Version prefix prepended to every forwarded path.
pub const API_VERSION_PREFIX: &str = "api/v1";

/// Normalized backend origin (no trailing slash).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendOrigin {
    raw: String,
    url: Url,
}

impl BackendOrigin {
    /// Normalize a configured origin. Blank or unparseable values yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return None;
        }
        let url = Url::parse(trimmed).ok().filter(|url| !url.cannot_be_a_base())?;
        Some(Self {
            raw: trimmed.to_string(),
            url,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for BackendOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Split the still-encoded path tail into its non-empty segments.
///
/// Fails with [`GatewayError::InvalidPath`] on any segment that a URL parser
/// would resolve as `.` or `..`.
pub fn path_segments(encoded_tail: &str) -> Result<Vec<&str>, GatewayError> {
    encoded_tail
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|segment| {
            if is_unsafe_segment(segment) {
                Err(GatewayError::InvalidPath)
            } else {
                Ok(segment)
            }
        })
        .collect()
}

fn is_unsafe_segment(segment: &str) -> bool {
    // `\` is a path separator for http(s) URLs.
    if segment.contains('\\') {
        return true;
    }
    let lowered = segment.to_ascii_lowercase();
    matches!(
        lowered.as_str(),
        "." | ".." | "%2e" | ".%2e" | "%2e." | "%2e%2e"
    )
}

/// Build `<origin>/api/v1/<segments>[?query]`.
///
/// Segments must come from [`path_segments`]; they are inserted without
/// re-encoding.
pub fn upstream_url(origin: &BackendOrigin, segments: &[&str], query: Option<&str>) -> Url {
    let mut url = origin.url.clone();
    let path = format!(
        "{}/{}/{}",
        url.path().trim_end_matches('/'),
        API_VERSION_PREFIX,
        segments.join("/")
    );
    url.set_path(&path);
    url.set_query(query.filter(|q| !q.is_empty()));
    url
}
