// ABOUTME: Extracts the x-ratelimit-* response headers the server reports.
// ABOUTME: Values stay raw strings; parsing happens at reconcile time.

use reqwest::header::HeaderMap;
use tracing::warn;

pub const LIMIT_HEADER: &str = "x-ratelimit-limit";
pub const REMAINING_HEADER: &str = "x-ratelimit-remaining";
pub const RESET_HEADER: &str = "x-ratelimit-reset";

/// Rate limit values reported by the server on a single response.
///
/// Any field may be absent, and present fields may not be numeric. The
/// governors treat non-numeric values as if they were absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimitHeaders {
    pub limit: Option<String>,
    pub remaining: Option<String>,
    pub reset: Option<String>,
}

impl RateLimitHeaders {
    /// Create an empty header set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reported per-window limit.
    pub fn limit(mut self, value: impl ToString) -> Self {
        self.limit = Some(value.to_string());
        self
    }

    /// Set the reported remaining budget.
    pub fn remaining(mut self, value: impl ToString) -> Self {
        self.remaining = Some(value.to_string());
        self
    }

    /// Set the reported seconds until reset.
    pub fn reset(mut self, value: impl ToString) -> Self {
        self.reset = Some(value.to_string());
        self
    }

    /// Pull the rate limit headers out of an HTTP header map.
    pub fn from_header_map(headers: &HeaderMap) -> Self {
        let read = |name: &str| {
            headers
                .get(name)
                .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        };
        Self {
            limit: read(LIMIT_HEADER),
            remaining: read(REMAINING_HEADER),
            reset: read(RESET_HEADER),
        }
    }

    /// True when none of the rate limit headers were present.
    pub fn is_empty(&self) -> bool {
        self.limit.is_none() && self.remaining.is_none() && self.reset.is_none()
    }

    /// Parsed `x-ratelimit-limit`, if present and numeric.
    pub fn parsed_limit(&self) -> Option<f64> {
        parse_number(LIMIT_HEADER, self.limit.as_deref())
    }

    /// Parsed `x-ratelimit-remaining`, if present and numeric.
    pub fn parsed_remaining(&self) -> Option<f64> {
        parse_number(REMAINING_HEADER, self.remaining.as_deref())
    }

    /// Parsed `x-ratelimit-reset` in whole seconds, if present and numeric.
    pub fn parsed_reset_secs(&self) -> Option<u64> {
        parse_number(RESET_HEADER, self.reset.as_deref())
            .filter(|secs| *secs >= 0.0)
            .map(|secs| secs.ceil() as u64)
    }
}

fn parse_number(name: &str, raw: Option<&str>) -> Option<f64> {
    let raw = raw?;
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            warn!(header = name, value = raw, "ignoring malformed rate limit header");
            None
        }
    }
}
