// ABOUTME: Transport abstraction for talking to the OpenAQ API over HTTP.
// ABOUTME: Defines request/response types, async and blocking traits, and status mapping.

mod http;

pub use http::{BlockingReqwestTransport, ReqwestTransport};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::error;

use crate::error::{ApiError, OpenAqError};
use crate::query::QueryParams;
use crate::ratelimit::RateLimitHeaders;

/// A GET request against an API path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub path: String,
    pub query: QueryParams,
}

impl ApiRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: QueryParams::new(),
        }
    }

    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }
}

/// An HTTP response as received, before status checking or decoding.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Add a header. Invalid names or values are skipped.
    pub fn header(mut self, name: &str, value: impl AsRef<str>) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value.as_ref()),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// The rate limit headers carried by this response.
    pub fn rate_limit_headers(&self) -> RateLimitHeaders {
        RateLimitHeaders::from_header_map(&self.headers)
    }

    pub fn is_success(&self) -> bool {
        (200..400).contains(&self.status)
    }
}

/// Trait for async transport implementations.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a GET request and return the response whatever its status.
    ///
    /// Errors are reserved for failures where no response arrived.
    async fn send(
        &self,
        url: &str,
        query: &QueryParams,
        headers: &[(String, String)],
    ) -> Result<RawResponse, OpenAqError>;
}

/// Trait for blocking transport implementations.
pub trait BlockingTransport: Send + Sync {
    /// Send a GET request and return the response whatever its status.
    fn send(
        &self,
        url: &str,
        query: &QueryParams,
        headers: &[(String, String)],
    ) -> Result<RawResponse, OpenAqError>;
}

/// Map a non-success status code to its [`ApiError`].
pub fn check_response(response: RawResponse) -> Result<RawResponse, ApiError> {
    if response.is_success() {
        return Ok(response);
    }

    error!(status = response.status, body = %response.body, "HTTP request failed");
    let body = response.body;
    Err(match response.status {
        400 => ApiError::BadRequest(body),
        401 => ApiError::NotAuthorized(body),
        403 => ApiError::Forbidden(body),
        404 => ApiError::NotFound(body),
        408 => ApiError::Timeout(body),
        422 => ApiError::Validation(body),
        429 => ApiError::TooManyRequests(body),
        500 => ApiError::Server(body),
        502 => ApiError::BadGateway(body),
        503 => ApiError::ServiceUnavailable(body),
        504 => ApiError::GatewayTimeout(
            "Your request timed out on the server. Consider reducing the complexity of your request."
                .to_string(),
        ),
        status => ApiError::Unexpected { status, body },
    })
}
