// ABOUTME: Defines all error types for the openaq client using thiserror.
// ABOUTME: HTTP status codes map to ApiError; everything unifies under OpenAqError.

/// Top-level error type for the openaq client.
#[derive(Debug, thiserror::Error)]
pub enum OpenAqError {
    #[error(transparent)]
    RateLimit(#[from] RateLimitExceeded),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("ID values must be between 1 and {max}, got {0}", max = crate::validate::MAX_ID)]
    IdentifierOutOfBounds(i64),

    #[error("API key not set: an API key is required when using the OpenAQ API")]
    ApiKeyMissing,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

impl OpenAqError {
    /// Shorthand for building an `InvalidParameter` error.
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        OpenAqError::InvalidParameter(message.into())
    }
}

/// Raised locally when the request budget is exhausted and auto-wait is off.
///
/// This is a client-side refusal; the request never reached the server. A
/// server-side 429 surfaces as [`ApiError::TooManyRequests`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{}", match .retry_after_secs {
    Some(secs) => format!("Rate limit exceeded. Limit resets in {secs} seconds"),
    None => "Rate limit exceeded".to_string(),
})]
pub struct RateLimitExceeded {
    /// Seconds until the budget is expected to refill, when known.
    pub retry_after_secs: Option<u64>,
}

/// Errors returned by the API as non-success HTTP status codes.
///
/// Every variant carries the response body text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP 400 Bad Request: {0}")]
    BadRequest(String),

    #[error("HTTP 401 Not Authorized: {0}")]
    NotAuthorized(String),

    #[error("HTTP 403 Forbidden: {0}")]
    Forbidden(String),

    #[error("HTTP 404 Not Found: {0}")]
    NotFound(String),

    #[error("HTTP 408 Request Timeout: {0}")]
    Timeout(String),

    #[error("HTTP 422 Validation Error: {0}")]
    Validation(String),

    #[error("HTTP 429 Too Many Requests: {0}")]
    TooManyRequests(String),

    #[error("HTTP 500 Server Error: {0}")]
    Server(String),

    #[error("HTTP 502 Bad Gateway: {0}")]
    BadGateway(String),

    #[error("HTTP 503 Service Unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("HTTP 504 Gateway Timeout: {0}")]
    GatewayTimeout(String),

    #[error("HTTP {status}: {body}")]
    Unexpected { status: u16, body: String },
}

impl ApiError {
    /// The HTTP status code this error was built from.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::NotAuthorized(_) => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::Timeout(_) => 408,
            ApiError::Validation(_) => 422,
            ApiError::TooManyRequests(_) => 429,
            ApiError::Server(_) => 500,
            ApiError::BadGateway(_) => 502,
            ApiError::ServiceUnavailable(_) => 503,
            ApiError::GatewayTimeout(_) => 504,
            ApiError::Unexpected { status, .. } => *status,
        }
    }

    /// True for credential problems (401 and 403).
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::NotAuthorized(_) | ApiError::Forbidden(_))
    }

    /// True for 5xx responses.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status())
    }
}
