// ABOUTME: Shared test helpers - a scripted mock transport, clocks, and JSON fixtures.
// ABOUTME: The mock implements both the async and blocking transport traits.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use parking_lot::Mutex;

use openaq::query::QueryParams;
use openaq::ratelimit::Clock;
use openaq::transport::{BlockingTransport, RawResponse, Transport};
use openaq::{ClientConfig, OpenAqError};

/// A request as seen by the mock transport.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub at: tokio::time::Instant,
}

impl RecordedRequest {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

type Responder = dyn Fn(usize, &RecordedRequest) -> Result<RawResponse, OpenAqError> + Send + Sync;

/// Transport that answers from a closure and records every request.
#[derive(Clone)]
pub struct MockTransport {
    responder: Arc<Responder>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    latency: Duration,
}

impl MockTransport {
    /// Answer each request with `responder(index, request)`.
    pub fn new(
        responder: impl Fn(usize, &RecordedRequest) -> Result<RawResponse, OpenAqError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self {
            responder: Arc::new(responder),
            requests: Arc::new(Mutex::new(Vec::new())),
            latency: Duration::ZERO,
        }
    }

    /// Always answer 200 with `body` and generous rate limit headers.
    pub fn ok(body: impl Into<String>) -> Self {
        let body = body.into();
        Self::new(move |_, _| Ok(with_limits(RawResponse::new(200, body.clone()), 60, 59, 60)))
    }

    /// Always answer with `status` and `body`.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        Self::new(move |_, _| Ok(RawResponse::new(status, body.clone())))
    }

    /// Delay each async response.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.requests.lock().len()
    }

    fn record(&self, url: &str, query: &QueryParams, headers: &[(String, String)]) -> (usize, RecordedRequest) {
        let request = RecordedRequest {
            url: url.to_string(),
            query: query.pairs().to_vec(),
            headers: headers.to_vec(),
            at: tokio::time::Instant::now(),
        };
        let mut requests = self.requests.lock();
        requests.push(request.clone());
        (requests.len() - 1, request)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(
        &self,
        url: &str,
        query: &QueryParams,
        headers: &[(String, String)],
    ) -> Result<RawResponse, OpenAqError> {
        let (index, request) = self.record(url, query, headers);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        (self.responder)(index, &request)
    }
}

impl BlockingTransport for MockTransport {
    fn send(
        &self,
        url: &str,
        query: &QueryParams,
        headers: &[(String, String)],
    ) -> Result<RawResponse, OpenAqError> {
        let (index, request) = self.record(url, query, headers);
        (self.responder)(index, &request)
    }
}

/// Attach `x-ratelimit-*` headers.
pub fn with_limits(response: RawResponse, limit: u32, remaining: u32, reset: u32) -> RawResponse {
    response
        .header("x-ratelimit-limit", limit.to_string())
        .header("x-ratelimit-remaining", remaining.to_string())
        .header("x-ratelimit-reset", reset.to_string())
}

/// Route `tracing` output to the test harness. Set `RUST_LOG=openaq=debug` to see it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn config() -> ClientConfig {
    config_with(|builder| builder)
}

pub fn config_with(
    customize: impl FnOnce(openaq::config::ClientConfigBuilder) -> openaq::config::ClientConfigBuilder,
) -> ClientConfig {
    init_tracing();
    customize(ClientConfig::builder().api_key("test-key"))
        .build()
        .expect("valid test config")
}

// ============================================================================
// Clocks
// ============================================================================

/// 12:00:10 UTC, ten seconds into a rate limit window.
pub fn ten_past() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 24, 12, 0, 10).unwrap()
}

/// Wall clock that follows tokio's (pausable) time.
pub struct PausedClock {
    origin: DateTime<Utc>,
    start: tokio::time::Instant,
}

impl PausedClock {
    pub fn at(origin: DateTime<Utc>) -> Arc<Self> {
        Arc::new(Self {
            origin,
            start: tokio::time::Instant::now(),
        })
    }
}

impl Clock for PausedClock {
    fn now(&self) -> DateTime<Utc> {
        self.origin + TimeDelta::from_std(self.start.elapsed()).unwrap()
    }
}

/// Clock that only moves when a blocking sleep advances it.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
    slept: Mutex<Vec<Duration>>,
}

impl ManualClock {
    pub fn at(origin: DateTime<Utc>) -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(origin),
            slept: Mutex::new(Vec::new()),
        })
    }

    pub fn slept(&self) -> Vec<Duration> {
        self.slept.lock().clone()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }

    fn sleep_blocking(&self, duration: Duration) {
        self.slept.lock().push(duration);
        *self.now.lock() += TimeDelta::from_std(duration).unwrap();
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn page(results: &str) -> String {
    format!(
        r#"{{"meta": {{"name": "openaq-api", "website": "/", "page": 1, "limit": 100, "found": 1}}, "results": [{results}]}}"#
    )
}

pub const LOCATION: &str = r#"{
    "id": 2178,
    "name": "Del Norte",
    "locality": "Albuquerque",
    "timezone": "America/Denver",
    "country": {"id": 155, "code": "US", "name": "United States"},
    "owner": {"id": 4, "name": "Unknown Governmental Organization"},
    "provider": {"id": 119, "name": "AirNow"},
    "isMobile": false,
    "isMonitor": true,
    "instruments": [{"id": 2, "name": "Government Monitor"}],
    "sensors": [{"id": 3917, "name": "o3 ppm", "parameter": {"id": 10, "name": "o3", "units": "ppm", "displayName": "O₃"}}],
    "coordinates": {"latitude": 35.1353, "longitude": -106.584702},
    "bounds": [-106.584702, 35.1353, -106.584702, 35.1353],
    "distance": null,
    "datetimeFirst": {"utc": "2016-03-06T19:00:00Z", "local": "2016-03-06T12:00:00-07:00"},
    "datetimeLast": {"utc": "2025-01-01T00:00:00Z", "local": "2024-12-31T17:00:00-07:00"}
}"#;

pub const MEASUREMENT: &str = r#"{
    "period": {
        "label": "1 day",
        "interval": "24:00:00",
        "datetimeFrom": {"utc": "2024-01-01T00:00:00Z", "local": "2023-12-31T17:00:00-07:00"},
        "datetimeTo": {"utc": "2024-01-02T00:00:00Z", "local": "2024-01-01T17:00:00-07:00"}
    },
    "value": 0.028,
    "parameter": {"id": 10, "name": "o3", "units": "ppm", "displayName": null},
    "coordinates": null,
    "summary": {"min": 0.01, "median": 0.028, "max": 0.04},
    "coverage": null
}"#;

pub const LATEST: &str = r#"{
    "datetime": {"utc": "2025-02-24T12:00:00Z", "local": "2025-02-24T05:00:00-07:00"},
    "value": 0.031,
    "coordinates": {"latitude": 35.1353, "longitude": -106.584702},
    "sensorsId": 3917,
    "locationsId": 2178
}"#;

pub const OWNER: &str = r#"{"id": 4, "name": "Unknown Governmental Organization"}"#;
