// ABOUTME: reqwest-backed transports for the async and blocking clients.
// ABOUTME: Timeouts and connection pooling come from ClientConfig.

use async_trait::async_trait;

use super::{BlockingTransport, RawResponse, Transport};
use crate::config::ClientConfig;
use crate::error::OpenAqError;
use crate::query::QueryParams;

/// Async HTTP transport using a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, OpenAqError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .build()?;
        Ok(Self { http })
    }

    /// Wrap an existing client.
    pub fn from_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        url: &str,
        query: &QueryParams,
        headers: &[(String, String)],
    ) -> Result<RawResponse, OpenAqError> {
        let mut request = self.http.get(url).query(query.pairs());
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.text().await?;

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

/// Blocking HTTP transport using `reqwest::blocking::Client`.
///
/// Must not be created or dropped from inside an async runtime.
#[derive(Debug, Clone)]
pub struct BlockingReqwestTransport {
    http: reqwest::blocking::Client,
}

impl BlockingReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, OpenAqError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .build()?;
        Ok(Self { http })
    }
}

impl BlockingTransport for BlockingReqwestTransport {
    fn send(
        &self,
        url: &str,
        query: &QueryParams,
        headers: &[(String, String)],
    ) -> Result<RawResponse, OpenAqError> {
        let mut request = self.http.get(url).query(query.pairs());
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send()?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.text()?;

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}
