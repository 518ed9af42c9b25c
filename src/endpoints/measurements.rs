// ABOUTME: Query builder for a sensor's measurements, raw or aggregated.
// ABOUTME: The data unit and rollup select the path; the time range goes in the query.

use chrono::{DateTime, Utc};

use super::{paging, DEFAULT_LIMIT};
use crate::error::OpenAqError;
use crate::query::{measurements_path, Data, Rollup};
use crate::transport::ApiRequest;
use crate::validate;

/// Start of the range when none is given, midnight UTC.
pub const DEFAULT_DATETIME_FROM: &str = "2016-10-10";

/// Filters for `GET /sensors/{id}/{data}[/{rollup}]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementsQuery {
    pub sensors_id: u32,
    pub data: Option<Data>,
    pub rollup: Option<Rollup>,
    pub datetime_from: Option<DateTime<Utc>>,
    pub datetime_to: Option<DateTime<Utc>>,
    pub page: u32,
    pub limit: u32,
}

impl MeasurementsQuery {
    pub fn new(sensors_id: u32) -> Self {
        Self {
            sensors_id,
            data: None,
            rollup: None,
            datetime_from: validate::datetime(DEFAULT_DATETIME_FROM).ok(),
            datetime_to: None,
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn data(mut self, data: Data) -> Self {
        self.data = Some(data);
        self
    }

    pub fn rollup(mut self, rollup: Rollup) -> Self {
        self.rollup = Some(rollup);
        self
    }

    pub fn datetime_from(mut self, from: DateTime<Utc>) -> Self {
        self.datetime_from = Some(from);
        self
    }

    pub fn datetime_to(mut self, to: DateTime<Utc>) -> Self {
        self.datetime_to = Some(to);
        self
    }

    /// Set the range from ISO-8601 strings. Dates without a time are midnight UTC.
    pub fn between(mut self, from: &str, to: &str) -> Result<Self, OpenAqError> {
        self.datetime_from = Some(validate::datetime(from)?);
        self.datetime_to = Some(validate::datetime(to)?);
        Ok(self)
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Validate the filters and build the request.
    pub fn to_request(&self) -> Result<ApiRequest, OpenAqError> {
        let path = measurements_path(self.sensors_id, self.data, self.rollup)?;
        validate::datetime_range(self.datetime_from, self.datetime_to)?;

        let mut query = paging(self.page, self.limit)?;
        query
            .push_datetime("datetime_from", self.datetime_from)
            .push_datetime("datetime_to", self.datetime_to);

        Ok(ApiRequest::new(path).with_query(query))
    }
}
