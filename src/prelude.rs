// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use openaq::prelude::*;` to get started quickly.

pub use crate::client::{BlockingOpenAq, OpenAq};
pub use crate::config::{ClientConfig, ClientConfigBuilder};
pub use crate::endpoints::{
    CountriesQuery, LocationsQuery, MeasurementsQuery, PageQuery, ParametersQuery, ProvidersQuery,
};
pub use crate::error::{ApiError, OpenAqError, RateLimitExceeded};
pub use crate::models::{
    Country, Found, Instrument, Latest, License, Location, Manufacturer, Measurement, Meta, Owner,
    Parameter, Provider, Response, Sensor,
};
pub use crate::query::{Data, ParameterType, Rollup, SortOrder};
pub use crate::ratelimit::{BlockingGovernor, RateLimitGovernor, RateLimitSnapshot};
pub use crate::transport::{ApiRequest, BlockingTransport, RawResponse, Transport};
