// ABOUTME: Generic response envelope with pagination metadata.
// ABOUTME: Every endpoint returns { meta, results } around a list of records.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::records::{
    Country, Instrument, Latest, License, Location, Manufacturer, Measurement, Owner, Parameter,
    Provider, Sensor,
};
use crate::error::OpenAqError;

/// Metadata returned alongside every result page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Meta {
    pub name: String,
    pub website: String,
    pub page: u32,
    pub limit: u32,
    pub found: Option<Found>,
}

/// Total record count. Large result sets report a lower bound such as `">1000"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Found {
    Count(u64),
    Text(String),
}

impl Found {
    /// The exact count, if the server reported one.
    pub fn exact(&self) -> Option<u64> {
        match self {
            Found::Count(n) => Some(*n),
            Found::Text(text) => text.trim().parse().ok(),
        }
    }

    /// The smallest count consistent with the reported value.
    pub fn at_least(&self) -> Option<u64> {
        match self {
            Found::Count(n) => Some(*n),
            Found::Text(text) => text.trim().trim_start_matches('>').trim().parse().ok(),
        }
    }
}

/// A page of results from any endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response<T> {
    pub meta: Meta,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T: DeserializeOwned> Response<T> {
    /// Decode a response body.
    pub fn from_json(body: &str) -> Result<Self, OpenAqError> {
        Ok(serde_json::from_str(body)?)
    }
}

impl<T: Serialize> Response<T> {
    /// Serialize back to the API's camelCase JSON.
    pub fn to_json(&self) -> Result<String, OpenAqError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<T> Response<T> {
    pub fn first(&self) -> Option<&T> {
        self.results.first()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl<T> IntoIterator for Response<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

pub type LocationsResponse = Response<Location>;
pub type SensorsResponse = Response<Sensor>;
pub type MeasurementsResponse = Response<Measurement>;
pub type LatestResponse = Response<Latest>;
pub type ProvidersResponse = Response<Provider>;
pub type ParametersResponse = Response<Parameter>;
pub type CountriesResponse = Response<Country>;
pub type InstrumentsResponse = Response<Instrument>;
pub type ManufacturersResponse = Response<Manufacturer>;
pub type OwnersResponse = Response<Owner>;
pub type LicensesResponse = Response<License>;
