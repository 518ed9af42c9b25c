// ABOUTME: Nested value types shared by several records.
// ABOUTME: Short "base" references to other resources, coordinates, timestamps, statistics.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryBase {
    pub id: Option<u32>,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentBase {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManufacturerBase {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerBase {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderBase {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterBase {
    pub id: u32,
    pub name: String,
    pub units: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorBase {
    pub id: u32,
    pub name: String,
    pub parameter: ParameterBase,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseBase {
    pub id: u32,
    pub name: String,
    pub attribution: Option<Attribution>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    pub name: String,
    pub url: Option<String>,
}

/// A point in WGS 84.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A timestamp in UTC and in the location's local offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Datetime {
    pub utc: DateTime<Utc>,
    pub local: DateTime<FixedOffset>,
}

/// Statistical summary of the values behind an aggregate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Summary {
    pub min: Option<f64>,
    pub q02: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub q98: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
    pub sd: Option<f64>,
}

/// How completely observations cover the requested period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coverage {
    pub expected_count: u64,
    pub expected_interval: String,
    pub observed_count: u64,
    pub observed_interval: String,
    pub percent_complete: f64,
    pub percent_coverage: f64,
    pub datetime_from: Option<Datetime>,
    pub datetime_to: Option<Datetime>,
}

/// The time span a measurement value stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub label: String,
    pub interval: String,
    pub datetime_from: Option<Datetime>,
    pub datetime_to: Option<Datetime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerEntity {
    pub id: u32,
    pub name: String,
}

/// GeoJSON geometry bounding a provider's locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bbox {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: serde_json::Value,
}

/// Most recent value reported by a sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestValue {
    pub datetime: Datetime,
    pub value: f64,
    pub coordinates: Option<Coordinates>,
}
