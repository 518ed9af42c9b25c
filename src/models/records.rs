// ABOUTME: Top-level records returned in the `results` list of each endpoint.
// ABOUTME: One struct per resource; optional and list fields tolerate omission.

use serde::{Deserialize, Serialize};

use super::common::{
    Bbox, CountryBase, Coordinates, Coverage, Datetime, InstrumentBase, LatestValue, LicenseBase,
    ManufacturerBase, OwnerBase, OwnerEntity, ParameterBase, Period, ProviderBase, SensorBase,
    Summary,
};

/// A monitoring site and the sensors installed there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: u32,
    pub name: Option<String>,
    pub locality: Option<String>,
    pub timezone: String,
    pub country: CountryBase,
    pub owner: OwnerBase,
    pub provider: ProviderBase,
    pub is_mobile: bool,
    pub is_monitor: bool,
    #[serde(default)]
    pub instruments: Vec<InstrumentBase>,
    #[serde(default)]
    pub sensors: Vec<SensorBase>,
    pub coordinates: Option<Coordinates>,
    pub licenses: Option<Vec<LicenseBase>>,
    /// `[min_lon, min_lat, max_lon, max_lat]`.
    pub bounds: [f64; 4],
    /// Meters from the query point, for radius searches.
    pub distance: Option<f64>,
    pub datetime_first: Option<Datetime>,
    pub datetime_last: Option<Datetime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sensor {
    pub id: u32,
    pub name: String,
    pub parameter: ParameterBase,
    pub datetime_first: Option<Datetime>,
    pub datetime_last: Option<Datetime>,
    pub coverage: Option<Coverage>,
    pub latest: Option<LatestValue>,
    pub summary: Option<Summary>,
}

/// One value, raw or aggregated over `period`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub period: Period,
    pub value: f64,
    pub parameter: ParameterBase,
    /// Present for mobile locations.
    pub coordinates: Option<Coordinates>,
    pub summary: Option<Summary>,
    pub coverage: Option<Coverage>,
}

/// Latest value per sensor, from the `/latest` endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Latest {
    pub datetime: Datetime,
    pub value: f64,
    pub coordinates: Option<Coordinates>,
    pub sensors_id: u32,
    pub locations_id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: u32,
    pub name: String,
    pub source_name: String,
    pub export_prefix: Option<String>,
    pub license: Option<serde_json::Value>,
    pub datetime_added: Option<String>,
    pub datetime_first: Option<String>,
    pub datetime_last: Option<String>,
    pub owner_entity: OwnerEntity,
    #[serde(default)]
    pub parameters: Vec<ParameterBase>,
    pub bbox: Option<Bbox>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub id: u32,
    pub name: String,
    pub units: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub id: u32,
    pub code: String,
    pub name: String,
    pub datetime_first: Option<String>,
    pub datetime_last: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterBase>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    pub id: u32,
    pub name: String,
    pub is_monitor: bool,
    pub manufacturer: ManufacturerBase,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manufacturer {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub instruments: Vec<InstrumentBase>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: u32,
    pub name: String,
}

/// Terms a data source is published under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct License {
    pub id: u32,
    pub name: String,
    pub commercial_use_allowed: bool,
    pub attribution_required: bool,
    pub share_alike_required: bool,
    pub modification_allowed: bool,
    pub redistribution_allowed: bool,
    pub source_url: Option<String>,
}
