// ABOUTME: Query string construction and the typed enums that appear in requests.
// ABOUTME: Lists and tuples are comma-joined; datetimes are sent as RFC 3339.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::OpenAqError;
use crate::validate::{BoundingBox, Coordinates};

/// Ordered query parameters for a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Create an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter.
    pub fn push(&mut self, key: &str, value: impl ToString) -> &mut Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Append a parameter if a value is present.
    pub fn push_opt<T: ToString>(&mut self, key: &str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// Append a list as a single comma-joined value. Empty lists are skipped.
    pub fn push_list<T: ToString>(&mut self, key: &str, values: &[T]) -> &mut Self {
        if !values.is_empty() {
            let joined = values
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            self.push(key, joined);
        }
        self
    }

    /// Append a `lat,lon` pair.
    pub fn push_coordinates(&mut self, key: &str, value: Option<Coordinates>) -> &mut Self {
        if let Some((lat, lon)) = value {
            self.push(key, format!("{lat},{lon}"));
        }
        self
    }

    /// Append a `min_lon,min_lat,max_lon,max_lat` box.
    pub fn push_bbox(&mut self, key: &str, value: Option<BoundingBox>) -> &mut Self {
        if let Some((min_lon, min_lat, max_lon, max_lat)) = value {
            self.push(key, format!("{min_lon},{min_lat},{max_lon},{max_lat}"));
        }
        self
    }

    /// Append a datetime in RFC 3339 form.
    pub fn push_datetime(&mut self, key: &str, value: Option<DateTime<Utc>>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value.to_rfc3339_opts(SecondsFormat::AutoSi, true));
        }
        self
    }

    /// Look up the first value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All parameters in insertion order.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The value sent on the wire.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = OpenAqError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| {
                        let options = $name::ALL.iter().map(|v| v.as_str()).collect::<Vec<_>>();
                        OpenAqError::invalid(format!(
                            "Invalid {}: {}. Must be one of: {}",
                            stringify!($name),
                            s,
                            options.join(", ")
                        ))
                    })
            }
        }
    };
}

wire_enum!(
    /// Sort direction for list endpoints.
    SortOrder { Asc => "asc", Desc => "desc" }
);

wire_enum!(
    /// Base measurement unit for the measurements endpoints.
    Data {
        Measurements => "measurements",
        Hours => "hours",
        Days => "days",
        Years => "years",
    }
);

wire_enum!(
    /// Period the base measurement data is aggregated over.
    Rollup {
        Hourly => "hourly",
        Daily => "daily",
        Monthly => "monthly",
        Yearly => "yearly",
        HourOfDay => "hourofday",
        DayOfWeek => "dayofweek",
        MonthOfYear => "monthofyear",
    }
);

wire_enum!(
    /// Category filter for the parameters endpoint.
    ParameterType { Pollutant => "pollutant", Meteorological => "meteorological" }
);

impl Data {
    /// Rollups the API supports on top of this base unit.
    pub fn rollups(&self) -> &'static [Rollup] {
        match self {
            Data::Measurements => &[Rollup::Hourly, Rollup::Daily],
            Data::Hours => &[
                Rollup::Daily,
                Rollup::Monthly,
                Rollup::Yearly,
                Rollup::HourOfDay,
                Rollup::DayOfWeek,
                Rollup::MonthOfYear,
            ],
            Data::Days => &[
                Rollup::Monthly,
                Rollup::Yearly,
                Rollup::DayOfWeek,
                Rollup::MonthOfYear,
            ],
            Data::Years => &[],
        }
    }
}

/// Build the path for a sensor's measurements.
///
/// A rollup without a base unit is applied to raw measurements.
pub fn measurements_path(
    sensors_id: u32,
    data: Option<Data>,
    rollup: Option<Rollup>,
) -> Result<String, OpenAqError> {
    let sensors_id = crate::validate::id(sensors_id)?;
    let data = data.unwrap_or(Data::Measurements);

    match rollup {
        None => Ok(format!("/sensors/{sensors_id}/{data}")),
        Some(rollup) if data.rollups().contains(&rollup) => {
            Ok(format!("/sensors/{sensors_id}/{data}/{rollup}"))
        }
        Some(rollup) => Err(OpenAqError::invalid(format!(
            "rollup '{rollup}' is not available for data '{data}'"
        ))),
    }
}
