// ABOUTME: Client-side validation of request parameters before anything is sent.
// ABOUTME: Each check returns the validated value or an OpenAqError describing the problem.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::OpenAqError;

/// Largest identifier the API accepts (signed 32-bit range).
pub const MAX_ID: u32 = i32::MAX as u32;
/// Largest page size the API accepts.
pub const MAX_LIMIT: u32 = 1_000;
/// Largest search radius in meters (25 km).
pub const MAX_RADIUS: u32 = 25_000;

/// A `(latitude, longitude)` pair in WGS 84.
pub type Coordinates = (f64, f64);
/// A `(min_lon, min_lat, max_lon, max_lat)` box in WGS 84.
pub type BoundingBox = (f64, f64, f64, f64);

/// Geospatial filter after validation. The variants are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeoFilter {
    None,
    Radius { coordinates: Coordinates, radius: u32 },
    Bbox(BoundingBox),
}

pub fn id(value: u32) -> Result<u32, OpenAqError> {
    if value == 0 || value > MAX_ID {
        return Err(OpenAqError::IdentifierOutOfBounds(i64::from(value)));
    }
    Ok(value)
}

/// Validate a non-empty list of identifiers.
pub fn ids(name: &str, values: &[u32]) -> Result<(), OpenAqError> {
    if values.is_empty() {
        return Err(OpenAqError::invalid(format!(
            "query parameter {name} must contain at least one id"
        )));
    }
    if let Some(bad) = values.iter().find(|v| id(**v).is_err()) {
        return Err(OpenAqError::invalid(format!(
            "query parameter {name} must be a list of ids between 1 and {MAX_ID}, got {bad}"
        )));
    }
    Ok(())
}

pub fn page(value: u32) -> Result<u32, OpenAqError> {
    if value == 0 {
        return Err(OpenAqError::invalid(
            "page query parameter must be an integer greater than zero, got 0",
        ));
    }
    Ok(value)
}

pub fn limit(value: u32) -> Result<u32, OpenAqError> {
    if value == 0 || value > MAX_LIMIT {
        return Err(OpenAqError::invalid(format!(
            "limit query parameter must be an integer greater than zero and less than or equal to 1,000, got {value}"
        )));
    }
    Ok(value)
}

pub fn radius(value: u32) -> Result<u32, OpenAqError> {
    if value == 0 || value > MAX_RADIUS {
        return Err(OpenAqError::invalid(
            "radius must be an integer greater than zero and at most 25,000 (25km)",
        ));
    }
    Ok(value)
}

pub fn coordinates(value: Coordinates) -> Result<Coordinates, OpenAqError> {
    let (lat, lon) = value;
    if !(-90.0..=90.0).contains(&lat) {
        return Err(OpenAqError::invalid(format!(
            "Latitude must be between -90 and 90, got {lat}"
        )));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(OpenAqError::invalid(format!(
            "Longitude must be between -180 and 180, got {lon}"
        )));
    }
    Ok(value)
}

pub fn bbox(value: BoundingBox) -> Result<BoundingBox, OpenAqError> {
    let (min_lon, min_lat, max_lon, max_lat) = value;
    let lat_range = -90.0..=90.0;
    let lon_range = -180.0..=180.0;

    if !(lat_range.contains(&min_lat) && lat_range.contains(&max_lat)) {
        return Err(OpenAqError::invalid(format!(
            "Latitudes must be between -90 and 90, got {min_lat}, {max_lat}"
        )));
    }
    if !(lon_range.contains(&min_lon) && lon_range.contains(&max_lon)) {
        return Err(OpenAqError::invalid(format!(
            "Longitudes must be between -180 and 180, got {min_lon}, {max_lon}"
        )));
    }
    if min_lon >= max_lon {
        return Err(OpenAqError::invalid(format!(
            "minimum longitude must be less than maximum longitude, got {min_lon} >= {max_lon}"
        )));
    }
    if min_lat >= max_lat {
        return Err(OpenAqError::invalid(format!(
            "minimum latitude must be less than maximum latitude, got {min_lat} >= {max_lat}"
        )));
    }
    Ok(value)
}

/// Validate the combination of geospatial filters.
///
/// Coordinates and radius go together; a bounding box excludes both.
pub fn geospatial(
    coords: Option<Coordinates>,
    radius_m: Option<u32>,
    bounding_box: Option<BoundingBox>,
) -> Result<GeoFilter, OpenAqError> {
    match (coords, radius_m, bounding_box) {
        (None, None, None) => Ok(GeoFilter::None),
        (None, None, Some(b)) => Ok(GeoFilter::Bbox(bbox(b)?)),
        (Some(c), Some(r), None) => Ok(GeoFilter::Radius {
            coordinates: coordinates(c)?,
            radius: radius(r)?,
        }),
        (_, _, Some(_)) => Err(OpenAqError::invalid(
            "bbox cannot be used with coordinates/radius parameters",
        )),
        (Some(_), None, None) => Err(OpenAqError::invalid("coordinates requires radius parameter")),
        (None, Some(_), None) => Err(OpenAqError::invalid("radius requires coordinates parameter")),
    }
}

/// Validate an ISO 3166-1 alpha-2 country code, returning it upper-cased.
pub fn iso(code: &str) -> Result<String, OpenAqError> {
    let upper = code.to_ascii_uppercase();
    if upper.len() != 2 || ISO_CODES.binary_search(&upper.as_str()).is_err() {
        return Err(OpenAqError::invalid(format!(
            "iso value must be a valid ISO-3166-1 alpha-2 country code, got {code}"
        )));
    }
    Ok(upper)
}

/// Country filters are exclusive: either ids or an ISO code.
pub fn countries(countries_id: &[u32], iso_code: Option<&str>) -> Result<Option<String>, OpenAqError> {
    if !countries_id.is_empty() && iso_code.is_some() {
        return Err(OpenAqError::invalid(
            "countries_id and iso cannot be used together",
        ));
    }
    if !countries_id.is_empty() {
        ids("countries_id", countries_id)?;
    }
    iso_code.map(iso).transpose()
}

/// Parse an ISO-8601 date or datetime. Values without an offset are taken as UTC.
pub fn datetime(value: &str) -> Result<DateTime<Utc>, OpenAqError> {
    let trimmed = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    Err(OpenAqError::invalid(format!(
        "expected an ISO-8601 date or datetime, got {value}"
    )))
}

/// Check that a datetime range is not inverted.
pub fn datetime_range(
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Result<(), OpenAqError> {
    if let (Some(from), Some(to)) = (from, to) {
        if to < from {
            return Err(OpenAqError::invalid(format!(
                "datetime_to ({to}) must not be before datetime_from ({from})"
            )));
        }
    }
    Ok(())
}

/// ISO 3166-1 alpha-2 codes, sorted for binary search.
pub(crate) const ISO_CODES: &[&str] = &[
    "AD", "AE", "AF", "AG", "AI", "AL", "AM", "AO", "AQ", "AR", "AS", "AT", "AU", "AW", "AX",
    "AZ", "BA", "BB", "BD", "BE", "BF", "BG", "BH", "BI", "BJ", "BL", "BM", "BN", "BO", "BQ",
    "BR", "BS", "BT", "BV", "BW", "BY", "BZ", "CA", "CC", "CD", "CF", "CG", "CH", "CI", "CK",
    "CL", "CM", "CN", "CO", "CR", "CU", "CV", "CW", "CX", "CY", "CZ", "DE", "DJ", "DK", "DM",
    "DO", "DZ", "EC", "EE", "EG", "EH", "ER", "ES", "ET", "FI", "FJ", "FK", "FM", "FO", "FR",
    "GA", "GB", "GD", "GE", "GF", "GG", "GH", "GI", "GL", "GM", "GN", "GP", "GQ", "GR", "GS",
    "GT", "GU", "GW", "GY", "HK", "HM", "HN", "HR", "HT", "HU", "ID", "IE", "IL", "IM", "IN",
    "IO", "IQ", "IR", "IS", "IT", "JE", "JM", "JO", "JP", "KE", "KG", "KH", "KI", "KM", "KN",
    "KP", "KR", "KW", "KY", "KZ", "LA", "LB", "LC", "LI", "LK", "LR", "LS", "LT", "LU", "LV",
    "LY", "MA", "MC", "MD", "ME", "MF", "MG", "MH", "MK", "ML", "MM", "MN", "MO", "MP", "MQ",
    "MR", "MS", "MT", "MU", "MV", "MW", "MX", "MY", "MZ", "NA", "NC", "NE", "NF", "NG", "NI",
    "NL", "NO", "NP", "NR", "NU", "NZ", "OM", "PA", "PE", "PF", "PG", "PH", "PK", "PL", "PM",
    "PN", "PR", "PS", "PT", "PW", "PY", "QA", "RE", "RO", "RS", "RU", "RW", "SA", "SB", "SC",
    "SD", "SE", "SG", "SH", "SI", "SJ", "SK", "SL", "SM", "SN", "SO", "SR", "SS", "ST", "SV",
    "SX", "SY", "SZ", "TC", "TD", "TF", "TG", "TH", "TJ", "TK", "TL", "TM", "TN", "TO", "TR",
    "TT", "TV", "TW", "TZ", "UA", "UG", "UM", "US", "UY", "UZ", "VA", "VC", "VE", "VG", "VI",
    "VN", "VU", "WF", "WS", "XK", "YE", "YT", "ZA", "ZM", "ZW",
];
