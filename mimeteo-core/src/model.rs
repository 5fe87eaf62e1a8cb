//! Domain data structures for regions, municipalities, coordinates, and forecasts.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::de::lenient;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Short code of a first-level division, e.g. `SP`.
pub struct RegionCode(pub String);

impl fmt::Display for RegionCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl From<&str> for RegionCode {
    fn from(code: &str) -> Self {
        RegionCode(code.trim().to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A state-level division of the locality registry.
pub struct Region {
    /// Unique short code.
    pub code: RegionCode,
    /// Display name.
    pub name: String,
}

impl fmt::Display for Region {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{} - {}", self.code, self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Registry-assigned identifier of a municipality.
pub struct MunicipalityId(pub u64);

impl fmt::Display for MunicipalityId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A municipality belonging to exactly one region.
pub struct Municipality {
    /// Identifier used when requesting its centroid, if the registry listed one.
    pub id: Option<MunicipalityId>,
    /// Display name, matched case-insensitively during resolution.
    pub name: String,
}

impl Municipality {
    /// Whether `name` refers to this municipality, ignoring case.
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Latitude/longitude pair in decimal degrees.
pub struct Coordinate {
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
}

impl fmt::Display for Coordinate {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Combined forecast document for one coordinate pair.
///
/// Each section is optional. A section that is missing or does not have the
/// expected shape is `None`, which the report functions render as
/// "unavailable" instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastBundle {
    /// Latitude echoed back by the weather service.
    #[serde(default, deserialize_with = "lenient")]
    pub latitude: Option<f64>,
    /// Longitude echoed back by the weather service.
    #[serde(default, deserialize_with = "lenient")]
    pub longitude: Option<f64>,
    /// Timezone resolved by the weather service.
    #[serde(default, deserialize_with = "lenient")]
    pub timezone: Option<String>,
    /// Current snapshot.
    #[serde(default, rename = "current_weather", deserialize_with = "lenient")]
    pub current: Option<CurrentSection>,
    /// Hourly parallel sequences.
    #[serde(default, deserialize_with = "lenient")]
    pub hourly: Option<HourlySection>,
    /// Daily parallel sequences.
    #[serde(default, deserialize_with = "lenient")]
    pub daily: Option<DailySection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Current conditions as reported by the weather service.
pub struct CurrentSection {
    /// Local ISO-8601 timestamp, e.g. `2026-01-01T14:00`.
    #[serde(default)]
    pub time: Option<String>,
    /// Air temperature in °C.
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Wind speed as returned upstream.
    #[serde(default)]
    pub windspeed: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Hourly values, indexed positionally by `time`.
pub struct HourlySection {
    /// Timestamps.
    #[serde(default)]
    pub time: Vec<String>,
    /// Temperature at 2 m.
    #[serde(default)]
    pub temperature_2m: Vec<Option<f64>>,
    /// Precipitation in mm.
    #[serde(default)]
    pub precipitation: Vec<Option<f64>>,
    /// Snowfall in cm.
    #[serde(default)]
    pub snowfall: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Daily aggregates, indexed positionally by `time`.
pub struct DailySection {
    /// Dates (`YYYY-MM-DD`).
    #[serde(default)]
    pub time: Vec<String>,
    /// Maximum temperature.
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
    /// Minimum temperature.
    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,
    /// Precipitation sum in mm.
    #[serde(default)]
    pub precipitation_sum: Vec<Option<f64>>,
    /// Snowfall sum.
    #[serde(default)]
    pub snowfall_sum: Vec<Option<f64>>,
}
