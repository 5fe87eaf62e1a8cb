//! Traits describing provider capabilities and the shared error type.

use async_trait::async_trait;
use reqwest::Error as ReqwestError;
use serde_json::Error as JsonError;

use crate::model::{Coordinate, ForecastBundle, Municipality, MunicipalityId, Region, RegionCode};

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while talking to provider backends.
pub enum PortError {
    /// Transport failed: unreachable host, reset, timeout, or truncated body.
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
    /// Server answered with a non-success status.
    #[error("Upstream returned HTTP {status}")]
    Upstream {
        /// Numeric HTTP status code.
        status: u16,
    },
    /// Response body is not the expected JSON shape.
    #[error("Decode error: {0}")]
    Decode(#[from] JsonError),
    /// No municipality of the region matches the requested name.
    #[error("Municipality {name}/{region} not found")]
    MunicipalityNotFound {
        /// Name as supplied by the caller.
        name: String,
        /// Region that was searched.
        region: RegionCode,
    },
    /// The registry has no centroid for the municipality.
    #[error("No coordinates found for municipality id {id}")]
    CoordinatesNotFound {
        /// Identifier whose metadata came back empty.
        id: MunicipalityId,
    },
}

#[async_trait]
/// Locality registry backend: divisions, municipalities, and centroids.
pub trait LocalityPort: Send + Sync {
    /// List all first-level divisions.
    ///
    /// Entries lacking a code or a name are skipped.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the request or decoding fails.
    async fn regions(&self) -> Result<Vec<Region>, PortError>;

    /// List the municipalities of a region in registry order.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the request or decoding fails.
    async fn municipalities(&self, region: &RegionCode) -> Result<Vec<Municipality>, PortError>;

    /// Fetch the first registered centroid for a municipality.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::CoordinatesNotFound`] when the metadata list is
    /// empty, or another [`PortError`] when the request fails.
    async fn centroid(&self, id: MunicipalityId) -> Result<Coordinate, PortError>;
}

#[async_trait]
/// Weather backend returning the current/hourly/daily bundle.
pub trait ForecastPort: Send + Sync {
    /// Fetch the forecast for a coordinate pair.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the request or decoding fails.
    async fn forecast(&self, coordinate: Coordinate) -> Result<ForecastBundle, PortError>;
}
