//! High-level service facade combining the locality and weather providers.

use std::sync::Arc;

use crate::model::{Coordinate, ForecastBundle, Region, RegionCode};
use crate::ports::{ForecastPort, LocalityPort, PortError};

/// Public entry point for listing localities and fetching forecasts.
pub struct MimeteoService {
    locality: Arc<dyn LocalityPort>,
    weather: Arc<dyn ForecastPort>,
}

impl MimeteoService {
    /// Create a new service bound to the provided ports.
    #[must_use]
    pub fn new(locality: Arc<dyn LocalityPort>, weather: Arc<dyn ForecastPort>) -> Self {
        Self { locality, weather }
    }

    /// List all regions.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if the registry request fails.
    pub async fn regions(&self) -> Result<Vec<Region>, PortError> {
        self.locality.regions().await
    }

    /// List municipality names of a region, identifiers dropped.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if the registry request fails.
    pub async fn municipality_names(&self, region: &RegionCode) -> Result<Vec<String>, PortError> {
        let municipalities = self.locality.municipalities(region).await?;
        Ok(municipalities
            .into_iter()
            .map(|municipality| municipality.name)
            .collect())
    }

    /// Resolve a municipality name to its registered centroid.
    ///
    /// The first municipality whose name matches case-insensitively and that
    /// carries an identifier wins. No metadata request is issued when nothing
    /// matches.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::MunicipalityNotFound`] when no name matches,
    /// [`PortError::CoordinatesNotFound`] when the registry has no centroid,
    /// or the transport/decode error of either request.
    pub async fn resolve_coordinates(
        &self,
        name: &str,
        region: &RegionCode,
    ) -> Result<Coordinate, PortError> {
        let municipalities = self.locality.municipalities(region).await?;

        let (id, matched) = municipalities
            .into_iter()
            .filter(|candidate| candidate.matches_name(name))
            .find_map(|candidate| candidate.id.map(|id| (id, candidate.name)))
            .ok_or_else(|| PortError::MunicipalityNotFound {
                name: name.to_owned(),
                region: region.clone(),
            })?;

        tracing::debug!(municipality = %matched, %id, "resolved municipality identifier");

        self.locality.centroid(id).await
    }

    /// Fetch the forecast bundle for a coordinate pair.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if the weather request fails.
    pub async fn forecast(&self, coordinate: Coordinate) -> Result<ForecastBundle, PortError> {
        self.weather.forecast(coordinate).await
    }

    /// Resolve a municipality and fetch its forecast.
    ///
    /// # Errors
    ///
    /// Any error of [`Self::resolve_coordinates`] or [`Self::forecast`].
    pub async fn forecast_for_municipality(
        &self,
        name: &str,
        region: &RegionCode,
    ) -> Result<(Coordinate, ForecastBundle), PortError> {
        let coordinate = self.resolve_coordinates(name, region).await?;
        let bundle = self.forecast(coordinate).await?;
        Ok((coordinate, bundle))
    }
}
