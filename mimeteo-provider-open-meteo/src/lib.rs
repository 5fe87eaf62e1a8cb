//! Forecast provider backed by the Open-Meteo `/forecast` endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};

use mimeteo_core::{
    http::fetch_json,
    model::{Coordinate, ForecastBundle},
    ports::{ForecastPort, PortError},
};

/// Public Open-Meteo API root.
pub const BASE_URL: &str = "https://api.open-meteo.com/v1";

/// Hourly variables requested alongside the current snapshot.
const HOURLY_VARIABLES: &str = "temperature_2m,precipitation,snowfall";
/// Daily aggregates requested alongside the current snapshot.
const DAILY_VARIABLES: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum,snowfall_sum";

/// Forecast lookups against Open-Meteo.
pub struct OpenMeteoForecastPort {
    client: Client,
    base_url: String,
}

impl OpenMeteoForecastPort {
    /// Create a port rooted at `base_url`, e.g. [`BASE_URL`] or a mock server.
    #[must_use]
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { client, base_url }
    }
}

#[async_trait]
impl ForecastPort for OpenMeteoForecastPort {
    async fn forecast(&self, coordinate: Coordinate) -> Result<ForecastBundle, PortError> {
        let latitude = coordinate.latitude.to_string();
        let longitude = coordinate.longitude.to_string();

        tracing::debug!(%coordinate, "fetching forecast");

        let req = self
            .client
            .get(format!("{}/forecast", self.base_url))
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current_weather", "true"),
                ("hourly", HOURLY_VARIABLES),
                ("daily", DAILY_VARIABLES),
                ("timezone", "auto"),
            ]);

        // Fields are all optional, so only a top-level object counts as a forecast.
        let body = fetch_json::<Map<String, Value>>(req).await?;
        let bundle: ForecastBundle = serde_json::from_value(Value::Object(body))?;

        if bundle.current.is_none() || bundle.hourly.is_none() || bundle.daily.is_none() {
            tracing::warn!(
                %coordinate,
                current = bundle.current.is_some(),
                hourly = bundle.hourly.is_some(),
                daily = bundle.daily.is_some(),
                "forecast came back with missing sections"
            );
        }

        Ok(bundle)
    }
}

/// Build the shared forecast port for the service rooted at `base_url`.
#[must_use]
pub fn port(client: Client, base_url: &str) -> Arc<dyn ForecastPort> {
    Arc::new(OpenMeteoForecastPort::with_base_url(client, base_url))
}
