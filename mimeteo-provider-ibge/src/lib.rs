//! Locality provider backed by the IBGE `localidades` and `malhas` APIs.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use mimeteo_core::{
    http::fetch_json,
    model::{Coordinate, Municipality, MunicipalityId, Region, RegionCode},
    ports::{LocalityPort, PortError},
};

/// Public IBGE data service root.
pub const BASE_URL: &str = "https://servicodados.ibge.gov.br/api";

/// State as returned by /v1/localidades/estados
#[derive(Debug, Deserialize)]
struct StateEntry {
    #[serde(rename = "sigla", default, deserialize_with = "mimeteo_core::de::lenient")]
    code: Option<String>,
    #[serde(rename = "nome", default, deserialize_with = "mimeteo_core::de::lenient")]
    name: Option<String>,
    // "id" and the nested "regiao" exist but we don't need them
}

/// Municipality as returned by /v1/localidades/estados/{uf}/municipios
#[derive(Debug, Deserialize)]
struct MunicipalityEntry {
    #[serde(default, deserialize_with = "mimeteo_core::de::lenient")]
    id: Option<u64>,
    #[serde(rename = "nome", default, deserialize_with = "mimeteo_core::de::lenient")]
    name: Option<String>,
}

/// Entry of /v3/malhas/municipios/{id}/metadados
#[derive(Debug, Deserialize)]
struct MeshMetadata {
    #[serde(rename = "centroide", default, deserialize_with = "mimeteo_core::de::lenient")]
    centroid: Option<Centroid>,
}

#[derive(Debug, Deserialize)]
struct Centroid {
    latitude: f64,
    longitude: f64,
}

/// Locality lookups against the IBGE registry.
pub struct IbgeLocalityPort {
    client: Client,
    base_url: String,
}

impl IbgeLocalityPort {
    /// Create a port rooted at `base_url`, e.g. [`BASE_URL`] or a mock server.
    #[must_use]
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { client, base_url }
    }
}

#[async_trait]
impl LocalityPort for IbgeLocalityPort {
    async fn regions(&self) -> Result<Vec<Region>, PortError> {
        let url = format!("{}/v1/localidades/estados", self.base_url);
        tracing::debug!(%url, "listing regions");

        let entries = fetch_json::<Vec<StateEntry>>(self.client.get(url)).await?;

        let total = entries.len();
        let regions: Vec<Region> = entries
            .into_iter()
            .filter_map(|entry| match (entry.code, entry.name) {
                (Some(code), Some(name)) => Some(Region {
                    code: RegionCode(code),
                    name,
                }),
                _ => None,
            })
            .collect();

        if regions.len() < total {
            tracing::warn!(
                skipped = total - regions.len(),
                "skipped region entries without code or name"
            );
        }

        Ok(regions)
    }

    async fn municipalities(&self, region: &RegionCode) -> Result<Vec<Municipality>, PortError> {
        let url = format!("{}/v1/localidades/estados/{region}/municipios", self.base_url);
        tracing::debug!(%url, "listing municipalities");

        let entries = fetch_json::<Vec<MunicipalityEntry>>(self.client.get(url)).await?;

        let total = entries.len();
        let municipalities: Vec<Municipality> = entries
            .into_iter()
            .filter_map(|entry| {
                entry.name.map(|name| Municipality {
                    id: entry.id.map(MunicipalityId),
                    name,
                })
            })
            .collect();

        if municipalities.len() < total {
            tracing::warn!(
                %region,
                skipped = total - municipalities.len(),
                "skipped municipality entries without name"
            );
        }

        Ok(municipalities)
    }

    async fn centroid(&self, id: MunicipalityId) -> Result<Coordinate, PortError> {
        let url = format!("{}/v3/malhas/municipios/{id}/metadados", self.base_url);
        tracing::debug!(%url, "fetching municipality metadata");

        let metadata = fetch_json::<Vec<MeshMetadata>>(self.client.get(url)).await?;

        metadata
            .into_iter()
            .find_map(|entry| entry.centroid)
            .map(|centroid| Coordinate {
                latitude: centroid.latitude,
                longitude: centroid.longitude,
            })
            .ok_or(PortError::CoordinatesNotFound { id })
    }
}

/// Build the shared locality port for the service rooted at `base_url`.
#[must_use]
pub fn port(client: Client, base_url: &str) -> Arc<dyn LocalityPort> {
    Arc::new(IbgeLocalityPort::with_base_url(client, base_url))
}
