//! Integration tests for `IbgeLocalityPort` using wiremock.

use std::sync::Arc;

use async_trait::async_trait;
use mimeteo_core::{
    Coordinate, ForecastBundle, ForecastPort, LocalityPort, MimeteoService, MunicipalityId,
    PortError, RegionCode,
};
use mimeteo_provider_ibge::IbgeLocalityPort;
use reqwest::Client;
use wiremock::matchers::{method, path, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Forecast port that is never reached by these tests.
struct UnusedWeather;

#[async_trait]
impl ForecastPort for UnusedWeather {
    async fn forecast(&self, _coordinate: Coordinate) -> Result<ForecastBundle, PortError> {
        Ok(ForecastBundle::default())
    }
}

fn port(server: &MockServer) -> IbgeLocalityPort {
    IbgeLocalityPort::with_base_url(Client::new(), server.uri())
}

fn sp_municipalities() -> serde_json::Value {
    serde_json::json!([
        {"id": 3_509_502, "nome": "Campinas"},
        {"id": 3_550_308, "nome": "São Paulo"},
        {"id": 3_548_708, "nome": "São Bernardo do Campo"}
    ])
}

async fn mount_municipalities(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/localidades/estados/SP/municipios"))
        .and(query_param_is_missing("orderBy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sp_municipalities()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_regions_skip_incomplete_entries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/localidades/estados"))
        .and(query_param_is_missing("orderBy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 12, "sigla": "AC", "nome": "Acre", "regiao": {"id": 1, "sigla": "N", "nome": "Norte"}},
            {"id": 27, "nome": "Alagoas"},
            {"id": 16, "sigla": "AP"},
            {"id": 13, "sigla": 13, "nome": "Amazonas"},
            {"id": 35, "sigla": "SP", "nome": "São Paulo"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let regions = port(&server).regions().await.unwrap();

    let labels: Vec<String> = regions.iter().map(ToString::to_string).collect();
    assert_eq!(labels, vec!["AC - Acre", "SP - São Paulo"]);
}

#[tokio::test]
async fn test_regions_upstream_error_carries_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/localidades/estados"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = port(&server).regions().await;

    assert!(
        matches!(result, Err(PortError::Upstream { status: 503 })),
        "expected upstream 503, got {result:?}"
    );
}

#[tokio::test]
async fn test_regions_malformed_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/localidades/estados"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let result = port(&server).regions().await;

    assert!(
        matches!(result, Err(PortError::Decode(_))),
        "expected decode error, got {result:?}"
    );
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    // Nothing listens on the TCP port 1 of the loopback interface.
    let result = IbgeLocalityPort::with_base_url(Client::new(), "http://127.0.0.1:1")
        .regions()
        .await;

    assert!(
        matches!(result, Err(PortError::Network(_))),
        "expected network error, got {result:?}"
    );
}

#[tokio::test]
async fn test_municipalities_keep_registry_order() {
    let server = MockServer::start().await;
    mount_municipalities(&server).await;

    let municipalities = port(&server)
        .municipalities(&RegionCode::from("SP"))
        .await
        .unwrap();

    assert_eq!(municipalities.len(), 3);
    assert_eq!(municipalities[1].id, Some(MunicipalityId(3_550_308)));
    assert_eq!(municipalities[1].name, "São Paulo");
}

#[tokio::test]
async fn test_municipalities_keep_entries_without_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/localidades/estados/SP/municipios"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"nome": "Campinas"},
            {"id": 1, "nome": "Santos"},
            {"id": 2}
        ])))
        .mount(&server)
        .await;

    let municipalities = port(&server)
        .municipalities(&RegionCode::from("SP"))
        .await
        .unwrap();

    let names: Vec<&str> = municipalities.iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(names, vec!["Campinas", "Santos"]);
    assert_eq!(municipalities[0].id, None);
    assert_eq!(municipalities[1].id, Some(MunicipalityId(1)));
}

#[tokio::test]
async fn test_centroid_takes_first_entry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/malhas/municipios/3550308/metadados"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": "3550308", "centroide": {"latitude": -23.567, "longitude": -46.570}},
            {"id": "3550308", "centroide": {"latitude": 0.0, "longitude": 0.0}}
        ])))
        .mount(&server)
        .await;

    let coordinate = port(&server)
        .centroid(MunicipalityId(3_550_308))
        .await
        .unwrap();

    assert_eq!(
        coordinate,
        Coordinate {
            latitude: -23.567,
            longitude: -46.570
        }
    );
}

#[tokio::test]
async fn test_centroid_empty_metadata_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/malhas/municipios/42/metadados"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let result = port(&server).centroid(MunicipalityId(42)).await;

    assert!(
        matches!(result, Err(PortError::CoordinatesNotFound { id: MunicipalityId(42) })),
        "expected not found, got {result:?}"
    );
}

#[tokio::test]
async fn test_resolve_coordinates_is_case_insensitive() {
    let server = MockServer::start().await;
    mount_municipalities(&server).await;

    Mock::given(method("GET"))
        .and(path("/v3/malhas/municipios/3550308/metadados"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"centroide": {"latitude": -23.567, "longitude": -46.570}}
        ])))
        .expect(2)
        .mount(&server)
        .await;

    let service = MimeteoService::new(Arc::new(port(&server)), Arc::new(UnusedWeather));
    let region = RegionCode::from("SP");

    let lower = service.resolve_coordinates("são paulo", &region).await.unwrap();
    let upper = service.resolve_coordinates("SÃO PAULO", &region).await.unwrap();

    assert_eq!(lower, upper);
    assert_eq!(lower.latitude, -23.567);
}

#[tokio::test]
async fn test_resolve_unknown_municipality_issues_no_metadata_request() {
    let server = MockServer::start().await;
    mount_municipalities(&server).await;

    Mock::given(method("GET"))
        .and(path("/v3/malhas/municipios/3550308/metadados"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let service = MimeteoService::new(Arc::new(port(&server)), Arc::new(UnusedWeather));
    let result = service
        .resolve_coordinates("Gotham", &RegionCode::from("SP"))
        .await;

    let err = result.unwrap_err();
    assert!(
        matches!(err, PortError::MunicipalityNotFound { .. }),
        "expected not found, got {err:?}"
    );
    assert_eq!(err.to_string(), "Municipality Gotham/SP not found");
}
