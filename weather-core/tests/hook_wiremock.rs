//! Client data hook against a mock `/api/weather` route.

use std::time::Duration;

use serde_json::json;
use weather_core::{LocationQuery, Phase, WeatherClient, WeatherHook, hook::FETCH_FALLBACK_ERROR};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn snapshot_body(name: &str) -> serde_json::Value {
    let day = json!({
        "date": "lunes",
        "temp_max": 24,
        "temp_min": 12,
        "weather": { "main": "Clear", "description": "cielo claro", "icon": "01d" }
    });

    json!({
        "location": { "name": name, "country": "ES", "lat": 40.4165, "lon": -3.7026 },
        "current": {
            "temp": 22,
            "feels_like": 21,
            "humidity": 35,
            "pressure": 1018,
            "visibility": 10,
            "wind_speed": 15,
            "wind_deg": 250,
            "weather": { "main": "Clear", "description": "cielo claro", "icon": "01d" }
        },
        "forecast": [day.clone(), day.clone(), day.clone(), day.clone(), day]
    })
}

async fn mount_city(server: &MockServer, city: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .and(query_param("city", city))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn loads_snapshot_for_city() {
    let server = MockServer::start().await;
    mount_city(&server, "Madrid", ResponseTemplate::new(200).set_body_json(snapshot_body("Madrid")))
        .await;

    let mut hook = WeatherHook::new(WeatherClient::new(server.uri()));
    hook.set_selector(LocationQuery::city("Madrid"));
    assert!(hook.state().loading());

    let state = hook.settled().await;
    assert_eq!(state.phase, Phase::Success);
    assert!(state.error().is_none());
    let data = state.data().expect("data after success");
    assert_eq!(data.location.name, "Madrid");
    assert_eq!(data.forecast.len(), 5);
}

#[tokio::test]
async fn coordinates_are_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .and(query_param("lat", "35.6762"))
        .and(query_param("lon", "139.6503"))
        .respond_with(ResponseTemplate::new(200).set_body_json(snapshot_body("Tokyo")))
        .expect(1)
        .mount(&server)
        .await;

    let mut hook = WeatherHook::new(WeatherClient::new(server.uri()));
    hook.set_selector(LocationQuery::coordinates(35.6762, 139.6503));

    let state = hook.settled().await;
    assert_eq!(state.data().unwrap().location.name, "Tokyo");
}

#[tokio::test]
async fn server_error_message_is_surfaced() {
    let server = MockServer::start().await;
    mount_city(
        &server,
        "Nowhere",
        ResponseTemplate::new(404).set_body_json(json!({ "error": "city not found" })),
    )
    .await;

    let mut hook = WeatherHook::new(WeatherClient::new(server.uri()));
    hook.set_selector(LocationQuery::city("Nowhere"));

    let state = hook.settled().await;
    assert_eq!(state.phase, Phase::Failed);
    assert!(!state.loading());
    assert_eq!(state.error(), Some("city not found"));
}

#[tokio::test]
async fn error_without_body_uses_fallback() {
    let server = MockServer::start().await;
    mount_city(&server, "Madrid", ResponseTemplate::new(502)).await;

    let mut hook = WeatherHook::new(WeatherClient::new(server.uri()));
    hook.set_selector(LocationQuery::city("Madrid"));

    let state = hook.settled().await;
    assert_eq!(state.error(), Some(FETCH_FALLBACK_ERROR));
}

#[tokio::test]
async fn unchanged_selector_does_not_refetch_but_refetch_does() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(snapshot_body("Madrid")))
        .expect(2)
        .mount(&server)
        .await;

    let mut hook = WeatherHook::new(WeatherClient::new(server.uri()));
    hook.set_selector(LocationQuery::city("Madrid"));
    hook.settled().await;

    hook.set_selector(LocationQuery::city("Madrid"));
    assert_eq!(hook.state().phase, Phase::Success);

    hook.refetch();
    let state = hook.settled().await;
    assert_eq!(state.generation, 2);
    assert_eq!(state.phase, Phase::Success);
}

#[tokio::test]
async fn empty_selector_never_hits_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut hook = WeatherHook::new(WeatherClient::new(server.uri()));
    hook.set_selector(LocationQuery::default());
    hook.refetch();

    assert_eq!(hook.settled().await.phase, Phase::Idle);
}

#[tokio::test]
async fn slow_stale_response_does_not_overwrite_newer_one() {
    let server = MockServer::start().await;
    mount_city(
        &server,
        "Slow",
        ResponseTemplate::new(200)
            .set_body_json(snapshot_body("Slow"))
            .set_delay(Duration::from_millis(400)),
    )
    .await;
    mount_city(&server, "Fast", ResponseTemplate::new(200).set_body_json(snapshot_body("Fast")))
        .await;

    let mut hook = WeatherHook::new(WeatherClient::new(server.uri()));
    hook.set_selector(LocationQuery::city("Slow"));
    hook.set_selector(LocationQuery::city("Fast"));

    let state = hook.settled().await;
    assert_eq!(state.data().unwrap().location.name, "Fast");

    // give the slow response time to land
    tokio::time::sleep(Duration::from_millis(600)).await;

    let state = hook.state();
    assert_eq!(state.phase, Phase::Success);
    assert_eq!(state.data().unwrap().location.name, "Fast");
}
