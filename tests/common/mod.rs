#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use weather_relay::config::UpstreamConfig;
use weather_relay::open_meteo::{CURRENT_FIELDS, DAILY_FIELDS};
use weather_relay::{AppState, OpenMeteoClient, web};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const GEOCODE_PATH: &str = "/v1/search";
pub const FORECAST_PATH: &str = "/v1/forecast";

pub fn upstream_config(base: &str) -> UpstreamConfig {
    UpstreamConfig {
        geocoding_url: format!("{base}{GEOCODE_PATH}"),
        forecast_url: format!("{base}{FORECAST_PATH}"),
        timeout_seconds: 5,
        ..UpstreamConfig::default()
    }
}

pub fn client_for(server: &MockServer) -> OpenMeteoClient {
    OpenMeteoClient::new(upstream_config(&server.uri())).unwrap()
}

pub fn app_for(server: &MockServer) -> Router {
    web::app(AppState::new(client_for(server)))
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub fn geocode_hit(name: Option<&str>, elevation: Option<f64>) -> Value {
    let mut result = json!({
        "id": 3390760,
        "latitude": -8.05389,
        "longitude": -34.88111,
        "country_code": "BR",
        "timezone": "America/Recife"
    });
    if let Some(name) = name {
        result["name"] = json!(name);
    }
    if let Some(elevation) = elevation {
        result["elevation"] = json!(elevation);
    }
    json!({ "results": [result], "generationtime_ms": 0.8 })
}

pub fn current_body() -> Value {
    json!({
        "latitude": -8.0,
        "longitude": -34.875,
        "timezone": "America/Sao_Paulo",
        "current_units": { "temperature_2m": "°C" },
        "current": {
            "time": "2025-10-19T14:00",
            "interval": 900,
            "temperature_2m": 29.3,
            "relative_humidity_2m": 66,
            "wind_speed_10m": 18.4,
            "weather_code": 3,
            "wind_direction_10m": 121
        }
    })
}

pub fn daily_body(days: usize) -> Value {
    let time: Vec<String> = (0..days).map(|d| format!("2025-10-{:02}", 19 + d)).collect();
    let column = |value: f64| vec![json!(value); days];
    json!({
        "latitude": -8.0,
        "longitude": -34.875,
        "daily_units": { "temperature_2m_max": "°C" },
        "daily": {
            "time": time,
            "temperature_2m_max": column(31.0),
            "temperature_2m_min": column(23.5),
            "precipitation_sum": column(1.2),
            "weathercode": column(80.0),
            "wind_speed_10m_max": column(22.0),
            "wind_direction_10m_dominant": column(110.0)
        }
    })
}

pub async fn mount_geocode(server: &MockServer, city: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .and(query_param("name", city))
        .and(query_param("count", "1"))
        .and(query_param("language", "pt"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_current(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .and(query_param("current", CURRENT_FIELDS))
        .and(query_param("timezone", "America/Sao_Paulo"))
        .respond_with(response)
        .mount(server)
        .await;
}

pub async fn mount_daily(server: &MockServer, days: u8, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .and(query_param("daily", DAILY_FIELDS))
        .and(query_param("forecast_days", days.to_string()))
        .and(query_param("timezone", "America/Sao_Paulo"))
        .respond_with(response)
        .mount(server)
        .await;
}
