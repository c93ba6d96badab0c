//! Integration tests for the infrastructure crate
//!
//! Tests cover:
//! - Dashboard loading end-to-end through the weather adapter
//! - Forecast fallback request counts
//! - Error propagation to the application layer

use std::sync::Arc;

use application::{ApplicationError, DashboardService, ForecastSource};
use infrastructure::{WeatherAdapter, WeatherConfig};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_for(server: &MockServer) -> DashboardService {
    let config = WeatherConfig {
        base_url: server.uri(),
        timeout_secs: 5,
        ..WeatherConfig::with_api_key("e2e-key")
    };
    let adapter = WeatherAdapter::new(config).expect("adapter creation should succeed");
    DashboardService::new(Arc::new(adapter))
}

async fn mount_geocoding(server: &MockServer, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "New Delhi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"name": "New Delhi", "lat": 28.6139, "lon": 77.209, "country": "IN"}
        ])))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn mount_current_weather(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "weather": [{"description": "haze"}],
            "main": {"temp": 18.4, "humidity": 63},
            "wind": {"speed": 2.5},
            "visibility": 1500,
            "name": "New Delhi",
            "sys": {"country": "IN"}
        })))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_empty_daily(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/data/2.5/onecall"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"daily": []})))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_interval_forecast(server: &MockServer) {
    // 2025-01-15 00:00, 2025-01-15 12:00, 2025-01-16 03:00 UTC
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("lat", "28.6139"))
        .and(query_param("lon", "77.209"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "list": [
                {"dt": 1736899200, "main": {"temp_min": 8.0, "temp_max": 10.0},
                 "weather": [{"description": "mist"}], "pop": 0.2},
                {"dt": 1736942400, "main": {"temp_min": 19.0, "temp_max": 23.0},
                 "weather": [{"description": "haze"}]},
                {"dt": 1736996400, "main": {"temp_min": 7.5, "temp_max": 9.0},
                 "weather": [{"description": "fog"}], "pop": 0.5}
            ]
        })))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_air_pollution(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/data/2.5/air_pollution"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "list": [{"main": {"aqi": 4}, "components": {"pm2_5": 55.4, "pm10": 100.0}}]
        })))
        .expect(1)
        .mount(server)
        .await;
}

// ============================================================================
// Dashboard End-to-End Tests
// ============================================================================

mod dashboard_tests {
    use super::*;

    #[tokio::test]
    async fn load_falls_back_and_geocodes_once() {
        let server = MockServer::start().await;
        mount_geocoding(&server, 1).await;
        mount_current_weather(&server).await;
        mount_empty_daily(&server).await;
        mount_interval_forecast(&server).await;
        mount_air_pollution(&server).await;

        let service = service_for(&server);
        let dashboard = service.load("New Delhi").await.unwrap();

        assert_eq!(dashboard.city.label(), "New Delhi, IN");
        assert_eq!(dashboard.weather.condition, "haze");
        assert_eq!(dashboard.forecast.source, ForecastSource::AggregatedFallback);
        assert_eq!(dashboard.forecast.days.len(), 2);

        let first = &dashboard.forecast.days[0];
        assert_eq!(first.date.to_string(), "2025-01-15");
        assert!((first.min_temp - 8.0).abs() < f64::EPSILON);
        assert!((first.max_temp - 23.0).abs() < f64::EPSILON);
        assert_eq!(first.condition, "mist");
        assert_eq!(first.precipitation_percent(), Some(10));

        assert_eq!(dashboard.air_quality.index, 150);
        assert_eq!(dashboard.air_quality.location, "New Delhi, IN");
        // Request counts are verified when the server drops
    }

    #[tokio::test]
    async fn forecast_fallback_geocodes_once() {
        let server = MockServer::start().await;
        mount_geocoding(&server, 1).await;
        mount_empty_daily(&server).await;
        mount_interval_forecast(&server).await;

        let service = service_for(&server);
        let forecast = service.forecast_for("New Delhi").await.unwrap();

        assert_eq!(forecast.source, ForecastSource::AggregatedFallback);
        assert_eq!(forecast.days[1].condition, "fog");
    }

    #[tokio::test]
    async fn daily_endpoint_error_falls_back() {
        let server = MockServer::start().await;
        mount_geocoding(&server, 1).await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/onecall"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "cod": 401,
                "message": "Please note that using One Call 3.0 requires a separate subscription"
            })))
            .expect(1)
            .mount(&server)
            .await;
        mount_interval_forecast(&server).await;

        let service = service_for(&server);
        let forecast = service.forecast_for("New Delhi").await.unwrap();

        assert_eq!(forecast.source, ForecastSource::AggregatedFallback);
    }

    #[tokio::test]
    async fn unknown_city_surfaces_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let service = service_for(&server);
        let err = service.forecast_for("Atlantis").await.unwrap_err();

        assert!(matches!(err, ApplicationError::NotFound(_)));
        assert_eq!(
            err.to_string(),
            "City not found: \"Atlantis\". Please check the spelling."
        );
    }

    #[tokio::test]
    async fn rate_limit_aborts_load() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let service = service_for(&server);
        let err = service.load("New Delhi").await.unwrap_err();

        assert!(matches!(err, ApplicationError::RateLimited));
        assert_eq!(err.to_string(), "Rate limit exceeded. Please try again later.");
    }
}
