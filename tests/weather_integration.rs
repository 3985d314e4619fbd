//! Integration tests for WeatherApiClient using wiremock.

use std::time::Duration;

use skycast::{WeatherApiClient, WeatherError, WeatherProvider};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn forecast_body() -> serde_json::Value {
    serde_json::json!({
        "location": {"name": "London", "country": "United Kingdom", "localtime": "2026-10-14 10:00"},
        "current": {
            "temp_c": 12.5,
            "feelslike_c": 10.9,
            "condition": {"text": "Light drizzle"},
            "wind_kph": 18.4,
            "wind_dir": "SW",
            "humidity": 87,
            "cloud": 75,
            "uv": 2.0
        },
        "forecast": {"forecastday": [
            {"date": "2026-10-14", "day": {
                "maxtemp_c": 14.1, "mintemp_c": 9.2, "avgtemp_c": 11.7,
                "condition": {"text": "Patchy rain nearby"},
                "daily_chance_of_rain": 80, "maxwind_kph": 22.3
            }},
            {"date": "2026-10-15", "day": {
                "maxtemp_c": 15.0, "mintemp_c": 8.8, "avgtemp_c": 12.0,
                "condition": {"text": "Sunny"},
                "daily_chance_of_rain": 0, "maxwind_kph": 12.6
            }}
        ]}
    })
}

fn client(server: &MockServer) -> WeatherApiClient {
    WeatherApiClient::with_timeout("test-key", server.uri(), Duration::from_secs(2)).unwrap()
}

async fn mount_status(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_forecast_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("key", "test-key"))
        .and(query_param("q", "London"))
        .and(query_param("days", "2"))
        .and(query_param("aqi", "no"))
        .and(query_param("alerts", "no"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let snapshot = client(&mock_server).fetch_forecast("London", 2).await.unwrap();

    assert_eq!(snapshot.location, "London, United Kingdom");
    assert_eq!(snapshot.local_time, "2026-10-14 10:00");
    assert_eq!(snapshot.current.temp, "12.5°C");
    assert_eq!(snapshot.current.condition, "Light drizzle");
    assert_eq!(snapshot.current.humidity, "87%");
    assert_eq!(snapshot.forecast.len(), 2);
    assert_eq!(snapshot.forecast[1].condition, "Sunny");
    assert_eq!(snapshot.forecast[0].rain_chance, "80%");
}

#[tokio::test]
async fn test_missing_fields_become_not_available() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "location": {"name": "Oslo"},
            "current": {"condition": {}}
        })))
        .mount(&mock_server)
        .await;

    let snapshot = client(&mock_server).fetch_forecast("Oslo", 1).await.unwrap();
    assert_eq!(snapshot.location, "Oslo, Unknown");
    assert_eq!(snapshot.current.temp, "N/A°C");
    assert!(snapshot.forecast.is_empty());
}

#[tokio::test]
async fn test_status_400_is_city_not_found() {
    let mock_server = MockServer::start().await;
    mount_status(&mock_server, 400).await;

    let err = client(&mock_server).fetch_forecast("Atlantis", 1).await.unwrap_err();
    assert_eq!(err, WeatherError::CityNotFound);
    assert!(err.user_message("Atlantis").contains("couldn't find weather data for 'Atlantis'"));
}

#[tokio::test]
async fn test_status_401_is_unauthorized() {
    let mock_server = MockServer::start().await;
    mount_status(&mock_server, 401).await;

    let err = client(&mock_server).fetch_forecast("London", 1).await.unwrap_err();
    assert_eq!(err, WeatherError::Unauthorized);
}

#[tokio::test]
async fn test_status_403_is_forbidden() {
    let mock_server = MockServer::start().await;
    mount_status(&mock_server, 403).await;

    let err = client(&mock_server).fetch_forecast("London", 1).await.unwrap_err();
    assert_eq!(err, WeatherError::Forbidden);
}

#[tokio::test]
async fn test_other_status_is_network_error() {
    let mock_server = MockServer::start().await;
    mount_status(&mock_server, 502).await;

    let err = client(&mock_server).fetch_forecast("London", 1).await.unwrap_err();
    assert_eq!(err, WeatherError::Network);
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(forecast_body())
                .set_delay(Duration::from_millis(800)),
        )
        .mount(&mock_server)
        .await;

    let client =
        WeatherApiClient::with_timeout("test-key", mock_server.uri(), Duration::from_millis(100))
            .unwrap();
    let err = client.fetch_forecast("London", 1).await.unwrap_err();
    assert_eq!(err, WeatherError::Timeout);
}

#[tokio::test]
async fn test_non_json_body_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).fetch_forecast("London", 1).await.unwrap_err();
    assert_eq!(err, WeatherError::InvalidResponse);
}
