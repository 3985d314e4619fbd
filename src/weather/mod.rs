//! Weather Data Gateway
//!
//! Fetches live conditions and forecasts from WeatherAPI.com and reduces the
//! payload to a [`WeatherSnapshot`]. Failures come back as a closed
//! [`WeatherError`] so callers never inspect error text.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, error, info, instrument, warn};

use crate::config::WeatherConfig;
use crate::error::WeatherError;
use crate::models::WeatherSnapshot;
use crate::{AssistantError, Result};

pub mod weatherapi;

/// Source of live weather data
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetch current conditions plus `days` forecast days for `location`
    async fn fetch_forecast(
        &self,
        location: &str,
        days: u8,
    ) -> std::result::Result<WeatherSnapshot, WeatherError>;
}

/// WeatherAPI.com forecast client
pub struct WeatherApiClient {
    /// HTTP client, carries the request timeout
    client: Client,
    api_key: String,
    base_url: String,
}

impl WeatherApiClient {
    /// Create a client from validated configuration
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| AssistantError::config("WEATHER_API_KEY is missing"))?;
        Self::with_timeout(
            api_key,
            config.base_url.clone(),
            Duration::from_secs(config.timeout_seconds.into()),
        )
    }

    pub fn with_timeout(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("Skycast/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AssistantError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn status_to_error(status: StatusCode) -> WeatherError {
        match status.as_u16() {
            400 => WeatherError::CityNotFound,
            401 => WeatherError::Unauthorized,
            403 => WeatherError::Forbidden,
            _ => WeatherError::Network,
        }
    }

    fn transport_error(location: &str, err: &reqwest::Error) -> WeatherError {
        if err.is_timeout() {
            error!("Request timeout for location: {}", location);
            WeatherError::Timeout
        } else {
            error!("Weather API request error: {}", err);
            WeatherError::Network
        }
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiClient {
    #[instrument(skip(self))]
    async fn fetch_forecast(
        &self,
        location: &str,
        days: u8,
    ) -> std::result::Result<WeatherSnapshot, WeatherError> {
        info!("Fetching weather for {} ({} days)", location, days);
        let start_time = Instant::now();

        let days = days.to_string();
        let response = self
            .client
            .get(format!("{}/forecast.json", self.base_url))
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", location),
                ("days", days.as_str()),
                ("aqi", "no"),
                ("alerts", "no"),
            ])
            .send()
            .await
            .map_err(|e| Self::transport_error(location, &e))?;

        let status = response.status();
        if !status.is_success() {
            let category = Self::status_to_error(status);
            match category {
                WeatherError::CityNotFound => warn!("City not found: {}", location),
                _ => error!("Weather API returned {} for {}", status, location),
            }
            return Err(category);
        }

        let body = response
            .text()
            .await
            .map_err(|e| Self::transport_error(location, &e))?;

        let raw: weatherapi::ForecastResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse weather response for {}: {}", location, e);
            WeatherError::InvalidResponse
        })?;

        let snapshot = WeatherSnapshot::from(raw);
        debug!(
            "Normalized {} forecast days in {:.3}s",
            snapshot.forecast.len(),
            start_time.elapsed().as_secs_f64()
        );
        info!("Successfully fetched weather for {}", location);

        Ok(snapshot)
    }
}
