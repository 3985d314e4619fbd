//! Normalized live weather data
//!
//! Every value is already a display string with its unit, so a snapshot is
//! meant to be shown or handed to the synthesizer, not computed with.

use serde::{Deserialize, Serialize};

/// Placeholder for values the provider did not send
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// "Name, Country"
    pub location: String,
    pub local_time: String,
    pub current: CurrentConditions,
    /// One entry per forecast day, in provider order
    pub forecast: Vec<DailyForecast>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temp: String,
    pub feels_like: String,
    pub condition: String,
    pub wind: String,
    pub wind_direction: String,
    pub humidity: String,
    pub cloud_cover: String,
    pub uv_index: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: String,
    pub max_temp: String,
    pub min_temp: String,
    pub avg_temp: String,
    pub condition: String,
    pub rain_chance: String,
    pub max_wind: String,
}

impl WeatherSnapshot {
    /// Pretty JSON embedded in the synthesis prompt
    #[must_use]
    pub fn to_prompt_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.fallback_summary())
    }

    /// One-line reply used when synthesis is unavailable
    #[must_use]
    pub fn fallback_summary(&self) -> String {
        format!(
            "Weather in {}: {}, {}.",
            self.location, self.current.temp, self.current.condition
        )
    }
}

#[cfg(test)]
pub(crate) fn sample_snapshot() -> WeatherSnapshot {
    WeatherSnapshot {
        location: "Bengaluru, India".to_string(),
        local_time: "2026-10-14 09:30".to_string(),
        current: CurrentConditions {
            temp: "24.1°C".to_string(),
            feels_like: "25.3°C".to_string(),
            condition: "Patchy rain nearby".to_string(),
            wind: "11.2 kph".to_string(),
            wind_direction: "WSW".to_string(),
            humidity: "78%".to_string(),
            cloud_cover: "62%".to_string(),
            uv_index: "5.0".to_string(),
        },
        forecast: vec![DailyForecast {
            date: "2026-10-14".to_string(),
            max_temp: "27.8°C".to_string(),
            min_temp: "19.9°C".to_string(),
            avg_temp: "23.0°C".to_string(),
            condition: "Moderate rain".to_string(),
            rain_chance: "86%".to_string(),
            max_wind: "18.4 kph".to_string(),
        }],
    }
}
