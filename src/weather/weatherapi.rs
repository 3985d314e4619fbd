//! WeatherAPI.com response structures and conversion utilities
//!
//! Only the `location`, `current` and `forecast.forecastday[]` subtrees are
//! read; everything else in the payload is dropped during conversion.

use serde::Deserialize;
use serde_json::Value;

use crate::models::snapshot::NOT_AVAILABLE;
use crate::models::{CurrentConditions, DailyForecast, WeatherSnapshot};

/// Forecast endpoint response
#[derive(Debug, Default, Deserialize)]
pub struct ForecastResponse {
    pub location: Option<LocationData>,
    pub current: Option<CurrentData>,
    pub forecast: Option<ForecastData>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LocationData {
    pub name: Option<Value>,
    pub country: Option<Value>,
    pub localtime: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Condition {
    pub text: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CurrentData {
    pub temp_c: Option<Value>,
    pub feelslike_c: Option<Value>,
    pub condition: Option<Condition>,
    pub wind_kph: Option<Value>,
    pub wind_dir: Option<Value>,
    pub humidity: Option<Value>,
    pub cloud: Option<Value>,
    pub uv: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ForecastData {
    #[serde(default)]
    pub forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ForecastDay {
    pub date: Option<Value>,
    pub day: Option<DayData>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DayData {
    pub maxtemp_c: Option<Value>,
    pub mintemp_c: Option<Value>,
    pub avgtemp_c: Option<Value>,
    pub condition: Option<Condition>,
    pub daily_chance_of_rain: Option<Value>,
    pub maxwind_kph: Option<Value>,
}

/// Render a raw JSON scalar, falling back to `default` when absent
fn display_or(value: Option<&Value>, default: &str) -> String {
    match value {
        None | Some(Value::Null) => default.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn display(value: Option<&Value>) -> String {
    display_or(value, NOT_AVAILABLE)
}

fn with_unit(value: Option<&Value>, unit: &str) -> String {
    format!("{}{unit}", display(value))
}

fn condition_text(condition: Option<&Condition>) -> String {
    display(condition.and_then(|c| c.text.as_ref()))
}

impl From<&CurrentData> for CurrentConditions {
    fn from(current: &CurrentData) -> Self {
        Self {
            temp: with_unit(current.temp_c.as_ref(), "°C"),
            feels_like: with_unit(current.feelslike_c.as_ref(), "°C"),
            condition: condition_text(current.condition.as_ref()),
            wind: with_unit(current.wind_kph.as_ref(), " kph"),
            wind_direction: display(current.wind_dir.as_ref()),
            humidity: with_unit(current.humidity.as_ref(), "%"),
            cloud_cover: with_unit(current.cloud.as_ref(), "%"),
            uv_index: display(current.uv.as_ref()),
        }
    }
}

impl From<&ForecastDay> for DailyForecast {
    fn from(forecast_day: &ForecastDay) -> Self {
        let day = forecast_day.day.as_ref();

        Self {
            date: display(forecast_day.date.as_ref()),
            max_temp: with_unit(day.and_then(|d| d.maxtemp_c.as_ref()), "°C"),
            min_temp: with_unit(day.and_then(|d| d.mintemp_c.as_ref()), "°C"),
            avg_temp: with_unit(day.and_then(|d| d.avgtemp_c.as_ref()), "°C"),
            condition: condition_text(day.and_then(|d| d.condition.as_ref())),
            rain_chance: with_unit(day.and_then(|d| d.daily_chance_of_rain.as_ref()), "%"),
            max_wind: with_unit(day.and_then(|d| d.maxwind_kph.as_ref()), " kph"),
        }
    }
}

impl From<ForecastResponse> for WeatherSnapshot {
    fn from(response: ForecastResponse) -> Self {
        let location = response.location.unwrap_or_default();
        let current = response.current.unwrap_or_default();
        let forecast = response.forecast.unwrap_or_default();

        Self {
            location: format!(
                "{}, {}",
                display_or(location.name.as_ref(), "Unknown"),
                display_or(location.country.as_ref(), "Unknown")
            ),
            local_time: display(location.localtime.as_ref()),
            current: CurrentConditions::from(&current),
            forecast: forecast.forecastday.iter().map(DailyForecast::from).collect(),
        }
    }
}
