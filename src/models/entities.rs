//! Location and forecast horizon extracted from a weather query

use serde::Deserialize;
use serde_json::Value;

use super::normalize_city;

/// Default forecast horizon when the query has no time reference
pub const DEFAULT_FORECAST_DAYS: u8 = 1;

/// Longest forecast the weather provider serves
pub const MAX_FORECAST_DAYS: u8 = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedEntities {
    /// Spelling-corrected location, absent when the query names none
    pub city: Option<String>,
    /// Forecast horizon, always within `1..=MAX_FORECAST_DAYS`
    pub days: u8,
}

/// JSON shape the extractor is asked to emit
#[derive(Debug, Deserialize)]
pub(crate) struct RawEntities {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub days: Option<Value>,
}

impl ExtractedEntities {
    #[must_use]
    pub fn new(city: Option<String>, days: i64) -> Self {
        Self {
            city: normalize_city(city),
            days: clamp_days(days),
        }
    }
}

/// Clamp a requested horizon into the provider's range
#[must_use]
pub fn clamp_days(days: i64) -> u8 {
    let clamped = days.clamp(i64::from(DEFAULT_FORECAST_DAYS), i64::from(MAX_FORECAST_DAYS));
    u8::try_from(clamped).unwrap_or(DEFAULT_FORECAST_DAYS)
}

impl From<RawEntities> for ExtractedEntities {
    fn from(raw: RawEntities) -> Self {
        // Models occasionally emit 3.0 or "3"; anything unreadable means today
        let days = match raw.days {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
                .unwrap_or(i64::from(DEFAULT_FORECAST_DAYS)),
            Some(Value::String(s)) => s
                .trim()
                .parse()
                .unwrap_or(i64::from(DEFAULT_FORECAST_DAYS)),
            _ => i64::from(DEFAULT_FORECAST_DAYS),
        };
        Self::new(raw.city, days)
    }
}
