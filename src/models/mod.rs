//! Data models for the Skycast assistant
//!
//! This module contains the core domain models organized by concern:
//! - Intent: routing decision for a user query
//! - Entities: location and forecast horizon extracted from a query
//! - Snapshot: normalized live weather data
//! - Reply: the conversational answer and its source label

pub mod entities;
pub mod intent;
pub mod reply;
pub mod snapshot;

// Re-export all public types for convenient access
pub use entities::ExtractedEntities;
pub use intent::{Intent, IntentClassification};
pub use reply::{ChatMessage, Reply, Source};
pub use snapshot::{CurrentConditions, DailyForecast, WeatherSnapshot};

/// Normalize an LLM-provided location: blank and `"NULL"` mean absent.
#[must_use]
pub fn normalize_city(city: Option<String>) -> Option<String> {
    city.map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("null"))
}
