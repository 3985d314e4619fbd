//! Weather Orchestrator
//!
//! Runs the live-weather flow: extract entities, fetch the forecast, write
//! the reply. Each step has its own fallback sentence, so [`get_weather`]
//! always returns text.
//!
//! [`get_weather`]: WeatherOrchestrator::get_weather

use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::extractor::EntityExtractor;
use crate::synthesizer::ResponseSynthesizer;
use crate::weather::WeatherProvider;

pub const EMPTY_QUERY_REPLY: &str = "Please ask me about the weather in a specific location.";

pub const UNDERSTANDING_FAILURE_REPLY: &str =
    "I'm having trouble understanding your query. Could you rephrase it?";

pub const MISSING_CITY_REPLY: &str = "I couldn't identify a city in your request. \
Could you please specify the location? \
For example: 'weather in London' or 'forecast for Paris'";

pub struct WeatherOrchestrator {
    extractor: EntityExtractor,
    weather: Arc<dyn WeatherProvider>,
    synthesizer: Arc<ResponseSynthesizer>,
}

impl WeatherOrchestrator {
    pub fn new(
        extractor: EntityExtractor,
        weather: Arc<dyn WeatherProvider>,
        synthesizer: Arc<ResponseSynthesizer>,
    ) -> Self {
        Self {
            extractor,
            weather,
            synthesizer,
        }
    }

    /// Answer a weather query
    #[instrument(skip(self))]
    pub async fn get_weather(&self, query: &str) -> String {
        let query = query.trim();
        if query.is_empty() {
            return EMPTY_QUERY_REPLY.to_string();
        }

        let entities = match self.extractor.extract(query).await {
            Ok(entities) => entities,
            Err(e) => {
                error!("Extraction failed: {}", e);
                return UNDERSTANDING_FAILURE_REPLY.to_string();
            }
        };

        let Some(city) = entities.city else {
            info!("No city found in '{}'", query);
            return MISSING_CITY_REPLY.to_string();
        };

        let snapshot = match self.weather.fetch_forecast(&city, entities.days).await {
            Ok(snapshot) => snapshot,
            Err(e) => return e.user_message(&city),
        };

        self.synthesizer.weather_reply(query, &snapshot).await
    }
}
