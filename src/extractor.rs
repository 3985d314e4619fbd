//! Entity Extractor
//!
//! Pulls the location and forecast horizon out of a weather query, with
//! common misspellings corrected by the model.

use std::sync::Arc;

use tracing::{error, info};

use crate::error::LlmError;
use crate::llm::{ChatModel, CompletionRequest};
use crate::models::ExtractedEntities;
use crate::models::entities::RawEntities;

const EXTRACTION_PROMPT: &str = r#"
You are an intelligent entity extractor for weather queries.

TASKS:
1. Identify the 'city' from the user's query
2. CORRECT any spelling errors to standard English city names:
   - 'Madhurai' → 'Madurai'
   - 'Banglore' → 'Bengaluru'
   - 'Newyork' → 'New York'
   - 'Dilli' → 'Delhi'
3. Determine 'days' based on query context:
   - Words like 'forecast', 'week', 'coming days', 'next few days' → days = 3
   - Words like 'today', 'current', 'now' → days = 1
   - No time reference → days = 1
4. Return JSON: {"city": "CorrectedCityName", "days": integer}
5. If no city is found, set city to null

EXAMPLES:
- "weather in banglore next week" → {"city": "Bengaluru", "days": 3}
- "temperature in paris" → {"city": "Paris", "days": 1}
- "forecast for newyork" → {"city": "New York", "days": 3}
"#;

/// Why extraction produced nothing usable
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Failed to understand your query: {0}")]
    Provider(#[from] LlmError),

    #[error("Failed to process your query: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub struct EntityExtractor {
    model: Arc<dyn ChatModel>,
}

impl EntityExtractor {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    pub async fn extract(&self, query: &str) -> Result<ExtractedEntities, ExtractionError> {
        let request = CompletionRequest::new(query)
            .with_system(EXTRACTION_PROMPT)
            .with_temperature(0.0)
            .json();

        let reply = self.model.complete(request).await.inspect_err(|e| {
            error!("Extraction error: {}", e);
        })?;

        let raw: RawEntities = serde_json::from_str(&reply).inspect_err(|e| {
            error!("Failed to parse LLM extraction response: {}", e);
        })?;

        let entities = ExtractedEntities::from(raw);
        info!(
            "Extracted from '{}': city={:?}, days={}",
            query, entities.city, entities.days
        );
        Ok(entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::mock::ScriptedChatModel;

    #[tokio::test]
    async fn test_corrected_city_and_days() {
        let model = Arc::new(ScriptedChatModel::replying(
            r#"{"city": "Bengaluru", "days": 3}"#,
        ));
        let extractor = EntityExtractor::new(model.clone());

        let entities = extractor.extract("weather in banglore next week").await.unwrap();
        assert_eq!(entities.city.as_deref(), Some("Bengaluru"));
        assert_eq!(entities.days, 3);

        let request = &model.requests()[0];
        assert_eq!(request.prompt, "weather in banglore next week");
        assert!(request.system.as_deref().unwrap().contains("'Banglore' → 'Bengaluru'"));
        assert!(request.json_mode);
    }

    #[tokio::test]
    async fn test_days_are_clamped() {
        let model = Arc::new(ScriptedChatModel::replying(r#"{"city": "Paris", "days": 14}"#));
        let entities = EntityExtractor::new(model).extract("two week forecast for paris").await.unwrap();
        assert_eq!(entities.days, 7);
    }

    #[tokio::test]
    async fn test_malformed_reply() {
        let model = Arc::new(ScriptedChatModel::replying("Paris"));
        let result = EntityExtractor::new(model).extract("paris").await;
        assert!(matches!(result, Err(ExtractionError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_provider_failure() {
        let model = Arc::new(ScriptedChatModel::failing(LlmError::EmptyResponse));
        let result = EntityExtractor::new(model).extract("paris").await;
        assert!(matches!(result, Err(ExtractionError::Provider(_))));
    }
}
