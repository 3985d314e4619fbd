//! Intent Router
//!
//! Decides whether a query wants live weather or document knowledge, and
//! picks up a city if one is named. Classification never fails: any provider
//! or parsing problem yields [`IntentClassification::fallback`].

use std::sync::Arc;

use tracing::{debug, warn};

use crate::llm::{ChatModel, CompletionRequest};
use crate::models::IntentClassification;
use crate::models::intent::RawClassification;

const SYSTEM_PROMPT: &str = "You are a precise JSON classifier.";

const FEW_SHOT_EXAMPLES: &str = r#"
Query: "What's the rain like in Seattle?" -> {"intent": "weather", "city": "Seattle"}
Query: "How do cyclones form?" -> {"intent": "theory", "city": null}
Query: "Will it be sunny tomorrow?" -> {"intent": "weather", "city": null}
Query: "Explain humidity according to the docs" -> {"intent": "theory", "city": null}
"#;

pub struct IntentRouter {
    model: Arc<dyn ChatModel>,
}

impl IntentRouter {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    fn prompt(query: &str) -> String {
        format!(
            r#"You are the Routing Brain for a Weather AI. Analyze the user query and determine if they want LIVE weather data or THEORETICAL knowledge from a PDF.

EXAMPLES:
{FEW_SHOT_EXAMPLES}
USER QUERY: "{query}"

RULES:
1. "weather": Use for current/future conditions, forecasts, or city-specific weather checks.
2. "theory": Use for scientific definitions, greetings, or "how it works" questions.
3. "city": Extract the city name if present; otherwise, return null.

Output valid JSON only: {{"intent": "weather" | "theory", "city": string | null}}"#
        )
    }

    /// Classify `query`; single attempt, fallback on any failure
    pub async fn classify(&self, query: &str) -> IntentClassification {
        let request = CompletionRequest::new(Self::prompt(query))
            .with_system(SYSTEM_PROMPT)
            .with_temperature(0.0)
            .json();

        let reply = match self.model.complete(request).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Intent classification failed: {}", e);
                return IntentClassification::fallback();
            }
        };

        match serde_json::from_str::<RawClassification>(&reply) {
            Ok(raw) => {
                let classification = IntentClassification::from(raw);
                debug!(
                    "Classified as {:?} (city: {:?})",
                    classification.intent, classification.city
                );
                classification
            }
            Err(e) => {
                warn!("Classifier returned malformed JSON: {}", e);
                IntentClassification::fallback()
            }
        }
    }
}
