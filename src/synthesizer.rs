//! Response Synthesizer
//!
//! Turns structured weather data or retrieved document text into a short
//! natural-language reply. Weather and grounded replies always produce text:
//! a provider failure falls back to a fixed or templated sentence.

use std::sync::Arc;

use tracing::{error, instrument};

use crate::error::LlmError;
use crate::llm::{ChatModel, CompletionRequest};
use crate::models::{ChatMessage, WeatherSnapshot};

const WEATHER_STYLE_PROMPT: &str = r#"
You are a friendly Weather Assistant.

GUIDELINES:
- Use the provided JSON weather data to answer the user's specific question
- For activity-based questions (e.g., "Can I play cricket?", "Should I carry an umbrella?"):
  * Analyze relevant weather factors (rain, wind, temperature)
  * Provide actionable advice
- Keep responses concise, friendly, and use emojis appropriately
- Write in natural language - DO NOT mention "JSON", "data", or technical terms
- Focus on what matters to the user based on their query
- Use temperature in Celsius by default

RESPONSE STYLE:
- Current weather: Brief and informative
- Forecast: Highlight key changes or notable conditions
- Activity advice: Clear recommendation with reasoning
"#;

const GROUNDED_PROMPT: &str = "You are a Weather Intelligence Expert. Your goal is to answer questions \
using ONLY the provided context from research documents. \n\n\
RULES:\n\
1. If the answer is NOT in the context, say: 'I'm sorry, my current documents \
do not contain information on that specific topic.'\n\
2. Do not use outside knowledge.\n\
3. Keep the tone professional and the answer concise (under 4 sentences).\n\
4. Do not mention 'chunks' or 'files'.";

const SUMMARY_PROMPT: &str = "You are a professional scribe. Summarize the following chat in exactly 2 sentences. \
Focus on locations and technical topics mentioned. No preamble.";

pub const GROUNDED_FAILURE_REPLY: &str = "I had trouble processing that document search.";

const WEATHER_TEMPERATURE: f32 = 0.3;
const GROUNDED_TEMPERATURE: f32 = 0.2;
const SUMMARY_TEMPERATURE: f32 = 0.3;

/// Separator between retrieved context passages
const CONTEXT_SEPARATOR: &str = "\n---\n";

pub struct ResponseSynthesizer {
    /// Writes weather replies
    weather_model: Arc<dyn ChatModel>,
    /// Writes grounded answers and summaries
    synthesis_model: Arc<dyn ChatModel>,
}

impl ResponseSynthesizer {
    pub fn new(weather_model: Arc<dyn ChatModel>, synthesis_model: Arc<dyn ChatModel>) -> Self {
        Self {
            weather_model,
            synthesis_model,
        }
    }

    pub(crate) fn weather_prompt(query: &str, snapshot: &WeatherSnapshot) -> String {
        format!(
            "User Query: {query}\n\nWeather Data: {}",
            snapshot.to_prompt_json()
        )
    }

    /// Conversational weather reply, templated from `snapshot` on failure
    #[instrument(skip(self, snapshot), fields(location = %snapshot.location))]
    pub async fn weather_reply(&self, query: &str, snapshot: &WeatherSnapshot) -> String {
        let request = CompletionRequest::new(Self::weather_prompt(query, snapshot))
            .with_system(WEATHER_STYLE_PROMPT)
            .with_temperature(WEATHER_TEMPERATURE);

        match self.weather_model.complete(request).await {
            Ok(reply) => reply,
            Err(e) => {
                error!("Failed to generate conversational response: {}", e);
                snapshot.fallback_summary()
            }
        }
    }

    /// Answer `query` strictly from `context`
    #[instrument(skip(self, context))]
    pub async fn grounded_answer(&self, query: &str, context: &[String]) -> String {
        let raw_context = context.join(CONTEXT_SEPARATOR);
        let request = CompletionRequest::new(format!(
            "CONTEXT:\n{raw_context}\n\nUSER QUESTION: {query}"
        ))
        .with_system(GROUNDED_PROMPT)
        .with_temperature(GROUNDED_TEMPERATURE);

        match self.synthesis_model.complete(request).await {
            Ok(reply) => reply,
            Err(e) => {
                error!("Synthesis error: {}", e);
                GROUNDED_FAILURE_REPLY.to_string()
            }
        }
    }

    /// Two-sentence summary of a conversation
    pub async fn summarize(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let history = messages
            .iter()
            .map(|m| format!("{}: {}", m.role, m.content))
            .collect::<Vec<_>>()
            .join("\n");

        let request = CompletionRequest::new(history)
            .with_system(SUMMARY_PROMPT)
            .with_temperature(SUMMARY_TEMPERATURE);

        self.synthesis_model.complete(request).await
    }
}
