//! Request handling core
//!
//! [`Assistant`] owns every component and implements the two inbound
//! operations: answering a chat query and summarizing a conversation.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::config::AssistantConfig;
use crate::extractor::EntityExtractor;
use crate::intent::IntentRouter;
use crate::knowledge::KnowledgeLookup;
use crate::llm::{ChatModel, GeminiClient, KnowledgeModel, OpenAiClient};
use crate::models::{ChatMessage, Intent, Reply, Source};
use crate::orchestrator::WeatherOrchestrator;
use crate::session::SessionStore;
use crate::summary_log::SummaryLog;
use crate::synthesizer::ResponseSynthesizer;
use crate::weather::{WeatherApiClient, WeatherProvider};
use crate::Result;

pub const NO_CITY_REPLY: &str =
    "I couldn't identify a specific city. Which city are you asking about?";

pub const NOTHING_TO_SUMMARIZE: &str = "No significant conversation to summarize.";

/// External services the assistant talks to
pub struct Providers {
    /// Routing, extraction and weather replies
    pub chat: Arc<dyn ChatModel>,
    /// Grounded answers and summaries
    pub synthesis: Arc<dyn ChatModel>,
    /// Document search and plain chat
    pub knowledge: Arc<dyn KnowledgeModel>,
    pub weather: Arc<dyn WeatherProvider>,
}

impl Providers {
    /// Build the production clients
    pub fn from_config(config: &AssistantConfig) -> Result<Self> {
        let openai = OpenAiClient::new(&config.openai)?;
        let synthesis = openai.with_model(config.openai.synthesis_model.clone());
        Ok(Self {
            chat: Arc::new(openai),
            synthesis: Arc::new(synthesis),
            knowledge: Arc::new(GeminiClient::new(&config.gemini)?),
            weather: Arc::new(WeatherApiClient::new(&config.weather)?),
        })
    }
}

pub struct Assistant {
    router: IntentRouter,
    orchestrator: WeatherOrchestrator,
    knowledge: KnowledgeLookup,
    synthesizer: Arc<ResponseSynthesizer>,
    sessions: SessionStore,
    summary_log: SummaryLog,
}

/// Append the remembered city unless the query already names it
#[must_use]
pub fn merge_city(query: &str, city: &str) -> String {
    if query.to_lowercase().contains(&city.to_lowercase()) {
        query.to_string()
    } else {
        format!("{query} in {city}")
    }
}

impl Assistant {
    pub fn new(providers: Providers, store_id: Option<String>, summary_log: SummaryLog) -> Self {
        let synthesizer = Arc::new(ResponseSynthesizer::new(
            providers.chat.clone(),
            providers.synthesis,
        ));

        Self {
            router: IntentRouter::new(providers.chat.clone()),
            orchestrator: WeatherOrchestrator::new(
                EntityExtractor::new(providers.chat),
                providers.weather,
                synthesizer.clone(),
            ),
            knowledge: KnowledgeLookup::new(providers.knowledge, store_id, synthesizer.clone()),
            synthesizer,
            sessions: SessionStore::new(),
            summary_log,
        }
    }

    /// Wire the production clients from configuration
    pub fn from_config(config: &AssistantConfig) -> Result<Self> {
        let providers = Providers::from_config(config)?;
        if !config.has_file_search() {
            tracing::warn!("GEMINI_STORE_ID is not set; knowledge lookup runs in chat-only mode");
        }
        Ok(Self::new(
            providers,
            config.gemini.store_id.clone(),
            SummaryLog::new(config.server.summary_log_path.clone()),
        ))
    }

    #[must_use]
    pub fn knowledge_mode(&self) -> &'static str {
        self.knowledge.mode()
    }

    /// Answer one chat query within a session
    #[instrument(skip(self))]
    pub async fn chat(&self, session_id: &str, query: &str) -> Reply {
        info!("Received query: {}", query);

        let session = self.sessions.session(session_id);
        let mut context = session.lock().await;

        let classification = self.router.classify(query).await;
        let city = context.resolve(classification.city.as_deref());

        match classification.intent {
            Intent::Weather => {
                let Some(city) = city else {
                    return Reply::new(NO_CITY_REPLY, Source::System);
                };
                let enhanced_query = merge_city(query, &city);
                let response = self.orchestrator.get_weather(&enhanced_query).await;
                Reply::new(response, Source::LiveWeather)
            }
            Intent::Theory => {
                let response = self.knowledge.answer(query).await;
                Reply::new(response, Source::KnowledgeBase)
            }
        }
    }

    /// Summarize a conversation and append it to the summary log
    pub async fn summarize(&self, messages: &[ChatMessage]) -> Result<String> {
        if messages.len() <= 1 {
            return Ok(NOTHING_TO_SUMMARIZE.to_string());
        }

        let summary = self.synthesizer.summarize(messages).await?;
        self.summary_log.append(&summary).await?;
        Ok(summary)
    }
}
