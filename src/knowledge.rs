//! Knowledge Lookup
//!
//! Answers conceptual questions. Greetings are handled locally; everything
//! else goes through an ordered list of retrieval strategies (document
//! search first when a store is configured, then plain chat) and the first
//! text that comes back is rewritten by the grounded synthesizer.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::error::LlmError;
use crate::llm::KnowledgeModel;
use crate::synthesizer::ResponseSynthesizer;

const GREETINGS: [&str; 9] = [
    "hi",
    "hello",
    "hey",
    "hola",
    "namaste",
    "thanks",
    "thank you",
    "bye",
    "good morning",
];

pub const GREETING_REPLY: &str = "Hello! 👋 I am your Weather Intelligence Assistant. \
Ask me for a **Forecast** (e.g., 'London Weather') or a **Concept** (e.g., 'What is a cyclone?').";

pub const RATE_LIMIT_REPLY: &str = "⚠️ **System Overload:** I'm receiving too many requests right now. \
Please wait 1 minute and try again!";

pub const UNAVAILABLE_REPLY: &str =
    "I'm having trouble connecting to my knowledge base right now. Please try again later.";

pub const NOTHING_FOUND_REPLY: &str =
    "I couldn't find any information on that topic in my knowledge base.";

/// Is `query` one of the canned greetings (ignoring case, `!` and `.`)?
#[must_use]
pub fn is_greeting(query: &str) -> bool {
    let cleaned = query.trim().to_lowercase().replace(['!', '.'], "");
    GREETINGS.contains(&cleaned.as_str())
}

/// One way of producing raw knowledge for a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrievalStrategy {
    /// Grounded generation against a file-search store
    FileSearch { store: String },
    /// Ungrounded generation with a generic assistant prompt
    PlainChat,
}

impl RetrievalStrategy {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            RetrievalStrategy::FileSearch { .. } => "file_search",
            RetrievalStrategy::PlainChat => "plain_chat",
        }
    }

    /// Single attempt, no fallback
    pub async fn run(&self, model: &dyn KnowledgeModel, query: &str) -> Result<String, LlmError> {
        match self {
            RetrievalStrategy::FileSearch { store } => {
                model.generate(query, Some(store.as_str())).await
            }
            RetrievalStrategy::PlainChat => {
                let contents = format!("You are a helpful weather assistant. User says: {query}");
                model.generate(&contents, None).await
            }
        }
    }
}

pub struct KnowledgeLookup {
    model: Arc<dyn KnowledgeModel>,
    strategies: Vec<RetrievalStrategy>,
    synthesizer: Arc<ResponseSynthesizer>,
}

impl KnowledgeLookup {
    /// Document search when `store_id` is set, plain chat always last
    pub fn new(
        model: Arc<dyn KnowledgeModel>,
        store_id: Option<String>,
        synthesizer: Arc<ResponseSynthesizer>,
    ) -> Self {
        let mut strategies = Vec::with_capacity(2);
        if let Some(store) = store_id.filter(|s| !s.trim().is_empty()) {
            strategies.push(RetrievalStrategy::FileSearch { store });
        }
        strategies.push(RetrievalStrategy::PlainChat);

        Self {
            model,
            strategies,
            synthesizer,
        }
    }

    #[must_use]
    pub fn strategies(&self) -> &[RetrievalStrategy] {
        &self.strategies
    }

    /// "file_search" or "chat_only"
    #[must_use]
    pub fn mode(&self) -> &'static str {
        match self.strategies.first() {
            Some(RetrievalStrategy::FileSearch { .. }) => "file_search",
            _ => "chat_only",
        }
    }

    /// Try each strategy in order; the last failure is returned if none succeed.
    ///
    /// A strategy that answers without any text ends the lookup with an
    /// empty result; only failed calls move on to the next strategy.
    pub async fn retrieve(&self, query: &str) -> Result<String, LlmError> {
        let mut last_error = LlmError::EmptyResponse;
        for strategy in &self.strategies {
            info!("Knowledge lookup via {} for '{}'", strategy.name(), query);
            match strategy.run(self.model.as_ref(), query).await {
                Ok(text) => return Ok(text),
                Err(LlmError::EmptyResponse) => {
                    info!("{} returned no text", strategy.name());
                    return Ok(String::new());
                }
                Err(e) => {
                    warn!("{} failed ({}), trying next strategy", strategy.name(), e);
                    last_error = e;
                }
            }
        }
        Err(last_error)
    }

    /// Answer a theory query; always returns text
    #[instrument(skip(self))]
    pub async fn answer(&self, query: &str) -> String {
        if is_greeting(query) {
            info!("Handling greeting locally: {}", query);
            return GREETING_REPLY.to_string();
        }

        let raw_knowledge = match self.retrieve(query).await {
            Ok(text) => text,
            Err(e) if e.is_rate_limited() => {
                warn!("Knowledge provider rate limited: {}", e);
                return RATE_LIMIT_REPLY.to_string();
            }
            Err(e) => {
                warn!("Knowledge provider unavailable: {}", e);
                return UNAVAILABLE_REPLY.to_string();
            }
        };

        if raw_knowledge.trim().is_empty() {
            return NOTHING_FOUND_REPLY.to_string();
        }

        self.synthesizer
            .grounded_answer(query, &[raw_knowledge])
            .await
    }
}
