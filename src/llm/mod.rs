//! LLM provider clients
//!
//! Two seams are exposed: [`ChatModel`] for chat completions (routing,
//! extraction, synthesis, summaries) and [`KnowledgeModel`] for
//! generate-content calls that can be grounded in a file-search store.
//! Every call is a single attempt; failures are an [`LlmError`].

use async_trait::async_trait;

use crate::error::LlmError;

pub mod gemini;
pub mod openai;

pub use gemini::GeminiClient;
pub use openai::OpenAiClient;

/// One chat completion: optional system prompt plus a user prompt
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: Option<String>,
    pub prompt: String,
    /// Sampling temperature, provider default when `None`
    pub temperature: Option<f32>,
    /// Ask the provider for a strict JSON object
    pub json_mode: bool,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            system: None,
            prompt: prompt.into(),
            temperature: None,
            json_mode: false,
        }
    }

    #[must_use]
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    #[must_use]
    pub fn json(mut self) -> Self {
        self.json_mode = true;
        self
    }
}

/// Chat-completion provider
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Return the text of the first choice
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;
}

/// Generate-content provider with optional document grounding
#[async_trait]
pub trait KnowledgeModel: Send + Sync {
    /// Generate text for `contents`, searching `file_search_store` when given
    async fn generate(
        &self,
        contents: &str,
        file_search_store: Option<&str>,
    ) -> Result<String, LlmError>;
}
