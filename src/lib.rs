//! Skycast - a conversational weather assistant
//!
//! This library routes natural-language queries either to a live weather
//! lookup or to a document-grounded knowledge answer, and serves both over
//! HTTP.

pub mod api;
pub mod assistant;
pub mod chat_client;
pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod intent;
pub mod knowledge;
pub mod llm;
pub mod models;
pub mod orchestrator;
pub mod session;
pub mod summary_log;
pub mod synthesizer;
pub mod telemetry;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use assistant::{Assistant, Providers};
pub use config::AssistantConfig;
pub use error::{AssistantError, LlmError, WeatherError};
pub use models::{ChatMessage, Intent, Reply, Source, WeatherSnapshot};
pub use weather::{WeatherApiClient, WeatherProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, AssistantError>;
