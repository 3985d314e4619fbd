//! Conversational answers and chat history

use serde::{Deserialize, Serialize};

/// Where a reply came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Source {
    #[serde(rename = "Live Weather API")]
    LiveWeather,
    #[serde(rename = "Knowledge Base")]
    KnowledgeBase,
    #[serde(rename = "System")]
    System,
}

/// Final answer to a chat query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub response: String,
    pub source: Source,
}

impl Reply {
    pub fn new(response: impl Into<String>, source: Source) -> Self {
        Self {
            response: response.into(),
            source,
        }
    }
}

/// One turn of a conversation as sent by the frontend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}
