//! Error types and handling for the Skycast assistant

use thiserror::Error;

/// Failure of a call to an LLM provider (chat completion or generate-content)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// The provider rejected the call because of quota or rate limits
    #[error("Rate limited (429): {message}")]
    RateLimited { message: String },

    /// The provider answered with a non-success status
    #[error("Provider error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// The response body could not be decoded
    #[error("Failed to parse provider response: {0}")]
    Parse(String),

    /// The provider answered without any text
    #[error("Provider returned an empty response")]
    EmptyResponse,
}

impl LlmError {
    /// Classify a non-success provider response.
    ///
    /// Gemini reports quota exhaustion both as HTTP 429 and as a `429` code
    /// embedded in the error body, so either marks the call rate limited.
    #[must_use]
    pub fn from_status(status: u16, body: String) -> Self {
        if status == 429 || body.contains("429") {
            Self::RateLimited { message: body }
        } else {
            Self::Api {
                status,
                message: body,
            }
        }
    }

    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

/// Failure categories of the live weather fetch
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherError {
    /// HTTP 400: the provider does not know the location
    #[error("City not found")]
    CityNotFound,

    /// HTTP 401: the API key was rejected
    #[error("API authentication failed")]
    Unauthorized,

    /// HTTP 403: the API key lacks access
    #[error("API access denied")]
    Forbidden,

    /// No response within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Transport failure or any other non-success status
    #[error("Failed to fetch weather data")]
    Network,

    /// The body did not decode as a forecast payload
    #[error("An unexpected error occurred")]
    InvalidResponse,
}

impl WeatherError {
    /// Sentence shown to the user for this failure
    #[must_use]
    pub fn user_message(self, city: &str) -> String {
        match self {
            WeatherError::CityNotFound => format!(
                "I couldn't find weather data for '{city}'. Please check the spelling or try a different location."
            ),
            WeatherError::Unauthorized | WeatherError::Forbidden => {
                "I'm experiencing technical difficulties. Please try again later.".to_string()
            }
            WeatherError::Timeout => {
                "The weather service is taking too long to respond. Please try again.".to_string()
            }
            WeatherError::Network | WeatherError::InvalidResponse => {
                format!("I encountered an issue: {self}. Please try again.")
            }
        }
    }
}

/// Main error type for the Skycast application
#[derive(Error, Debug)]
pub enum AssistantError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// LLM provider errors
    #[error(transparent)]
    Provider(#[from] LlmError),

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl AssistantError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
