//! Routing decision for a user query

use serde::{Deserialize, Serialize};

use super::normalize_city;

/// Which flow handles a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    /// Live conditions or a forecast for a place
    Weather,
    /// Concepts, definitions, greetings and everything else
    Theory,
}

impl Intent {
    /// Parse the classifier's label; anything unrecognized is theory
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("weather") {
            Intent::Weather
        } else {
            Intent::Theory
        }
    }
}

/// Classifier output, produced once per request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntentClassification {
    pub intent: Intent,
    /// Location named in the query, if any
    pub city: Option<String>,
}

/// Strict-JSON shape the classifier is asked to emit
#[derive(Debug, Deserialize)]
pub(crate) struct RawClassification {
    #[serde(default)]
    pub intent: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

impl IntentClassification {
    #[must_use]
    pub fn new(intent: Intent, city: Option<String>) -> Self {
        Self {
            intent,
            city: normalize_city(city),
        }
    }

    /// Answer used whenever classification fails
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            intent: Intent::Theory,
            city: None,
        }
    }
}

impl From<RawClassification> for IntentClassification {
    fn from(raw: RawClassification) -> Self {
        let intent = raw
            .intent
            .as_deref()
            .map_or(Intent::Theory, Intent::from_label);
        Self::new(intent, raw.city)
    }
}
