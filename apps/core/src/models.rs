use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use std::fmt;

/// Coarse polarity label derived from lexicon hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Returns the storage/wire label for the sentiment.
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A configurable intent: trigger patterns plus candidate responses.
///
/// Supplied by the intent store and read-only to the engine. Pattern and
/// response arrays are stored as JSON columns; `intent_name` is the primary
/// key, so uniqueness is the store's concern.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct IntentDefinition {
    /// Unique name of the intent (e.g. "greeting", "food").
    pub intent_name: String,
    /// Literal phrases matched against the user message.
    pub patterns: Json<Vec<String>>,
    /// Response variants, one of which is chosen uniformly at random.
    pub responses: Json<Vec<String>>,
}

impl IntentDefinition {
    pub fn new(
        intent_name: impl Into<String>,
        patterns: Vec<String>,
        responses: Vec<String>,
    ) -> Self {
        Self {
            intent_name: intent_name.into(),
            patterns: Json(patterns),
            responses: Json(responses),
        }
    }
}

/// A single stored conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ConversationRecord {
    /// What the user said.
    pub user_message: String,
    /// What the bot answered.
    pub bot_response: String,
    /// Unix timestamp (seconds) of the turn.
    pub timestamp: i64,
    /// Sentiment recorded for the turn, if any.
    pub sentiment: Option<Sentiment>,
    /// Intent recorded for the turn, if any.
    pub intent: Option<String>,
}

/// Behavioral summary of a user's recent conversations.
///
/// Computed fresh per request from a bounded history window; never cached
/// or persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationPattern {
    /// Most frequent recorded sentiment (first encountered wins ties).
    pub dominant_sentiment: Sentiment,
    /// Up to 3 distinct intents seen in the window, encounter order.
    pub frequent_intents: Vec<String>,
    /// Up to 3 distinct hours of day (0-23) the user was active.
    pub active_hours: Vec<u32>,
    /// Number of records in the window.
    pub conversation_count: usize,
}

impl Default for ConversationPattern {
    fn default() -> Self {
        Self {
            dominant_sentiment: Sentiment::Neutral,
            frequent_intents: vec![],
            active_hours: vec![],
            conversation_count: 0,
        }
    }
}

/// Per-sentiment turn count for the analytics endpoint.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SentimentCount {
    pub sentiment: Sentiment,
    pub count: i64,
}

/// Per-intent turn count for the analytics endpoint.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct IntentCount {
    pub intent: String,
    pub count: i64,
}
