//! Response engine - main orchestrator of the understanding pipeline.
//!
//! Coordinates keyword extraction, sentiment scoring, intent classification
//! and response selection into the final reply. Resolution is a priority
//! cascade: a classified intent's stored response wins, then a keyword
//! knowledge hit, then a sentiment-keyed fallback string.

use std::sync::{Arc, Mutex};

use chrono::Timelike;
use tracing::{debug, warn};

use crate::models::{ConversationPattern, Sentiment};
use crate::runtime::{pick, Clock, RandomSource};
use crate::store::{HistoryReader, IntentTableReader, KeywordLookup, ResponsesByIntent};

use super::enhancer::ContextEnhancer;
use super::intent::{IntentClassifier, UNKNOWN_INTENT};
use super::keywords::KeywordExtractor;
use super::pattern::{PatternAnalyzer, HISTORY_WINDOW};
use super::sentiment::SentimentScorer;

/// Sentiment-keyed fallback replies when neither the intent table nor the
/// knowledge base produced a response.
const POSITIVE_FALLBACK: &str = "それは素晴らしいですね！";
const NEGATIVE_FALLBACK: &str = "大変でしたね。お疲れさまです。";
const NEUTRAL_FALLBACK: &str = "なるほど、そうなんですね。もう少し詳しく教えてください。";

/// Final product of one `respond` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineReply {
    pub response: String,
    pub sentiment: Sentiment,
    pub intent: String,
}

/// Orchestrator wiring the analysis components to the store collaborators.
///
/// Stateless across invocations: every call is a function of its inputs,
/// the externally supplied tables/history, and the injected clock and
/// randomness. Concurrent calls need no coordination beyond the mutex
/// around the random source.
pub struct ResponseEngine {
    keywords: KeywordExtractor,
    sentiment: SentimentScorer,
    classifier: IntentClassifier,
    enhancer: ContextEnhancer,
    patterns: PatternAnalyzer,
    intents: Arc<dyn IntentTableReader>,
    responses: Arc<dyn ResponsesByIntent>,
    knowledge: Arc<dyn KeywordLookup>,
    history: Arc<dyn HistoryReader>,
    clock: Arc<dyn Clock>,
    rng: Mutex<Box<dyn RandomSource>>,
}

impl ResponseEngine {
    pub fn new(
        intents: Arc<dyn IntentTableReader>,
        responses: Arc<dyn ResponsesByIntent>,
        knowledge: Arc<dyn KeywordLookup>,
        history: Arc<dyn HistoryReader>,
        clock: Arc<dyn Clock>,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            keywords: KeywordExtractor::new(),
            sentiment: SentimentScorer::new(),
            classifier: IntentClassifier::new(),
            enhancer: ContextEnhancer::new(),
            patterns: PatternAnalyzer::new(),
            intents,
            responses,
            knowledge,
            history,
            clock,
            rng: Mutex::new(rng),
        }
    }

    /// Produce the reply for one user message.
    ///
    /// Sentiment is computed exactly once up front and reported with the
    /// reply no matter which cascade path resolved the response. Read
    /// failures on the intent table or knowledge base degrade to empty
    /// results; they never abort the cascade.
    pub async fn respond(&self, user_message: &str, user_id: &str) -> EngineReply {
        let keywords = self.keywords.extract(user_message);
        let sentiment = self.sentiment.score(user_message);

        let table = match self.intents.fetch_all().await {
            Ok(table) => table,
            Err(error) => {
                warn!(%error, "intent table fetch failed, classifying against empty table");
                Vec::new()
            }
        };
        let intent = self.classifier.classify(user_message, &table);

        debug!(
            user_id,
            ?keywords,
            %sentiment,
            %intent,
            "message analyzed"
        );

        // 1. Intent-based response: a uniform-random stored variant,
        // deliberately unenhanced.
        if intent != UNKNOWN_INTENT {
            match self.responses.fetch_responses(&intent).await {
                Ok(variants) if !variants.is_empty() => {
                    let response = {
                        let mut rng = self.rng.lock().expect("rng mutex poisoned");
                        pick(&mut **rng, &variants).cloned()
                    };
                    if let Some(response) = response {
                        return EngineReply {
                            response,
                            sentiment,
                            intent,
                        };
                    }
                }
                Ok(_) => {}
                Err(error) => warn!(%error, %intent, "intent response fetch failed"),
            }
        }

        // 2. Keyword-based response: first keyword with a knowledge hit wins.
        for keyword in &keywords {
            match self.knowledge.fetch_by_keyword(keyword).await {
                Ok(Some(response)) => {
                    return EngineReply {
                        response,
                        sentiment,
                        intent,
                    };
                }
                Ok(None) => {}
                Err(error) => warn!(%error, %keyword, "keyword lookup failed"),
            }
        }

        // 3. Sentiment-keyed fallback.
        let response = match sentiment {
            Sentiment::Positive => POSITIVE_FALLBACK,
            Sentiment::Negative => NEGATIVE_FALLBACK,
            Sentiment::Neutral => NEUTRAL_FALLBACK,
        }
        .to_string();

        EngineReply {
            response,
            sentiment,
            intent,
        }
    }

    /// Context-enhanced variant of the intent response lookup: a uniform
    /// random stored variant decorated with time-of-day, sentiment, and
    /// filler modifiers. `None` when the intent has no stored responses.
    pub async fn contextual_response_by_intent(
        &self,
        intent: &str,
        sentiment: Sentiment,
    ) -> Option<String> {
        let variants = match self.responses.fetch_responses(intent).await {
            Ok(variants) => variants,
            Err(error) => {
                warn!(%error, %intent, "intent response fetch failed");
                return None;
            }
        };
        if variants.is_empty() {
            return None;
        }

        let hour = self.clock.now().hour();
        let mut rng = self.rng.lock().expect("rng mutex poisoned");
        let base = pick(&mut **rng, &variants)?.clone();
        Some(self.enhancer.enhance(&base, intent, sentiment, hour, &mut **rng))
    }

    /// Behavioral summary of a user's recent conversations.
    ///
    /// A failed history read degrades to the empty pattern rather than
    /// failing the caller.
    pub async fn user_pattern(&self, user_id: &str) -> ConversationPattern {
        match self.history.fetch_recent(user_id, HISTORY_WINDOW).await {
            Ok(records) => self.patterns.analyze(&records),
            Err(error) => {
                warn!(%error, user_id, "history fetch failed, returning empty pattern");
                ConversationPattern::default()
            }
        }
    }
}
