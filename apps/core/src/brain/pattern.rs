//! Conversation pattern analysis.
//!
//! Aggregates a user's recent history window into a behavioral summary:
//! dominant sentiment, a handful of recurring intents, and the hours the
//! user tends to be active. Computed fresh on every request.

use chrono::{DateTime, Timelike};

use crate::models::{ConversationPattern, ConversationRecord, Sentiment};

/// How many recent records the analysis window holds.
pub const HISTORY_WINDOW: usize = 20;

/// Cap on distinct intents / active hours kept in a pattern.
const MAX_PATTERN_ITEMS: usize = 3;

/// Aggregator over recent conversation records.
pub struct PatternAnalyzer;

impl Default for PatternAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Summarize a newest-first history window.
    ///
    /// Empty history yields the empty pattern (neutral, empty sets, zero
    /// count). Records missing a sentiment or intent contribute nothing to
    /// that dimension but still count toward `conversation_count`.
    pub fn analyze(&self, history: &[ConversationRecord]) -> ConversationPattern {
        if history.is_empty() {
            return ConversationPattern::default();
        }

        ConversationPattern {
            dominant_sentiment: Self::dominant_sentiment(history),
            frequent_intents: Self::distinct_intents(history),
            active_hours: Self::active_hours(history),
            conversation_count: history.len(),
        }
    }

    /// Most frequent recorded sentiment; equal counts keep whichever value
    /// was encountered first in the window.
    fn dominant_sentiment(history: &[ConversationRecord]) -> Sentiment {
        let mut counts: Vec<(Sentiment, usize)> = Vec::new();
        for record in history {
            if let Some(sentiment) = record.sentiment {
                match counts.iter_mut().find(|(value, _)| *value == sentiment) {
                    Some((_, count)) => *count += 1,
                    None => counts.push((sentiment, 1)),
                }
            }
        }

        let mut dominant = Sentiment::Neutral;
        let mut best = 0;
        for (sentiment, count) in counts {
            if count > best {
                best = count;
                dominant = sentiment;
            }
        }
        dominant
    }

    /// First few distinct recorded intents, encounter order.
    fn distinct_intents(history: &[ConversationRecord]) -> Vec<String> {
        let mut intents: Vec<String> = Vec::new();
        for record in history {
            if let Some(intent) = &record.intent {
                if intents.len() < MAX_PATTERN_ITEMS && !intents.contains(intent) {
                    intents.push(intent.clone());
                }
            }
        }
        intents
    }

    /// First few distinct hours of day derived from record timestamps.
    fn active_hours(history: &[ConversationRecord]) -> Vec<u32> {
        let mut hours: Vec<u32> = Vec::new();
        for record in history {
            let Some(hour) = DateTime::from_timestamp(record.timestamp, 0).map(|ts| ts.hour())
            else {
                continue;
            };
            if hours.len() < MAX_PATTERN_ITEMS && !hours.contains(&hour) {
                hours.push(hour);
            }
        }
        hours
    }
}
