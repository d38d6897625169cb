//! Lexicon-based sentiment scoring.
//!
//! Counts positive and negative lexicon hits by substring containment and
//! takes a strict-majority vote. No tokenization: a lexicon entry matching
//! anywhere in the case-folded text counts, which is what makes inflected
//! Japanese forms (ありがとうございます) still hit their stem entry.

use crate::models::Sentiment;

/// Positive polarity words, Japanese.
const POSITIVE_WORDS_JA: &[&str] = &[
    "嬉しい",
    "楽しい",
    "幸せ",
    "良い",
    "素晴らしい",
    "最高",
    "ありがとう",
    "感謝",
    "愛",
    "好き",
    "満足",
];

/// Negative polarity words, Japanese.
const NEGATIVE_WORDS_JA: &[&str] = &[
    "悲しい",
    "つらい",
    "疲れた",
    "悪い",
    "嫌い",
    "困った",
    "怒り",
    "不満",
    "心配",
    "不安",
    "問題",
];

/// Polarity word lists. Static configuration, not code: callers may load
/// language-specific tables and construct the scorer from them.
pub struct SentimentLexicon {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

impl Default for SentimentLexicon {
    fn default() -> Self {
        Self {
            positive: POSITIVE_WORDS_JA.iter().map(|s| s.to_string()).collect(),
            negative: NEGATIVE_WORDS_JA.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Lexicon vote sentiment scorer.
pub struct SentimentScorer {
    lexicon: SentimentLexicon,
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer {
    /// Create a scorer with the default Japanese lexicon.
    pub fn new() -> Self {
        Self::with_lexicon(SentimentLexicon::default())
    }

    pub fn with_lexicon(lexicon: SentimentLexicon) -> Self {
        Self { lexicon }
    }

    /// Score a raw utterance. Total and deterministic: every input maps to
    /// exactly one label, ties land on neutral.
    pub fn score(&self, text: &str) -> Sentiment {
        let lowered = text.to_lowercase();

        let positive = self
            .lexicon
            .positive
            .iter()
            .filter(|word| lowered.contains(word.as_str()))
            .count();
        let negative = self
            .lexicon
            .negative
            .iter()
            .filter(|word| lowered.contains(word.as_str()))
            .count();

        if positive > negative {
            Sentiment::Positive
        } else if negative > positive {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}
