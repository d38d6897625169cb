//! Keyword extraction by token frequency.
//!
//! Ranks normalized tokens by raw frequency and keeps the top 5.
//! Single-character tokens are discarded; ties keep first-seen order.

use std::collections::HashMap;

use super::normalizer::Normalizer;

/// Maximum number of keywords returned.
const MAX_KEYWORDS: usize = 5;

/// Frequency-based keyword extractor.
pub struct KeywordExtractor {
    normalizer: Normalizer,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordExtractor {
    /// Create an extractor with the default normalizer.
    pub fn new() -> Self {
        Self::with_normalizer(Normalizer::new())
    }

    /// Create an extractor over a custom normalizer.
    pub fn with_normalizer(normalizer: Normalizer) -> Self {
        Self { normalizer }
    }

    /// Extract up to 5 keywords, most frequent first.
    ///
    /// Deterministic: equal counts are ordered by first appearance in the
    /// text, which the stable sort preserves.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let tokens = self.normalizer.normalize(text);

        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut order: Vec<String> = Vec::new();
        for token in tokens {
            // Character count, not byte length: a two-kana word is a keyword.
            if token.chars().count() <= 1 {
                continue;
            }
            if !counts.contains_key(&token) {
                order.push(token.clone());
            }
            *counts.entry(token).or_insert(0) += 1;
        }

        let mut ranked: Vec<(String, usize)> = order
            .into_iter()
            .map(|word| {
                let count = counts[&word];
                (word, count)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        ranked
            .into_iter()
            .take(MAX_KEYWORDS)
            .map(|(word, _)| word)
            .collect()
    }
}
