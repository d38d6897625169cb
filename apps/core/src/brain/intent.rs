//! Intent classification against a configurable pattern table.
//!
//! Two independent stages, decided in order:
//! 1. Generic score pass: every table entry is scored by substring matches
//!    (+10 full pattern, +2 per pattern word, +15 specific indicators) and
//!    the strictly highest score wins, first-seen retained on ties.
//! 2. Override pass: four hard-coded topic checks (food, name, weather,
//!    time, in that priority) that run unconditionally on the case-folded
//!    text and take absolute precedence over the scored result.
//!
//! The override indicator lists partially duplicate the generic pattern
//! table on purpose: they are a fast path for four common topics, and their
//! unconditional priority is load-bearing.

use crate::models::IntentDefinition;

/// Intent name returned when nothing matches.
pub const UNKNOWN_INTENT: &str = "unknown";

/// Intent name that triggers the time-of-day greeting prefix.
pub const GREETING_INTENT: &str = "greeting";

/// Score for a full pattern contained in the text.
const FULL_PATTERN_SCORE: u32 = 10;
/// Score for a single pattern word contained in the text.
const PATTERN_WORD_SCORE: u32 = 2;
/// Score for a specific-pattern indicator hit.
const SPECIFIC_PATTERN_SCORE: u32 = 15;

/// Hand-authored indicator phrases per intent name, consulted during the
/// score pass.
const SPECIFIC_PATTERNS: &[(&str, &[&str])] = &[
    ("food", &["好きな食べ物", "食べ物", "料理", "美味しい", "グルメ"]),
    ("name", &["名前", "君は誰", "あなたは", "あなたの名前", "ボット"]),
    ("weather", &["天気", "雨", "晴れ", "曇り", "雪", "降る", "降らない"]),
    ("time", &["時間", "今何時", "何時", "時刻"]),
    ("greeting", &["こんにちは", "おはよう", "こんばんは", "はじめまして"]),
    ("goodbye", &["さようなら", "バイバイ", "また"]),
    ("thanks", &["ありがとう", "サンキュー", "感謝"]),
];

/// Override indicators, checked in this priority order. These lists are
/// close to, but not identical with, the SPECIFIC_PATTERNS entries for the
/// same intents.
const FOOD_INDICATORS: &[&str] = &["好きな食べ物", "食べ物", "料理", "何食べる", "美味しい", "グルメ"];
const NAME_INDICATORS: &[&str] = &["名前", "あなたは誰", "あなたの名前", "君は誰", "ボット", "bot"];
const WEATHER_INDICATORS: &[&str] = &["天気", "雨", "晴れ", "曇り", "雪", "降る", "降らない"];
const TIME_INDICATORS: &[&str] = &["時間", "今何時", "何時", "時刻", "今の時間"];

/// Score attributed to one intent during a classification pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub intent_name: String,
    pub score: u32,
}

/// Pattern-table intent classifier.
pub struct IntentClassifier;

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a raw utterance against the supplied intent table.
    ///
    /// An empty table short-circuits to `unknown` (no override check runs).
    pub fn classify(&self, text: &str, table: &[IntentDefinition]) -> String {
        if table.is_empty() {
            return UNKNOWN_INTENT.to_string();
        }

        let lowered = text.to_lowercase();
        let best = self.score_table(&lowered, table);

        // The override pass runs regardless of the score pass outcome and
        // its verdict wins outright.
        if let Some(topic) = self.override_intent(&lowered) {
            return topic.to_string();
        }

        match best {
            Some(result) if result.score > 0 => result.intent_name,
            _ => UNKNOWN_INTENT.to_string(),
        }
    }

    /// Generic score pass: the strictly highest-scoring intent, or `None`
    /// when no entry scored above zero. A later entry only replaces the
    /// current best on a strictly greater score, so ties keep the first
    /// encountered.
    fn score_table(&self, lowered: &str, table: &[IntentDefinition]) -> Option<ClassificationResult> {
        let mut best: Option<ClassificationResult> = None;

        for definition in table {
            let score = self.score_intent(lowered, definition);
            let replaces = match &best {
                Some(current) => score > current.score,
                None => score > 0,
            };
            if replaces {
                best = Some(ClassificationResult {
                    intent_name: definition.intent_name.clone(),
                    score,
                });
            }
        }

        best
    }

    /// Cumulative score of one table entry against the case-folded text.
    ///
    /// Full-pattern and word-level containment stack: a single-word pattern
    /// present in the text earns both bonuses.
    fn score_intent(&self, lowered: &str, definition: &IntentDefinition) -> u32 {
        let mut score = 0;

        for pattern in definition.patterns.iter() {
            if lowered.contains(&pattern.to_lowercase()) {
                score += FULL_PATTERN_SCORE;
            }
        }

        for pattern in definition.patterns.iter() {
            for word in pattern.to_lowercase().split_whitespace() {
                if lowered.contains(word) {
                    score += PATTERN_WORD_SCORE;
                }
            }
        }

        if Self::matches_specific(lowered, &definition.intent_name) {
            score += SPECIFIC_PATTERN_SCORE;
        }

        score
    }

    fn matches_specific(lowered: &str, intent_name: &str) -> bool {
        SPECIFIC_PATTERNS
            .iter()
            .find(|(name, _)| *name == intent_name)
            .is_some_and(|(_, indicators)| indicators.iter().any(|p| lowered.contains(p)))
    }

    /// Override pass as a total function of the case-folded text.
    ///
    /// Fixed priority: food, then name, then weather, then time. `None`
    /// means no override applies and the scored result stands.
    pub fn override_intent(&self, lowered: &str) -> Option<&'static str> {
        if FOOD_INDICATORS.iter().any(|p| lowered.contains(p)) {
            return Some("food");
        }
        if NAME_INDICATORS.iter().any(|p| lowered.contains(p)) {
            return Some("name");
        }
        if WEATHER_INDICATORS.iter().any(|p| lowered.contains(p)) {
            return Some("weather");
        }
        if TIME_INDICATORS.iter().any(|p| lowered.contains(p)) {
            return Some("time");
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, &[&str])]) -> Vec<IntentDefinition> {
        entries
            .iter()
            .map(|(name, patterns)| {
                IntentDefinition::new(
                    *name,
                    patterns.iter().map(|p| p.to_string()).collect(),
                    vec!["ok".to_string()],
                )
            })
            .collect()
    }

    #[test]
    fn test_empty_table_returns_unknown() {
        let classifier = IntentClassifier::new();

        // Even text full of override indicators: the table gate comes first.
        assert_eq!(classifier.classify("今日の天気は？", &[]), UNKNOWN_INTENT);
        assert_eq!(classifier.classify("", &[]), UNKNOWN_INTENT);
    }

    #[test]
    fn test_full_pattern_match() {
        let classifier = IntentClassifier::new();
        let table = table(&[("hobby", &["映画鑑賞"]), ("music", &["音楽"])]);

        assert_eq!(classifier.classify("趣味は映画鑑賞です", &table), "hobby");
    }

    #[test]
    fn test_word_level_scores_stack_with_full_match() {
        let classifier = IntentClassifier::new();
        // Single-word pattern: full containment (+10) and the word itself
        // (+2) both fire, beating an entry with only a word-level hit.
        let single = table(&[("music", &["音楽"])]);
        assert_eq!(classifier.classify("音楽が気になる", &single), "music");
    }

    #[test]
    fn test_specific_indicator_bonus() {
        let classifier = IntentClassifier::new();
        // "thanks" has no table pattern hit but its specific indicator
        // (ありがとう) fires, beating the pattern-scored entry.
        let entries = table(&[("chat", &["ねえ"]), ("thanks", &["どうも"])]);

        assert_eq!(classifier.classify("ねえ、ありがとう", &entries), "thanks");
    }

    #[test]
    fn test_tie_keeps_first_entry() {
        let classifier = IntentClassifier::new();
        let entries = table(&[("first", &["同じ"]), ("second", &["同じ"])]);

        assert_eq!(classifier.classify("同じ言葉", &entries), "first");
    }

    #[test]
    fn test_no_positive_score_returns_unknown() {
        let classifier = IntentClassifier::new();
        let entries = table(&[("hobby", &["映画"])]);

        assert_eq!(classifier.classify("全然関係ない話", &entries), UNKNOWN_INTENT);
    }

    #[test]
    fn test_override_beats_high_scoring_intent() {
        let classifier = IntentClassifier::new();
        // こんにちは scores greeting heavily (pattern + specific indicator),
        // yet the food indicator 好きな食べ物 takes absolute priority.
        let entries = table(&[("greeting", &["こんにちは"])]);

        assert_eq!(
            classifier.classify("こんにちは、好きな食べ物は？", &entries),
            "food"
        );
    }

    #[test]
    fn test_override_priority_order() {
        let classifier = IntentClassifier::new();
        let entries = table(&[("greeting", &["こんにちは"])]);

        // 名前 (name) and 天気 (weather) both present: name wins.
        assert_eq!(classifier.classify("名前と天気", &entries), "name");
        // 天気 (weather) and 時間 (time) both present: weather wins.
        assert_eq!(classifier.classify("天気と時間", &entries), "weather");
    }

    #[test]
    fn test_override_is_case_folded() {
        let classifier = IntentClassifier::new();
        let entries = table(&[("greeting", &["こんにちは"])]);

        // The ASCII "bot" indicator matches case-insensitively.
        assert_eq!(classifier.classify("Are you a BOT?", &entries), "name");
    }

    #[test]
    fn test_override_pass_is_total() {
        let classifier = IntentClassifier::new();

        assert_eq!(classifier.override_intent("何食べる？"), Some("food"));
        assert_eq!(classifier.override_intent("今の時間は"), Some("time"));
        assert_eq!(classifier.override_intent("こんにちは"), None);
    }
}
