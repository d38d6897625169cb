//! Brain pipeline tests
//!
//! Properties that span more than one analysis component: normalization
//! feeding keyword extraction, classifier determinism and override
//! priority, sentiment totality, enhancer composition.

use crate::brain::{
    ContextEnhancer, IntentClassifier, KeywordExtractor, Normalizer, SentimentScorer,
    GREETING_INTENT, UNKNOWN_INTENT,
};
use crate::models::{IntentDefinition, Sentiment};
use crate::runtime::doubles::ScriptedRandom;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn sample_table() -> Vec<IntentDefinition> {
    vec![
        IntentDefinition::new(
            "greeting",
            strings(&["こんにちは", "おはよう", "こんばんは"]),
            strings(&["こんにちは！お話しできて嬉しいです。"]),
        ),
        IntentDefinition::new(
            "thanks",
            strings(&["ありがとう", "感謝"]),
            strings(&["どういたしまして！"]),
        ),
        IntentDefinition::new(
            "hobby",
            strings(&["趣味", "映画", "音楽"]),
            strings(&["いい趣味ですね！"]),
        ),
    ]
}

#[cfg(test)]
mod normalization_properties {
    use super::*;

    #[test]
    fn test_idempotent_for_varied_inputs() {
        let normalizer = Normalizer::new();

        let inputs = [
            "こんにちは！元気ですか？",
            "Hello, WORLD!! How are you?",
            "今日 の 天気 は 晴れ です。",
            "",
            "123 abc 天気",
        ];

        for input in inputs {
            let once = normalizer.normalize(input);
            let twice = normalizer.normalize(&once.join(" "));
            assert_eq!(once, twice, "normalize must be idempotent for '{}'", input);
        }
    }

    #[test]
    fn test_keywords_come_from_normalized_tokens() {
        let extractor = KeywordExtractor::new();

        // Stopwords and punctuation never surface as keywords.
        let keywords = extractor.extract("天気 の 天気 は 料理 です！");
        assert_eq!(keywords, vec!["天気", "料理"]);
    }

    #[test]
    fn test_keyword_bounds_for_any_input() {
        let extractor = KeywordExtractor::new();

        let inputs = [
            "a a a b c d e f g h i j",
            "言葉 言葉 言葉 会話 会話 天気 料理 音楽 映画",
            "",
        ];

        for input in inputs {
            let keywords = extractor.extract(input);
            assert!(keywords.len() <= 5, "at most 5 keywords for '{}'", input);
            assert!(
                keywords.iter().all(|k| k.chars().count() > 1),
                "single-character keywords must be dropped for '{}'",
                input
            );
        }
    }
}

#[cfg(test)]
mod sentiment_properties {
    use super::*;

    #[test]
    fn test_total_and_deterministic() {
        let scorer = SentimentScorer::new();

        let inputs = [
            "ありがとう",
            "悲しい",
            "特に何もない一日",
            "嬉しいけど不安もある",
            "!!!",
            "",
        ];

        for input in inputs {
            let first = scorer.score(input);
            let second = scorer.score(input);
            assert_eq!(first, second, "scoring must be deterministic for '{}'", input);
            assert!(matches!(
                first,
                Sentiment::Positive | Sentiment::Negative | Sentiment::Neutral
            ));
        }
    }
}

#[cfg(test)]
mod classifier_properties {
    use super::*;

    #[test]
    fn test_deterministic_given_fixed_table() {
        let classifier = IntentClassifier::new();
        let table = sample_table();

        for _ in 0..3 {
            assert_eq!(classifier.classify("ありがとう", &table), "thanks");
            assert_eq!(classifier.classify("趣味は映画です", &table), "hobby");
        }
    }

    #[test]
    fn test_empty_table_always_unknown() {
        let classifier = IntentClassifier::new();

        for text in ["こんにちは", "天気", "ありがとう", ""] {
            assert_eq!(classifier.classify(text, &[]), UNKNOWN_INTENT);
        }
    }

    #[test]
    fn test_override_discards_scored_intent() {
        let classifier = IntentClassifier::new();
        let table = sample_table();

        // Scores heavily for greeting (full pattern + word + specific
        // indicator) but contains a food override indicator.
        let result = classifier.classify("こんにちは、好きな食べ物の料理は？", &table);
        assert_eq!(result, "food");
    }

    #[test]
    fn test_no_match_falls_to_unknown() {
        let classifier = IntentClassifier::new();
        let table = sample_table();

        assert_eq!(classifier.classify("さっぱり関係ない話", &table), UNKNOWN_INTENT);
    }
}

#[cfg(test)]
mod enhancer_properties {
    use super::*;

    #[test]
    fn test_greeting_prefix_composes_with_suppressed_modifiers() {
        let enhancer = ContextEnhancer::new();
        let mut rng = ScriptedRandom::always_high();

        let out = enhancer.enhance(
            "こんにちは！",
            GREETING_INTENT,
            Sentiment::Neutral,
            20,
            &mut rng,
        );
        // Evening bucket prefix applied, no probabilistic suffixes.
        assert_eq!(out, "夜の時間、ゆっくりされていますか？ こんにちは！");
    }

    #[test]
    fn test_full_decoration_order_is_prefix_sentiment_filler() {
        let enhancer = ContextEnhancer::new();
        let mut rng = ScriptedRandom::always_low();

        let out = enhancer.enhance(
            "こんにちは！",
            GREETING_INTENT,
            Sentiment::Positive,
            6,
            &mut rng,
        );
        assert_eq!(
            out,
            "朝の清々しい時間ですね！ こんにちは！ 本当に素敵ですね！ ところで、"
        );
    }
}
