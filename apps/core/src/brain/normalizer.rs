//! Text normalization.
//!
//! Case-folds, strips punctuation, and removes Japanese stopwords.
//! Every downstream analysis stage works on this token stream.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Stopwords for Japanese: particles and high-frequency auxiliaries that
/// carry no topical signal.
const STOPWORDS_JA: &[&str] = &[
    "の",
    "に",
    "は",
    "を",
    "が",
    "で",
    "て",
    "と",
    "し",
    "れ",
    "さ",
    "ある",
    "いる",
    "する",
    "です",
    "ます",
    "だ",
    "である",
];

// Compiled once at startup. `\w` is Unicode-aware, so Japanese characters
// survive while punctuation (ASCII and fullwidth alike) is stripped.
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("Invalid regex: non-word pattern"));

/// Normalizes raw utterances into a filtered token sequence.
pub struct Normalizer {
    stopwords: HashSet<String>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    /// Create a normalizer with the default Japanese stopword set.
    pub fn new() -> Self {
        Self::with_stopwords(STOPWORDS_JA.iter().map(|s| s.to_string()))
    }

    /// Create a normalizer with a custom stopword set.
    pub fn with_stopwords(stopwords: impl IntoIterator<Item = String>) -> Self {
        Self {
            stopwords: stopwords.into_iter().collect(),
        }
    }

    /// Lowercase, strip non-word characters, split on whitespace, and drop
    /// stopwords. Pure: empty input yields an empty token list.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let stripped = NON_WORD.replace_all(&lowered, "");
        stripped
            .split_whitespace()
            .filter(|word| !self.stopwords.contains(*word))
            .map(str::to_string)
            .collect()
    }
}
