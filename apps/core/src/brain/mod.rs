//! # Brain Module
//!
//! Rule-driven understanding and response pipeline for Kaiwa.
//! Analyzes user input and synthesizes a reply without any ML model.
//!
//! ## Components
//! - `normalizer`: case-folding, punctuation stripping, stopword removal
//! - `keywords`: frequency-ranked keyword extraction
//! - `sentiment`: lexicon-based polarity vote
//! - `intent`: pattern-table scoring with hard-coded topic overrides
//! - `enhancer`: time/sentiment/filler response decoration
//! - `pattern`: per-user conversation pattern aggregation
//! - `engine`: main orchestrator and response cascade

pub mod engine;
pub mod enhancer;
pub mod intent;
pub mod keywords;
pub mod normalizer;
pub mod pattern;
pub mod sentiment;

// Re-export main types for convenience
#[allow(unused_imports)]
pub use engine::{EngineReply, ResponseEngine};
#[allow(unused_imports)]
pub use enhancer::{ContextEnhancer, Energy, TimeProfile};
#[allow(unused_imports)]
pub use intent::{ClassificationResult, IntentClassifier, GREETING_INTENT, UNKNOWN_INTENT};
#[allow(unused_imports)]
pub use keywords::KeywordExtractor;
#[allow(unused_imports)]
pub use normalizer::Normalizer;
#[allow(unused_imports)]
pub use pattern::{PatternAnalyzer, HISTORY_WINDOW};
#[allow(unused_imports)]
pub use sentiment::{SentimentLexicon, SentimentScorer};
