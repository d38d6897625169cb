//! Context-sensitive response decoration.
//!
//! Layers time-of-day, sentiment, and filler modifiers onto a base response.
//! The time bucket lookup is deterministic; the sentiment and filler
//! suffixes are probabilistic and independently gated. Current time and
//! randomness are explicit inputs so fixed injections reproduce any path.

use crate::models::Sentiment;
use crate::runtime::{pick, RandomSource};

use super::intent::GREETING_INTENT;

/// Probability of appending a sentiment modifier.
const SENTIMENT_MODIFIER_RATE: f64 = 0.3;
/// Outer probability gate for the filler suffix.
const FILLER_RATE: f64 = 0.2;
/// Inner draw inside the filler source; below it a phrase is produced,
/// otherwise the source yields an empty string and the append is a no-op.
const FILLER_DRAW_RATE: f64 = 0.5;

/// Energy level associated with a time-of-day bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Energy {
    High,
    Normal,
    Low,
}

/// Greeting phrase, energy level, and tone label for one time bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeProfile {
    pub greeting: &'static str,
    pub energy: Energy,
    pub tone: &'static str,
}

const POSITIVE_MODIFIERS: &[&str] = &[
    "本当に素敵ですね！",
    "わくわくしますね！",
    "とても良いことですね！",
    "すごく嬉しいです！",
    "それは最高ですね！",
];

const NEGATIVE_MODIFIERS: &[&str] = &[
    "お気持ちお察しします。",
    "そんな時もありますよね。",
    "お疲れさまです。",
    "一緒に考えさせてください。",
    "無理しないでくださいね。",
];

const NEUTRAL_MODIFIERS: &[&str] = &[
    "なるほどですね。",
    "そうなんですね。",
    "興味深いお話ですね。",
    "よくわかります。",
    "そうですね。",
];

const FILLERS: &[&str] = &[
    "ところで、",
    "それにしても、",
    "そういえば、",
    "ちなみに、",
    "もしよろしければ、",
    "お時間があるときに、",
    "もしかして、",
    "いかがでしょうか？",
    "どう思われますか？",
    "よろしければまた教えてくださいね。",
];

/// Probabilistic response decorator.
pub struct ContextEnhancer;

impl Default for ContextEnhancer {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextEnhancer {
    pub fn new() -> Self {
        Self
    }

    /// Maps an hour of day (0-23) to its time bucket profile.
    pub fn time_profile(hour: u32) -> TimeProfile {
        match hour {
            5..=9 => TimeProfile {
                greeting: "朝の清々しい時間ですね！",
                energy: Energy::High,
                tone: "energetic",
            },
            10..=11 => TimeProfile {
                greeting: "午前中の爽やかな時間ですね！",
                energy: Energy::High,
                tone: "active",
            },
            12..=13 => TimeProfile {
                greeting: "お昼の時間ですね！",
                energy: Energy::Normal,
                tone: "relaxed",
            },
            14..=16 => TimeProfile {
                greeting: "午後のひととき、いかがお過ごしですか？",
                energy: Energy::Normal,
                tone: "calm",
            },
            17..=18 => TimeProfile {
                greeting: "夕方の時間ですね。お疲れさまです！",
                energy: Energy::Low,
                tone: "supportive",
            },
            19..=21 => TimeProfile {
                greeting: "夜の時間、ゆっくりされていますか？",
                energy: Energy::Low,
                tone: "gentle",
            },
            _ => TimeProfile {
                greeting: "夜更かしですね！",
                energy: Energy::Low,
                tone: "caring",
            },
        }
    }

    /// Decorate a base response.
    ///
    /// Fixed application order: greeting prefix (unconditional for the
    /// greeting intent), sentiment suffix, filler suffix. Each application
    /// is independent; nothing is mutually exclusive or rolled back.
    pub fn enhance(
        &self,
        base_response: &str,
        intent: &str,
        sentiment: Sentiment,
        current_hour: u32,
        rng: &mut dyn RandomSource,
    ) -> String {
        let profile = Self::time_profile(current_hour);
        let mut enhanced = base_response.to_string();

        if intent == GREETING_INTENT {
            enhanced = format!("{} {}", profile.greeting, enhanced);
        }

        // The modifier is drawn before the gate, mirroring the draw order
        // the gated decoration has always had.
        let modifier = pick(rng, Self::sentiment_modifiers(sentiment)).copied();
        if rng.ratio() < SENTIMENT_MODIFIER_RATE {
            if let Some(modifier) = modifier {
                enhanced = format!("{} {}", enhanced, modifier);
            }
        }

        // Inner draw first: the filler source itself may come back empty.
        let filler = self.draw_filler(rng);
        if rng.ratio() < FILLER_RATE && !filler.is_empty() {
            enhanced = format!("{} {}", enhanced, filler);
        }

        enhanced
    }

    fn sentiment_modifiers(sentiment: Sentiment) -> &'static [&'static str] {
        match sentiment {
            Sentiment::Positive => POSITIVE_MODIFIERS,
            Sentiment::Negative => NEGATIVE_MODIFIERS,
            Sentiment::Neutral => NEUTRAL_MODIFIERS,
        }
    }

    /// Filler source: an inner 50% draw decides whether a phrase is
    /// produced at all; the empty branch makes the outer append a no-op.
    fn draw_filler(&self, rng: &mut dyn RandomSource) -> &'static str {
        if rng.ratio() < FILLER_DRAW_RATE {
            pick(rng, FILLERS).copied().unwrap_or("")
        } else {
            ""
        }
    }
}
