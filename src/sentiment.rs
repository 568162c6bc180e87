//! Keyword-based fallback sentiment classifier.
//!
//! Used whenever the remote sentiment API cannot answer. Two fixed word lists
//! are matched against the lower-cased review by substring containment, and the
//! tallies are turned into a label, a confidence and a probability spread.
//! Pure and deterministic: the same text always yields the same result.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use utoipa::ToSchema;

/// Words that push a review towards `Positive`.
pub const POSITIVE_WORDS: [&str; 20] = [
    "love", "great", "amazing", "excellent", "best", "good", "awesome",
    "fantastic", "wonderful", "perfect", "happy", "satisfied", "recommend",
    "beautiful", "stunning", "fast", "smooth", "quality", "worth", "incredible",
];

/// Words that push a review towards `Negative`.
pub const NEGATIVE_WORDS: [&str; 20] = [
    "hate", "bad", "terrible", "worst", "poor", "awful", "horrible",
    "disappointed", "waste", "broken", "slow", "expensive", "overpriced",
    "issue", "problem", "defect", "useless", "regret", "return", "freezing",
];

const BASE_CONFIDENCE: f64 = 0.6;
const CONFIDENCE_PER_HIT: f64 = 0.08;
const MAX_CONFIDENCE: f64 = 0.95;

// Anything that is neither a word character nor whitespace.
static PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s]").expect("punctuation pattern is valid"));

// ============================================================================
// Data Model
// ============================================================================

/// Polarity of a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Probability assigned to each label. Field names match the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Probabilities {
    #[serde(rename = "Positive", default)]
    pub positive: f64,
    #[serde(rename = "Neutral", default)]
    pub neutral: f64,
    #[serde(rename = "Negative", default)]
    pub negative: f64,
}

impl Probabilities {
    /// Probability of a single label.
    pub fn get(&self, label: SentimentLabel) -> f64 {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Neutral => self.neutral,
            SentimentLabel::Negative => self.negative,
        }
    }

    pub fn total(&self) -> f64 {
        self.positive + self.neutral + self.negative
    }
}

/// Outcome of classifying one review, from the remote API or the fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClassificationResult {
    pub sentiment: SentimentLabel,
    /// Confidence in `sentiment`, in `[0, 1]`
    pub confidence: f64,
    pub probabilities: Probabilities,
    /// Display-only normalized text. The remote `/compare` body omits it.
    #[serde(default)]
    pub cleaned_text: String,
}

// ============================================================================
// Classifier
// ============================================================================

/// Number of positive and negative lexicon entries found in `text`.
///
/// Each entry counts at most once and matches anywhere, so "freezing" inside
/// "unfreezing" is a hit.
pub fn lexicon_counts(text: &str) -> (usize, usize) {
    let lowered = text.to_lowercase();
    let positive = POSITIVE_WORDS.iter().filter(|w| lowered.contains(*w)).count();
    let negative = NEGATIVE_WORDS.iter().filter(|w| lowered.contains(*w)).count();
    (positive, negative)
}

/// Classifies `text` without touching the network. Never fails.
pub fn fallback_analysis(text: &str) -> ClassificationResult {
    let (positive, negative) = lexicon_counts(text);
    debug!(positive, negative, "lexicon hits");

    let (sentiment, confidence, probabilities) = if positive > negative {
        let confidence = hit_confidence(positive);
        (
            SentimentLabel::Positive,
            confidence,
            Probabilities {
                positive: confidence,
                neutral: (1.0 - confidence) * 0.6,
                negative: (1.0 - confidence) * 0.4,
            },
        )
    } else if negative > positive {
        let confidence = hit_confidence(negative);
        (
            SentimentLabel::Negative,
            confidence,
            Probabilities {
                positive: (1.0 - confidence) * 0.3,
                neutral: (1.0 - confidence) * 0.7,
                negative: confidence,
            },
        )
    } else {
        (
            SentimentLabel::Neutral,
            0.5,
            Probabilities {
                positive: 0.25,
                neutral: 0.5,
                negative: 0.25,
            },
        )
    };

    ClassificationResult {
        sentiment,
        confidence,
        probabilities,
        cleaned_text: clean_text(text),
    }
}

fn hit_confidence(hits: usize) -> f64 {
    (BASE_CONFIDENCE + hits as f64 * CONFIDENCE_PER_HIT).min(MAX_CONFIDENCE)
}

/// Lower-cases, strips punctuation and drops tokens of two characters or less.
pub fn clean_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    PUNCTUATION
        .replace_all(&lowered, "")
        .split_whitespace()
        .filter(|token| token.chars().count() > 2)
        .collect::<Vec<_>>()
        .join(" ")
}
