//! Client-side review session.
//!
//! Holds the state a review form needs between actions as an explicit value
//! instead of globals, validates input before anything is classified, and
//! decides which notice to show once a result has been rendered. Requests take
//! `&mut self`, so one session never has two in flight.

use rand::seq::SliceRandom;
use thiserror::Error;
use tracing::info;

use crate::compare::{compare, Comparison};
use crate::remote::{Analysis, PairedAnalysis, RemoteClassifier};
use crate::sentiment::{ClassificationResult, SentimentLabel};

/// Shortest review, after trimming, that will be classified.
pub const MIN_REVIEW_CHARS: usize = 3;

/// Whether `text` is long enough to classify.
pub fn is_eligible(text: &str) -> bool {
    text.trim().chars().count() >= MIN_REVIEW_CHARS
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("Please enter at least 3 characters.")]
    TooShort,

    #[error("Please enter at least 3 characters for both reviews.")]
    TooShortPair,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhoneModel {
    #[default]
    Iphone,
    Samsung,
    General,
}

impl PhoneModel {
    /// Value sent as `phone_model`.
    pub fn wire_name(&self) -> &'static str {
        match self {
            PhoneModel::Iphone => "iphone",
            PhoneModel::Samsung => "samsung",
            PhoneModel::General => "General",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PhoneModel::Iphone => "iPhone 15",
            PhoneModel::Samsung => "Galaxy S24",
            PhoneModel::General => "General",
        }
    }
}

#[derive(Debug, Default)]
pub struct ReviewSession {
    pub selected_phone: PhoneModel,
}

impl ReviewSession {
    pub fn new(selected_phone: PhoneModel) -> Self {
        Self { selected_phone }
    }

    /// Classifies one review for the selected phone. The returned analysis is
    /// always complete; remote failures were already replaced by the fallback.
    pub async fn analyze(&mut self, client: &RemoteClassifier, text: &str) -> Result<Analysis, SessionError> {
        let text = text.trim();
        if !is_eligible(text) {
            return Err(SessionError::TooShort);
        }
        let analysis = client.analyze_or_fallback(text, self.selected_phone.wire_name()).await;
        info!(
            "🧠 {} review: {} ({:.2}) via {:?}",
            self.selected_phone.display_name(),
            analysis.result.sentiment,
            analysis.result.confidence,
            analysis.source
        );
        Ok(analysis)
    }

    /// Classifies both reviews and ranks them.
    pub async fn compare(
        &mut self,
        client: &RemoteClassifier,
        iphone_review: &str,
        samsung_review: &str,
    ) -> Result<(PairedAnalysis, Comparison), SessionError> {
        let (iphone_review, samsung_review) = (iphone_review.trim(), samsung_review.trim());
        if !is_eligible(iphone_review) || !is_eligible(samsung_review) {
            return Err(SessionError::TooShortPair);
        }
        let pair = client.compare_or_fallback(iphone_review, samsung_review).await;
        let comparison = compare(&pair.iphone, &pair.samsung);
        Ok((pair, comparison))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Message shown after a result has been rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: &'static str,
    /// Confident positive results get the celebratory treatment.
    pub celebrate: bool,
}

impl Notice {
    pub fn for_result(result: &ClassificationResult) -> Self {
        match result.sentiment {
            SentimentLabel::Positive if result.confidence > 0.6 => Notice {
                kind: NoticeKind::Success,
                message: "Positive sentiment detected! 🎉",
                celebrate: true,
            },
            SentimentLabel::Negative => Notice {
                kind: NoticeKind::Error,
                message: "Negative sentiment detected",
                celebrate: false,
            },
            _ => Notice {
                kind: NoticeKind::Success,
                message: "Analysis complete!",
                celebrate: false,
            },
        }
    }
}

// ============================================================================
// Sample reviews
// ============================================================================

pub const POSITIVE_SAMPLES: [&str; 3] = [
    "The iPhone 15 camera is absolutely stunning! Best photos I've ever taken with a phone.",
    "Galaxy S24 display is incredible! The colors are so vibrant and the refresh rate is buttery smooth.",
    "Love this phone! Battery life is amazing and it's super fast.",
];

pub const NEGATIVE_SAMPLES: [&str; 3] = [
    "Disappointed with the battery life. Barely lasts half a day with normal use.",
    "Overpriced for what you get. There are much better options available.",
    "The phone keeps freezing and crashing. Worst purchase I've made.",
];

pub const NEUTRAL_SAMPLES: [&str; 3] = [
    "It's okay, nothing special. Does what I need but nothing groundbreaking.",
    "Average phone for the price. Some features are good, others are lacking.",
    "Decent camera but the battery could be better. Mixed feelings overall.",
];

pub fn samples_for(label: SentimentLabel) -> &'static [&'static str] {
    match label {
        SentimentLabel::Positive => &POSITIVE_SAMPLES,
        SentimentLabel::Neutral => &NEUTRAL_SAMPLES,
        SentimentLabel::Negative => &NEGATIVE_SAMPLES,
    }
}

/// Random sample review of the given polarity, for quick testing.
pub fn random_sample(label: SentimentLabel) -> &'static str {
    samples_for(label)
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::Verdict;
    use crate::remote::Source;
    use crate::sentiment::fallback_analysis;
    use std::time::Duration;

    async fn offline_client() -> RemoteClassifier {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        RemoteClassifier::new(&format!("http://{}", addr), Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn test_eligibility() {
        assert!(!is_eligible(""));
        assert!(!is_eligible("  a "));
        assert!(!is_eligible("ok\n"));
        assert!(is_eligible(" bad "));
    }

    #[tokio::test]
    async fn test_short_input_is_rejected() {
        let client = offline_client().await;
        let mut session = ReviewSession::default();
        assert_eq!(session.analyze(&client, "  a ").await.unwrap_err(), SessionError::TooShort);
        assert_eq!(
            session.compare(&client, "great phone", "ok").await.unwrap_err(),
            SessionError::TooShortPair
        );
    }

    #[tokio::test]
    async fn test_session_usable_after_cancelled_request() {
        // accepts connections and never answers
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        let client = RemoteClassifier::new(&format!("http://{}", addr), Duration::from_millis(300)).unwrap();
        let mut session = ReviewSession::new(PhoneModel::Samsung);

        let cancelled = tokio::time::timeout(Duration::from_millis(100), session.analyze(&client, "great phone")).await;
        assert!(cancelled.is_err());

        let analysis = session.analyze(&client, "great phone").await.unwrap();
        assert_eq!(analysis.source, Source::Fallback);
        assert_eq!(analysis.result.sentiment, SentimentLabel::Positive);

        let cancelled = tokio::time::timeout(
            Duration::from_millis(100),
            session.compare(&client, "great phone", "worst phone"),
        )
        .await;
        assert!(cancelled.is_err());

        let (pair, _) = session.compare(&client, "great phone", "worst phone").await.unwrap();
        assert_eq!(pair.source, Source::Fallback);
    }

    #[tokio::test]
    async fn test_offline_session_uses_fallback() {
        let client = offline_client().await;
        let mut session = ReviewSession::new(PhoneModel::Iphone);

        let analysis = session.analyze(&client, "  Love this phone!  ").await.unwrap();
        assert_eq!(analysis.source, Source::Fallback);
        assert_eq!(analysis.result, fallback_analysis("Love this phone!"));

        let (pair, comparison) = session
            .compare(
                &client,
                "Love this phone! Battery life is amazing and it's super fast.",
                "The phone keeps freezing and crashing. Worst purchase I've made.",
            )
            .await
            .unwrap();
        assert_eq!(pair.source, Source::Fallback);
        assert_eq!(comparison.verdict, Verdict::IphoneMoreFavorable);
    }

    #[test]
    fn test_notice_selection() {
        let positive = Notice::for_result(&fallback_analysis("love it"));
        assert_eq!(positive.kind, NoticeKind::Success);
        assert!(positive.celebrate);

        let negative = Notice::for_result(&fallback_analysis("worst phone"));
        assert_eq!(negative.kind, NoticeKind::Error);
        assert_eq!(negative.message, "Negative sentiment detected");

        let neutral = Notice::for_result(&fallback_analysis("It's okay, nothing special."));
        assert_eq!(neutral.message, "Analysis complete!");
        assert!(!neutral.celebrate);

        // a barely-positive remote answer is not celebrated
        let mut weak = fallback_analysis("love it");
        weak.confidence = 0.55;
        assert!(!Notice::for_result(&weak).celebrate);
    }

    #[test]
    fn test_samples_match_their_label() {
        for label in [SentimentLabel::Positive, SentimentLabel::Negative] {
            for sample in samples_for(label) {
                assert_eq!(fallback_analysis(sample).sentiment, label, "{sample}");
            }
        }
        assert!(POSITIVE_SAMPLES.contains(&random_sample(SentimentLabel::Positive)));
    }
}
