//! Side-by-side verdict for an iPhone 15 review and a Galaxy S24 review.

use crate::sentiment::{ClassificationResult, SentimentLabel};

pub const IPHONE_NAME: &str = "iPhone 15";
pub const SAMSUNG_NAME: &str = "Galaxy S24";

/// Ordinal weight of a label: Positive=3, Neutral=2, Negative=1.
pub fn label_weight(label: SentimentLabel) -> f64 {
    match label {
        SentimentLabel::Positive => 3.0,
        SentimentLabel::Neutral => 2.0,
        SentimentLabel::Negative => 1.0,
    }
}

/// Favorability of a result: label weight times confidence.
pub fn favorability(result: &ClassificationResult) -> f64 {
    label_weight(result.sentiment) * result.confidence
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Same label, iPhone review more confident
    SameLabelIphoneStronger,
    /// Same label, Galaxy review more confident
    SameLabelSamsungStronger,
    SameLabelEqual,
    /// Different labels, iPhone scores higher
    IphoneMoreFavorable,
    /// Different labels, Galaxy scores higher
    SamsungMoreFavorable,
    DifferentLabelsEqualScore,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub iphone_score: f64,
    pub samsung_score: f64,
    pub verdict: Verdict,
    pub summary: String,
}

fn percent(confidence: f64) -> i64 {
    (confidence * 100.0).round() as i64
}

fn lower(label: SentimentLabel) -> String {
    label.as_str().to_lowercase()
}

pub fn compare(iphone: &ClassificationResult, samsung: &ClassificationResult) -> Comparison {
    let iphone_score = favorability(iphone);
    let samsung_score = favorability(samsung);

    let verdict = if iphone.sentiment == samsung.sentiment {
        if iphone.confidence > samsung.confidence {
            Verdict::SameLabelIphoneStronger
        } else if samsung.confidence > iphone.confidence {
            Verdict::SameLabelSamsungStronger
        } else {
            Verdict::SameLabelEqual
        }
    } else if iphone_score > samsung_score {
        Verdict::IphoneMoreFavorable
    } else if samsung_score > iphone_score {
        Verdict::SamsungMoreFavorable
    } else {
        Verdict::DifferentLabelsEqualScore
    };

    Comparison {
        iphone_score,
        samsung_score,
        verdict,
        summary: summarize(verdict, iphone, samsung),
    }
}

fn summarize(verdict: Verdict, iphone: &ClassificationResult, samsung: &ClassificationResult) -> String {
    match verdict {
        Verdict::SameLabelIphoneStronger => format!(
            "Both reviews are {}, but the {} review has stronger sentiment ({}% vs {}%).",
            lower(iphone.sentiment),
            IPHONE_NAME,
            percent(iphone.confidence),
            percent(samsung.confidence)
        ),
        Verdict::SameLabelSamsungStronger => format!(
            "Both reviews are {}, but the {} review has stronger sentiment ({}% vs {}%).",
            lower(iphone.sentiment),
            SAMSUNG_NAME,
            percent(samsung.confidence),
            percent(iphone.confidence)
        ),
        Verdict::SameLabelEqual => format!(
            "Both reviews express similar {} sentiment with equal confidence.",
            lower(iphone.sentiment)
        ),
        Verdict::IphoneMoreFavorable => format!(
            "The {} review is more favorable ({}) compared to the {} review ({}).",
            IPHONE_NAME, iphone.sentiment, SAMSUNG_NAME, samsung.sentiment
        ),
        Verdict::SamsungMoreFavorable => format!(
            "The {} review is more favorable ({}) compared to the {} review ({}).",
            SAMSUNG_NAME, samsung.sentiment, IPHONE_NAME, iphone.sentiment
        ),
        Verdict::DifferentLabelsEqualScore => format!(
            "The reviews show different sentiments: {} is {} while {} is {}.",
            IPHONE_NAME,
            lower(iphone.sentiment),
            SAMSUNG_NAME,
            lower(samsung.sentiment)
        ),
    }
}
