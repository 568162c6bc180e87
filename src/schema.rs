//! JSON bodies shared by the HTTP service and the remote client.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::sentiment::{ClassificationResult, Probabilities, SentimentLabel};

fn default_phone_model() -> String {
    "General".to_string()
}

/// Body of `POST /analyze`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    #[schema(example = "Love this phone! Battery life is amazing and it's super fast.")]
    pub text: String,
    #[serde(default = "default_phone_model")]
    #[schema(example = "iphone")]
    pub phone_model: String,
}

/// Body of `POST /compare`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompareRequest {
    pub iphone_review: String,
    pub samsung_review: String,
}

/// Per-phone entry of a `/compare` response. Unlike `/analyze`, no cleaned text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CompareEntry {
    pub sentiment: SentimentLabel,
    pub confidence: f64,
    pub probabilities: Probabilities,
}

impl From<ClassificationResult> for CompareEntry {
    fn from(result: ClassificationResult) -> Self {
        CompareEntry {
            sentiment: result.sentiment,
            confidence: result.confidence,
            probabilities: result.probabilities,
        }
    }
}

impl From<CompareEntry> for ClassificationResult {
    fn from(entry: CompareEntry) -> Self {
        ClassificationResult {
            sentiment: entry.sentiment,
            confidence: entry.confidence,
            probabilities: entry.probabilities,
            cleaned_text: String::new(),
        }
    }
}

/// Response of `POST /compare`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CompareResponse {
    pub iphone: CompareEntry,
    pub samsung: CompareEntry,
}

/// Response of `GET /`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[serde(default)]
    #[schema(example = "healthy")]
    pub status: String,
    pub model_loaded: bool,
}

/// Response of `GET /sample-reviews`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SampleReviewsResponse {
    pub iphone: Vec<String>,
    pub samsung: Vec<String>,
}

/// Body returned with a `400` validation failure.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Text must be at least 3 characters")]
    pub detail: String,
}
