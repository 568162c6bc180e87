//! Client for the remote sentiment API.
//!
//! The API is treated as an opaque collaborator: whatever it answers is taken
//! as-is. Any failure (connection, timeout, non-2xx status, unreadable body)
//! is reported as a [`RemoteError`], and the `*_or_fallback` helpers swap in
//! the local lexicon classifier so callers always get a result.

use std::fmt;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::schema::{AnalyzeRequest, CompareRequest, CompareResponse, HealthResponse};
use crate::sentiment::{fallback_analysis, ClassificationResult};

/// Why the remote API could not be used.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Network(String),

    #[error("unexpected status: {0}")]
    Status(u16),

    #[error("malformed response body: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for RemoteError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            RemoteError::Timeout
        } else if value.is_decode() {
            RemoteError::Malformed(value.to_string())
        } else {
            RemoteError::Network(value.to_string())
        }
    }
}

/// Reachability of the remote API, as shown by a status indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiStatus {
    /// Reachable and serving a trained model
    Online,
    /// Reachable, but answering from its own rule-based mode
    DemoMode,
    /// Unreachable; every request will use the local fallback
    Offline,
}

impl ApiStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ApiStatus::Online => "API Online",
            ApiStatus::DemoMode => "Demo Mode",
            ApiStatus::Offline => "Offline Mode",
        }
    }
}

impl fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Remote,
    Fallback,
}

/// A classification together with its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub result: ClassificationResult,
    pub source: Source,
}

impl Analysis {
    pub fn fallback(text: &str) -> Self {
        Analysis {
            result: fallback_analysis(text),
            source: Source::Fallback,
        }
    }
}

/// Classification of an iPhone and a Galaxy review, from one source.
#[derive(Debug, Clone, PartialEq)]
pub struct PairedAnalysis {
    pub iphone: ClassificationResult,
    pub samsung: ClassificationResult,
    pub source: Source,
}

#[derive(Clone)]
pub struct RemoteClassifier {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteClassifier {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, RemoteError> {
        Self::new(&config.api_url, config.timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Probes `GET /`. Never fails: anything but a readable 2xx is `Offline`.
    pub async fn health(&self) -> ApiStatus {
        let response = match self.client.get(self.endpoint("/")).send().await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                warn!("⚠️ [API] Health check returned {}", response.status());
                return ApiStatus::Offline;
            }
            Err(e) => {
                info!("📡 [API] Not available ({}), using offline mode", e);
                return ApiStatus::Offline;
            }
        };

        match response.json::<HealthResponse>().await {
            Ok(health) if health.model_loaded => ApiStatus::Online,
            Ok(_) => ApiStatus::DemoMode,
            Err(e) => {
                warn!("⚠️ [API] Health body unreadable: {}", e);
                ApiStatus::Offline
            }
        }
    }

    /// `POST /analyze`
    pub async fn analyze(&self, text: &str, phone_model: &str) -> Result<ClassificationResult, RemoteError> {
        let body = AnalyzeRequest {
            text: text.to_string(),
            phone_model: phone_model.to_string(),
        };
        let response = self.client.post(self.endpoint("/analyze")).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(RemoteError::Status(response.status().as_u16()));
        }
        Ok(response.json::<ClassificationResult>().await?)
    }

    /// `POST /compare`
    pub async fn compare(&self, iphone_review: &str, samsung_review: &str) -> Result<CompareResponse, RemoteError> {
        let body = CompareRequest {
            iphone_review: iphone_review.to_string(),
            samsung_review: samsung_review.to_string(),
        };
        let response = self.client.post(self.endpoint("/compare")).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(RemoteError::Status(response.status().as_u16()));
        }
        Ok(response.json::<CompareResponse>().await?)
    }

    /// Remote classification, or the local one if the API fails for any reason.
    pub async fn analyze_or_fallback(&self, text: &str, phone_model: &str) -> Analysis {
        match self.analyze(text, phone_model).await {
            Ok(result) => Analysis {
                result,
                source: Source::Remote,
            },
            Err(e) => {
                warn!("⚠️ [API] Analyze failed: {}. Using fallback analysis", e);
                Analysis::fallback(text)
            }
        }
    }

    /// Remote comparison, or two local classifications if the API fails.
    pub async fn compare_or_fallback(&self, iphone_review: &str, samsung_review: &str) -> PairedAnalysis {
        match self.compare(iphone_review, samsung_review).await {
            Ok(response) => PairedAnalysis {
                iphone: response.iphone.into(),
                samsung: response.samsung.into(),
                source: Source::Remote,
            },
            Err(e) => {
                warn!("⚠️ [API] Compare failed: {}. Using fallback analysis", e);
                PairedAnalysis {
                    iphone: Analysis::fallback(iphone_review).result,
                    samsung: Analysis::fallback(samsung_review).result,
                    source: Source::Fallback,
                }
            }
        }
    }
}
