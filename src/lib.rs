//! Phone review sentiment analysis.
//!
//! A lexicon-based classifier that always answers, a client for a remote
//! sentiment API that falls back to it, and the HTTP service both speak.

pub mod api;
pub mod compare;
pub mod config;
pub mod remote;
pub mod schema;
pub mod sentiment;
pub mod session;

pub use compare::{compare, Comparison, Verdict};
pub use config::Config;
pub use remote::{Analysis, ApiStatus, RemoteClassifier, RemoteError, Source};
pub use sentiment::{fallback_analysis, ClassificationResult, Probabilities, SentimentLabel};
pub use session::{Notice, PhoneModel, ReviewSession, SessionError};
