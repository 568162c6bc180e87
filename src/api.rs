//! HTTP surface of the sentiment service.
//!
//! Serves the same JSON contract the web client expects from the remote
//! classifier. No trained model is bundled, so every answer comes from the
//! lexicon classifier and the health probe reports `model_loaded: false`.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::schema::{
    AnalyzeRequest, CompareEntry, CompareRequest, CompareResponse, ErrorResponse, HealthResponse,
    SampleReviewsResponse,
};
use crate::sentiment::{fallback_analysis, ClassificationResult, Probabilities, SentimentLabel};
use crate::session::is_eligible;

type ApiError = (StatusCode, Json<ErrorResponse>);

#[derive(OpenApi)]
#[openapi(
    paths(health_check, analyze_sentiment, compare_phones, sample_reviews),
    components(
        schemas(
            AnalyzeRequest,
            CompareRequest,
            CompareEntry,
            CompareResponse,
            HealthResponse,
            SampleReviewsResponse,
            ErrorResponse,
            ClassificationResult,
            Probabilities,
            SentimentLabel
        )
    ),
    tags(
        (name = "sentiment", description = "Review sentiment analysis")
    )
)]
pub struct ApiDoc;

pub fn router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(health_check))
        .route("/analyze", post(analyze_sentiment))
        .route("/compare", post(compare_phones))
        .route("/sample-reviews", get(sample_reviews))
        .layer(cors)
}

// Unreadable bodies get the same `{detail}` shape as validation failures.
fn rejected(rejection: JsonRejection) -> ApiError {
    debug!("rejected request body: {}", rejection);
    (
        rejection.status(),
        Json(ErrorResponse {
            detail: rejection.body_text(),
        }),
    )
}

fn too_short() -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            detail: "Text must be at least 3 characters".to_string(),
        }),
    )
}

// Responses carry confidence to four decimal places.
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

fn classify(text: &str) -> Result<ClassificationResult, ApiError> {
    if !is_eligible(text) {
        return Err(too_short());
    }
    let mut result = fallback_analysis(text);
    result.confidence = round4(result.confidence);
    Ok(result)
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "sentiment"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        model_loaded: false,
    })
}

/// Classify a single review
#[utoipa::path(
    post,
    path = "/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Classification result", body = ClassificationResult),
        (status = 400, description = "Review too short or body unreadable", body = ErrorResponse),
        (status = 422, description = "Body does not match the request schema", body = ErrorResponse)
    ),
    tag = "sentiment"
)]
pub async fn analyze_sentiment(
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<ClassificationResult>, ApiError> {
    let Json(req) = payload.map_err(rejected)?;
    let result = classify(&req.text)?;
    debug!(phone_model = %req.phone_model, sentiment = %result.sentiment, "analyzed review");
    Ok(Json(result))
}

/// Classify an iPhone 15 review and a Galaxy S24 review
#[utoipa::path(
    post,
    path = "/compare",
    request_body = CompareRequest,
    responses(
        (status = 200, description = "Both classifications", body = CompareResponse),
        (status = 400, description = "A review is too short or body unreadable", body = ErrorResponse),
        (status = 422, description = "Body does not match the request schema", body = ErrorResponse)
    ),
    tag = "sentiment"
)]
pub async fn compare_phones(
    payload: Result<Json<CompareRequest>, JsonRejection>,
) -> Result<Json<CompareResponse>, ApiError> {
    let Json(req) = payload.map_err(rejected)?;
    let iphone = classify(&req.iphone_review)?;
    let samsung = classify(&req.samsung_review)?;
    info!("⚖️ Compared reviews: iPhone {} vs Galaxy {}", iphone.sentiment, samsung.sentiment);
    Ok(Json(CompareResponse {
        iphone: iphone.into(),
        samsung: samsung.into(),
    }))
}

/// Sample reviews for demos
#[utoipa::path(
    get,
    path = "/sample-reviews",
    responses((status = 200, description = "Three sample reviews per phone", body = SampleReviewsResponse)),
    tag = "sentiment"
)]
pub async fn sample_reviews() -> Json<SampleReviewsResponse> {
    let owned = |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
    Json(SampleReviewsResponse {
        iphone: owned(&[
            "The iPhone 15 camera is absolutely stunning! Best photos I've ever taken.",
            "Battery life on my iPhone 15 is disappointing. Barely lasts a full day.",
            "It's okay, nothing special about the iPhone 15 compared to iPhone 14.",
        ]),
        samsung: owned(&[
            "Galaxy S24 display is incredible! The colors are so vibrant and smooth.",
            "Overpriced for what you get. Samsung S24 is not worth the money.",
            "The S24 is decent. Does what I need but nothing groundbreaking.",
        ]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{ApiStatus, RemoteClassifier, Source};
    use std::time::Duration;

    async fn spawn_service() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router()).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn serve() -> RemoteClassifier {
        RemoteClassifier::new(&spawn_service().await, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_analyze_rejects_short_text() {
        let err = analyze_sentiment(Ok(Json(AnalyzeRequest {
            text: "  a  ".to_string(),
            phone_model: "General".to_string(),
        })))
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert_eq!(err.1.detail, "Text must be at least 3 characters");

        let err = compare_phones(Ok(Json(CompareRequest {
            iphone_review: "great phone".to_string(),
            samsung_review: "no".to_string(),
        })))
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze_serves_fallback_result() {
        let Json(result) = analyze_sentiment(Ok(Json(AnalyzeRequest {
            text: "Love this phone! Battery life is amazing and it's super fast.".to_string(),
            phone_model: "iphone".to_string(),
        })))
        .await
        .unwrap();
        assert_eq!(result.sentiment, SentimentLabel::Positive);
        assert_eq!(result.confidence, 0.84);
        assert_eq!(result.cleaned_text, "love this phone battery life amazing and its super fast");
    }

    #[test]
    fn test_round4() {
        assert_eq!(round4(0.8399999999999999), 0.84);
        assert_eq!(round4(0.5), 0.5);
        assert_eq!(round4(0.123456), 0.1235);
    }

    #[test]
    fn test_phone_model_defaults_to_general() {
        let req: AnalyzeRequest = serde_json::from_str(r#"{"text": "nice"}"#).unwrap();
        assert_eq!(req.phone_model, "General");
    }

    #[tokio::test]
    async fn test_client_against_service() {
        let remote = serve().await;
        assert_eq!(remote.health().await, ApiStatus::DemoMode);

        let text = "The phone keeps freezing and crashing. Worst purchase I've made.";
        let analysis = remote.analyze_or_fallback(text, "samsung").await;
        assert_eq!(analysis.source, Source::Remote);
        let local = fallback_analysis(text);
        assert_eq!(analysis.result.sentiment, local.sentiment);
        assert_eq!(analysis.result.probabilities, local.probabilities);
        assert_eq!(analysis.result.cleaned_text, local.cleaned_text);
        assert!((analysis.result.confidence - local.confidence).abs() < 1e-4);

        let pair = remote
            .compare_or_fallback("Great camera, fast and smooth.", "It's okay, nothing special.")
            .await;
        assert_eq!(pair.source, Source::Remote);
        assert_eq!(pair.iphone.sentiment, SentimentLabel::Positive);
        assert_eq!(pair.samsung.sentiment, SentimentLabel::Neutral);
        assert!(pair.samsung.cleaned_text.is_empty());
    }

    #[tokio::test]
    async fn test_short_text_over_http_is_a_remote_error() {
        let remote = serve().await;
        assert!(matches!(
            remote.analyze("ab", "General").await,
            Err(crate::remote::RemoteError::Status(400))
        ));
    }

    #[tokio::test]
    async fn test_unreadable_body_gets_json_detail() {
        let base = spawn_service().await;
        let http = reqwest::Client::new();

        for (path, body, status) in [
            ("/analyze", "{not json", 400),
            ("/analyze", r#"{"txt": "great phone"}"#, 422),
            ("/compare", r#"{"iphone_review": "great phone"}"#, 422),
        ] {
            let response = http
                .post(format!("{}{}", base, path))
                .header("content-type", "application/json")
                .body(body)
                .send()
                .await
                .unwrap();
            assert_eq!(response.status().as_u16(), status, "{path} {body}");
            let error: ErrorResponse = response.json().await.unwrap();
            assert!(!error.detail.is_empty());
        }
    }

    #[tokio::test]
    async fn test_sample_reviews() {
        let Json(samples) = sample_reviews().await;
        assert_eq!(samples.iphone.len(), 3);
        assert_eq!(samples.samsung.len(), 3);
    }
}
