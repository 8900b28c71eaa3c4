use anyhow::Result;
use axum::{extract::State, http::StatusCode, routing::{get, post}, Json, Router};
use engine::{
    BackendConfig, Error, HttpPreprocessor, Pipeline, PipelineConfig, SummarizeRequest,
    SummaryResponse,
};
use serde::Serialize;
use sha1::{Digest, Sha1};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub ko_backend: String,
    pub en_backend: String,
    pub backend_timeout_secs: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Pipeline<HttpPreprocessor>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeHttpResponse {
    #[serde(flatten)]
    pub result: SummaryResponse,
    pub request_id: String,
    pub took_s: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    pub request_id: String,
}

pub fn build_app(config: &ServerConfig) -> Result<Router> {
    let preprocessor = HttpPreprocessor::new(&BackendConfig {
        ko_url: config.ko_backend.clone(),
        en_url: config.en_backend.clone(),
        timeout: Duration::from_secs(config.backend_timeout_secs),
    })?;
    let state = AppState { pipeline: Pipeline::new(preprocessor, PipelineConfig::default()) };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/summarize", post(summarize_handler))
        .with_state(state)
        .layer(cors);
    Ok(app)
}

pub async fn summarize_handler(
    State(state): State<AppState>,
    Json(request): Json<SummarizeRequest>,
) -> std::result::Result<Json<SummarizeHttpResponse>, (StatusCode, Json<ErrorBody>)> {
    let start = std::time::Instant::now();
    let request_id = request_id_for(&request.text);

    match state.pipeline.run(&request).await {
        Ok(result) => {
            tracing::info!(%request_id, sentences = result.sentences.original, "summarize ok");
            Ok(Json(SummarizeHttpResponse {
                result,
                request_id,
                took_s: start.elapsed().as_secs_f64(),
            }))
        }
        Err(err) => {
            let status = status_for(&err);
            tracing::warn!(%request_id, %status, error = %err, "summarize failed");
            Err((status, Json(ErrorBody { error: err.to_string(), request_id })))
        }
    }
}

fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
        Error::PreprocessingUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        Error::ComputationFault(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn request_id_for(text: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(text.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..12].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_ids_are_short_and_stable() {
        let a = request_id_for("same text");
        let b = request_id_for("same text");
        assert_eq!(a, b);
        assert_eq!(a.len(), 12);
        assert_ne!(a, request_id_for("other text"));
    }

    #[test]
    fn error_taxonomy_maps_to_http_statuses() {
        assert_eq!(status_for(&Error::InvalidInput("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(&Error::PreprocessingUnavailable("x".into())),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_for(&Error::ComputationFault("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
