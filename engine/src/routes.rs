use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
    routing::{get, post},
    Router,
};
use std::{sync::Arc, time::Instant};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::warn;

use crate::{
    engine::PhishingEngine,
    error::{validation_error, AppError},
    types::{HealthResponse, PredictRequest, PredictResponse},
};

pub type AppState = Arc<PhishingEngine>;

pub fn router(engine: AppState) -> Router {
    Router::new()
        .route("/predict", post(predict))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(engine)
}

pub async fn predict(
    State(engine): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, AppError> {
    let start = Instant::now();
    metrics::counter!("predict_requests_total").increment(1);

    let result = score_payload(&engine, payload);
    match &result {
        Ok(response) => {
            metrics::counter!("predictions_total", "label" => response.prediction.as_str())
                .increment(1);
        }
        Err(e) => {
            metrics::counter!("predict_errors_total", "kind" => e.kind()).increment(1);
        }
    }
    metrics::histogram!("predict_duration_ms").record(start.elapsed().as_secs_f64() * 1000.0);

    result.map(Json)
}

fn score_payload(
    engine: &PhishingEngine,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<PredictResponse, AppError> {
    if !engine.model_loaded() {
        return Err(AppError::ClassifierUnavailable);
    }

    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected predict body: {}", rejection.body_text());
        validation_error("Missing url")
    })?;
    let url = request.url.ok_or_else(|| validation_error("Missing url"))?;

    let prediction = engine.score(&url)?;
    Ok(PredictResponse {
        url: prediction.url,
        prediction: prediction.verdict.label,
        confidence: prediction.verdict.confidence,
    })
}

pub async fn health(State(engine): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model_loaded: engine.model_loaded(),
    })
}
