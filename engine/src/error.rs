use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::{model::InferenceError, validator::UrlRejection};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid URL: {0}")]
    Rejected(#[from] UrlRejection),

    #[error("Model not loaded")]
    ClassifierUnavailable,

    #[error("Model inference error: {0}")]
    Inference(#[from] InferenceError),
}

impl AppError {
    /// Short label used for error metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::Rejected(UrlRejection::Empty) => "invalid_input",
            AppError::Rejected(UrlRejection::Malformed(_)) => "malformed_url",
            AppError::Rejected(UrlRejection::UnsupportedScheme(_)) => "unsupported_scheme",
            AppError::Rejected(UrlRejection::MissingHost) => "missing_host",
            AppError::ClassifierUnavailable => "classifier_unavailable",
            AppError::Inference(_) => "inference_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) | AppError::Rejected(_) => StatusCode::BAD_REQUEST,
            AppError::ClassifierUnavailable | AppError::Inference(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match &self {
            AppError::InvalidInput(_) | AppError::Rejected(_) => self.to_string(),
            AppError::ClassifierUnavailable => {
                tracing::error!("Prediction requested but no model is loaded");
                self.to_string()
            }
            AppError::Inference(_) => {
                tracing::error!("Prediction failed: {}", self);
                "Internal prediction error".to_string()
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }));

        (status, body).into_response()
    }
}

// Helper function for creating validation errors
pub fn validation_error(msg: &str) -> AppError {
    AppError::InvalidInput(msg.to_string())
}
