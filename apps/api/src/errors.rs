use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::GatewayError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant is terminal for the current request — nothing is retried
/// internally, and the handler never returns a partially populated report.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unreadable document: {0}")]
    UnreadableDocument(String),

    #[error("Failed to parse {phase} response: {detail}")]
    PhaseParse { phase: &'static str, detail: String },

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnreadableDocument(msg) => {
                (StatusCode::BAD_REQUEST, "UNREADABLE_DOCUMENT", msg.clone())
            }
            AppError::PhaseParse { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "PHASE_PARSE_ERROR",
                self.to_string(),
            ),
            AppError::Gateway(e) => {
                tracing::error!("Gateway error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "GATEWAY_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
