use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::pdf::TextExtractionError;

const PDF_ERROR_MESSAGE: &str =
    "Failed to read the PDF file. Please make sure it is a valid, unencrypted PDF document.";
const AI_UNAVAILABLE_MESSAGE: &str =
    "AI analysis service is temporarily unavailable. Please try again later.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every error body has the shape `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    PdfExtraction(#[from] TextExtractionError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Where an unexpected error's message points, judged from its text.
#[derive(Debug, PartialEq, Eq)]
enum InternalKind {
    Pdf,
    AiProvider,
    Other,
}

fn classify_internal(message: &str) -> InternalKind {
    if message.contains("PDF") {
        return InternalKind::Pdf;
    }
    let mentions_ai = message
        .split(|c: char| !c.is_ascii_alphanumeric())
        .any(|word| word == "AI");
    if mentions_ai || message.contains("OpenRouter") {
        InternalKind::AiProvider
    } else {
        InternalKind::Other
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::PdfExtraction(e) => {
                tracing::warn!("PDF extraction error: {e}");
                (StatusCode::BAD_REQUEST, PDF_ERROR_MESSAGE.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                let text = format!("{e:#}");
                match classify_internal(&text) {
                    InternalKind::Pdf => (StatusCode::BAD_REQUEST, PDF_ERROR_MESSAGE.to_string()),
                    InternalKind::AiProvider => (
                        StatusCode::SERVICE_UNAVAILABLE,
                        AI_UNAVAILABLE_MESSAGE.to_string(),
                    ),
                    InternalKind::Other => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Failed to process resume: {text}"),
                    ),
                }
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
