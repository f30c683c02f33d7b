//! Axum route handlers for the Analysis API.

use anyhow::Context;
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::analysis::analyzer::AnalysisOutcome;
use crate::analysis::models::{AnalysisRequest, AnalysisResult, Language};
use crate::analysis::prompts::build_analysis_prompt;
use crate::errors::AppError;
use crate::extraction::pdf::extract_text_from_pdf;
use crate::llm_client::models::{is_known_model, AiModel, AVAILABLE_MODELS};
use crate::state::AppState;

pub const MAX_FILE_BYTES: usize = 10 * 1024 * 1024;
const PDF_MIME: &str = "application/pdf";
const FILE_TOO_LARGE: &str = "File size must be less than 10MB";

// ────────────────────────────────────────────────────────────────────────────
// Form parsing and validation
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct UploadedFile {
    content_type: Option<String>,
    bytes: Bytes,
}

/// Raw multipart fields, exactly as received.
#[derive(Debug, Default)]
struct AnalyzeForm {
    job_title: Option<String>,
    job_level: Option<String>,
    job_requirements: Option<String>,
    job_description: Option<String>,
    language: Option<String>,
    ai_model: Option<String>,
    resume: Option<UploadedFile>,
}

/// A form that passed every check and is ready for extraction.
#[derive(Debug)]
struct ValidatedForm {
    job_title: String,
    job_level: String,
    job_requirements: String,
    job_description: String,
    language: Language,
    model: Option<String>,
    resume: Bytes,
}

fn invalid_form(e: MultipartError) -> AppError {
    // The router's body limit trips while the file part is still streaming.
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::Validation(FILE_TOO_LARGE.to_string());
    }
    AppError::Validation(format!("Invalid form data: {}", e.body_text()))
}

async fn read_form(mut multipart: Multipart) -> Result<AnalyzeForm, AppError> {
    let mut form = AnalyzeForm::default();

    while let Some(field) = multipart.next_field().await.map_err(invalid_form)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "resume" {
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await.map_err(invalid_form)?;
            form.resume = Some(UploadedFile {
                content_type,
                bytes,
            });
            continue;
        }

        let slot = match name.as_str() {
            "jobTitle" => &mut form.job_title,
            "jobLevel" => &mut form.job_level,
            "jobRequirements" => &mut form.job_requirements,
            "jobDescription" => &mut form.job_description,
            "language" => &mut form.language,
            "aiModel" => &mut form.ai_model,
            _ => continue,
        };
        *slot = Some(field.text().await.map_err(invalid_form)?);
    }

    Ok(form)
}

/// Blank values count as missing.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Checks run in a fixed order; the first failure wins.
fn validate(form: AnalyzeForm) -> Result<ValidatedForm, AppError> {
    let resume = form
        .resume
        .ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;

    let fields = (
        present(form.job_title),
        present(form.job_level),
        present(form.job_requirements),
        present(form.job_description),
        present(form.language),
    );
    let (
        Some(job_title),
        Some(job_level),
        Some(job_requirements),
        Some(job_description),
        Some(language),
    ) = fields
    else {
        return Err(AppError::Validation("Missing required fields".to_string()));
    };

    if resume.content_type.as_deref() != Some(PDF_MIME) {
        return Err(AppError::Validation(
            "Only PDF files are allowed".to_string(),
        ));
    }

    let language: Language = language
        .parse()
        .map_err(|_| AppError::Validation("Invalid language selection".to_string()))?;

    let model = present(form.ai_model).map(|m| m.trim().to_string());
    if let Some(model) = &model {
        if !is_known_model(model) {
            return Err(AppError::Validation(
                "Invalid AI model selection".to_string(),
            ));
        }
    }

    if resume.bytes.is_empty() {
        return Err(AppError::Validation("Please select a file".to_string()));
    }
    if resume.bytes.len() > MAX_FILE_BYTES {
        return Err(AppError::Validation(FILE_TOO_LARGE.to_string()));
    }

    Ok(ValidatedForm {
        job_title,
        job_level,
        job_requirements,
        job_description,
        language,
        model,
        resume: resume.bytes,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/analyze
///
/// Multipart form → PDF text → prompt → AI analysis. Once the analysis stage is
/// reached the response is always a complete `AnalysisResult`, possibly the
/// generic fallback.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let request_id = Uuid::new_v4();
    analyze_upload(state, multipart)
        .instrument(info_span!("analyze", %request_id))
        .await
}

async fn analyze_upload(
    state: AppState,
    multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let form = validate(read_form(multipart).await?)?;
    info!(
        file_bytes = form.resume.len(),
        language = %form.language,
        "Extracting text from PDF"
    );

    let pdf = form.resume;
    let resume_text = tokio::task::spawn_blocking(move || extract_text_from_pdf(&pdf))
        .await
        .context("PDF extraction task failed")??;

    if resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Could not extract text from PDF. The file may be scanned or contain only images."
                .to_string(),
        ));
    }
    info!(chars = resume_text.chars().count(), "Extracted resume text");

    let request = AnalysisRequest {
        job_title: form.job_title,
        job_level: form.job_level,
        job_requirements: form.job_requirements,
        job_description: form.job_description,
        language: form.language,
        resume_text,
        model: form.model,
    };
    let prompt = build_analysis_prompt(&request);

    let outcome = state
        .analyzer
        .analyze(&prompt, request.model.as_deref())
        .await;
    if let AnalysisOutcome::Fallback {
        last_error: Some(e),
        ..
    } = &outcome
    {
        warn!(error = %e, "Responding with fallback analysis");
    }
    info!(fallback = outcome.is_fallback(), "Analysis finished");

    Ok(Json(outcome.into_result()))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelsResponse {
    pub models: &'static [AiModel],
    pub default_model: String,
}

/// GET /api/models
///
/// Lists the selectable models and the one used when a request names none.
pub async fn handle_list_models(State(state): State<AppState>) -> Json<ModelsResponse> {
    Json(ModelsResponse {
        models: AVAILABLE_MODELS,
        default_model: state.config.default_model.clone(),
    })
}
