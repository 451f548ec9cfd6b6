//! Axum route handler for the Analysis API.

use anyhow::Context;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use bytes::Bytes;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::analysis::extractor::extract_text;
use crate::analysis::heuristic::{is_probable_resume, keyword_matches};
use crate::analysis::normalizer::{normalize, Verdict};
use crate::analysis::prompts::build_analysis_prompt;
use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;
use crate::state::AppState;

/// Documents yielding fewer characters than this are treated as unreadable.
pub const MIN_TEXT_CHARS: usize = 100;

pub const RESUME_REQUIRED: &str = "Resume PDF is required";
pub const UNREADABLE_TEXT: &str = "Could not extract readable text. Upload a valid resume PDF.";
pub const FAILED_KEYWORD_CHECK: &str =
    "Uploaded PDF is NOT a resume. Please upload a proper resume.";
pub const MODEL_REJECTED: &str = "This document does not appear to be a resume.";

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

/// An uploaded file. Lives only for the duration of one request.
#[derive(Debug)]
pub struct UploadedDocument {
    pub filename: String,
    pub bytes: Bytes,
}

#[derive(Debug, Default)]
struct AnalyzeForm {
    document: Option<UploadedDocument>,
    description: Option<String>,
    job_description: Option<String>,
}

impl AnalyzeForm {
    /// `description` wins over `job_description`; blank values count as absent.
    fn job_description(&self) -> Option<&str> {
        [&self.description, &self.job_description]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
    }
}

async fn read_form(mut multipart: Multipart) -> Result<AnalyzeForm, AppError> {
    let mut form = AnalyzeForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read multipart field: {e}")))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "resume" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| AppError::Validation("Invalid file".to_string()))?;
                // Browsers send an empty, unnamed part for an untouched file input.
                if !filename.is_empty() {
                    form.document = Some(UploadedDocument { filename, bytes });
                }
            }
            "description" | "job_description" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid {field_name}: {e}")))?;
                if field_name == "description" {
                    form.description = Some(text);
                } else {
                    form.job_description = Some(text);
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /analyze
///
/// Full pipeline: extract → keyword gate → prompt → LLM → normalize.
/// Malformed model output still yields 200 with the canned default result.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    // A request that is not multipart has no document part either.
    let multipart = multipart.map_err(|_| AppError::Validation(RESUME_REQUIRED.to_string()))?;
    let form = read_form(multipart).await?;

    let job_description = form.job_description().map(str::to_string);
    let Some(document) = form.document else {
        return Err(AppError::Validation(RESUME_REQUIRED.to_string()));
    };

    let span = info_span!(
        "analyze",
        request_id = %Uuid::new_v4(),
        filename = %document.filename,
        bytes = document.bytes.len(),
    );

    analyze(&state, document, job_description.as_deref())
        .instrument(span)
        .await
        .map(Json)
}

async fn analyze(
    state: &AppState,
    document: UploadedDocument,
    job_description: Option<&str>,
) -> Result<AnalysisResult, AppError> {
    let text = extract_text(state.extractor.clone(), document.bytes).await;

    let chars = text.chars().count();
    if chars < MIN_TEXT_CHARS {
        info!(chars, "Extracted text too short");
        return Err(AppError::Validation(UNREADABLE_TEXT.to_string()));
    }

    if !is_probable_resume(&text) {
        info!(keywords = keyword_matches(&text), "Keyword check failed");
        return Err(AppError::Validation(FAILED_KEYWORD_CHECK.to_string()));
    }

    let prompt = build_analysis_prompt(&text, job_description);
    let raw = state.llm.generate(&prompt).await?;

    let verdict = normalize(&raw).context("Failed to normalize model output")?;

    match verdict {
        Verdict::NotAResume => Err(AppError::Validation(MODEL_REJECTED.to_string())),
        Verdict::Analysis(result) => {
            info!(score = result.score, "Analysis complete");
            Ok(result)
        }
        Verdict::Degraded(reason) => {
            warn!("Serving default analysis: {reason}");
            Ok(AnalysisResult::default())
        }
    }
}
