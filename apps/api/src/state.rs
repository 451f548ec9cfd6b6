use std::sync::Arc;

use crate::analysis::extractor::TextExtractor;
use crate::llm_client::InferenceClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup and never mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    /// Document-to-text backend. Default: PdfTextExtractor.
    pub extractor: Arc<dyn TextExtractor>,
    /// Inference backend. Default: GeminiClient holding the API key.
    pub llm: Arc<dyn InferenceClient>,
}
