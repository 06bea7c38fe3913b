//! Axum route handlers for the Analysis API.

use std::io::Write;

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use crate::analysis::models::CandidateReport;
use crate::analysis::pipeline;
use crate::errors::AppError;
use crate::extract::extract_text;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CompanyListResponse {
    pub companies: Vec<String>,
    pub count: usize,
}

/// GET /
/// API information for callers poking around.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "CV Analysis API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "companies": "/companies",
            "analyze": "/analyze"
        }
    }))
}

/// GET /companies
/// Lists the companies a CV can be analyzed against — exactly the immediate
/// subdirectory names of the knowledge root.
pub async fn handle_companies(State(state): State<AppState>) -> Json<CompanyListResponse> {
    let companies = state.knowledge.list_companies();
    let count = companies.len();
    Json(CompanyListResponse { companies, count })
}

/// POST /analyze
///
/// Multipart body: `file` (PDF) + `company_name` (text). Runs the five-phase
/// analysis pipeline and returns the full `CandidateReport`.
///
/// The upload is written to a named temp file for the duration of extraction
/// only; the file is removed on drop whether extraction succeeds or not.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<CandidateReport>, AppError> {
    let mut upload: Option<(String, axum::body::Bytes)> = None;
    let mut company_name: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                upload = Some((filename, bytes));
            }
            "company_name" => {
                company_name = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(format!("Invalid company_name: {e}")))?,
                );
            }
            _ => {}
        }
    }

    let (filename, bytes) = upload
        .ok_or_else(|| AppError::Validation("Missing 'file' field in upload".to_string()))?;
    let company_name = company_name
        .ok_or_else(|| AppError::Validation("Missing 'company_name' field".to_string()))?;

    if !filename.to_lowercase().ends_with(".pdf") {
        return Err(AppError::Validation(
            "Only PDF files are supported".to_string(),
        ));
    }

    let available = state.knowledge.list_companies();
    if !available.iter().any(|c| c == &company_name) {
        return Err(AppError::NotFound(format!(
            "Company '{company_name}' not found. Available companies: {available:?}"
        )));
    }

    info!(
        "Analyzing '{filename}' ({} bytes) against company '{company_name}'",
        bytes.len()
    );

    // PDF parsing is CPU-bound — spawn_blocking to avoid blocking the async
    // executor. The temp file lives only inside the closure; dropped (and
    // deleted) there whether extraction succeeds or not.
    let cv_text = tokio::task::spawn_blocking(move || -> Result<String, AppError> {
        let mut temp = tempfile::Builder::new()
            .suffix(".pdf")
            .tempfile()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create temp file: {e}")))?;
        temp.write_all(&bytes)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to write temp file: {e}")))?;
        extract_text(temp.path())
    })
    .await
    .map_err(|e| {
        AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extraction: {e}"))
    })??;

    let profile = state.knowledge.load(&company_name)?;
    let report = pipeline::run(
        state.gateway.as_ref(),
        &cv_text,
        &profile,
        &company_name,
    )
    .await?;

    Ok(Json(report))
}
