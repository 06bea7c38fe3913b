//! Shared decoding for phase responses.
//!
//! Every phase expects a single text blob that is either directly parseable
//! JSON or that JSON wrapped in a markdown code fence. The fence-stripping
//! behavior is identical across phases, so it lives here once.

use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Parses one phase's model output into its schema type.
/// Failure produces a `PhaseParse` error naming the phase, which aborts the
/// whole pipeline run.
pub fn parse_phase<T: DeserializeOwned>(phase: &'static str, text: &str) -> Result<T, AppError> {
    serde_json::from_str(strip_json_fences(text)).map_err(|e| AppError::PhaseParse {
        phase,
        detail: e.to_string(),
    })
}
