//! Document Extractor — converts an uploaded PDF into plain text.

use std::path::Path;

use crate::errors::AppError;

/// Extracts text from a PDF on disk.
/// Fails with `UnreadableDocument` when the file is not a parseable PDF or
/// yields zero extractable text (e.g. a scanned image-only document).
pub fn extract_text(pdf_path: &Path) -> Result<String, AppError> {
    let text = pdf_extract::extract_text(pdf_path).map_err(|e| {
        AppError::UnreadableDocument(format!("Could not extract text from PDF: {e}"))
    })?;

    if text.trim().is_empty() {
        return Err(AppError::UnreadableDocument(
            "Could not extract text from PDF. Please ensure the PDF contains readable text."
                .to_string(),
        ));
    }

    Ok(text)
}
