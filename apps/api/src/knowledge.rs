//! Company Knowledge Loader — reads per-company reference documents from a
//! directory tree keyed by company name.
//!
//! Layout: `<root>/<company>/{values,about,offers}/*.md` — exactly one
//! markdown document expected under each subdirectory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::AppError;

/// The three reference documents for one company.
/// Loaded once per request, read-only thereafter.
#[derive(Debug, Clone)]
pub struct CompanyProfile {
    pub values: String,
    pub about: String,
    pub job_offering: String,
}

/// Handle to the knowledge root directory. Cheap to clone; all reads go
/// straight to disk so company data can be edited without a restart.
#[derive(Debug, Clone)]
pub struct CompanyKnowledge {
    root: PathBuf,
}

impl CompanyKnowledge {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Returns the available company names: the immediate subdirectory names
    /// of the knowledge root, sorted. An absent root yields an empty list.
    pub fn list_companies(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.root) else {
            return Vec::new();
        };

        let mut companies: Vec<String> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_dir())
            .filter_map(|e| e.file_name().into_string().ok())
            .collect();
        companies.sort();
        companies
    }

    /// Loads the full profile for one company.
    /// Fails with `NotFound` naming the missing resource when the company
    /// directory or any of the three required sub-documents is absent.
    pub fn load(&self, company_name: &str) -> Result<CompanyProfile, AppError> {
        let company_path = self.root.join(company_name);

        if !company_path.is_dir() {
            return Err(AppError::NotFound(format!(
                "No data found for company: {company_name}"
            )));
        }

        Ok(CompanyProfile {
            values: read_company_doc(&company_path, "values", company_name)?,
            about: read_company_doc(&company_path, "about", company_name)?,
            job_offering: read_company_doc(&company_path, "offers", company_name)?,
        })
    }
}

/// Reads the first markdown document under `<company>/<subdir>/`.
fn read_company_doc(
    company_path: &Path,
    subdir: &str,
    company_name: &str,
) -> Result<String, AppError> {
    let dir = company_path.join(subdir);

    let mut docs: Vec<PathBuf> = fs::read_dir(&dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| p.extension().is_some_and(|ext| ext == "md"))
                .collect()
        })
        .unwrap_or_default();
    docs.sort();

    let Some(doc) = docs.first() else {
        return Err(AppError::NotFound(format!(
            "No {subdir} file found for company: {company_name}"
        )));
    };

    fs::read_to_string(doc)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to read {}: {e}", doc.display())))
}
