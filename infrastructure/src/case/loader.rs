//! Case intake from JSON files.

use panel_domain::{Case, DomainError};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaseLoadError {
    #[error("Failed to read case file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid case file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Invalid(#[from] DomainError),
}

/// Reads `{id, title, description, subject, prior_messages}` case files
pub struct CaseLoader;

impl CaseLoader {
    pub fn load(path: impl AsRef<Path>) -> Result<Case, CaseLoadError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CaseLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let case: Case = serde_json::from_str(&json).map_err(|source| CaseLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        case.validate()?;
        Ok(case)
    }
}
