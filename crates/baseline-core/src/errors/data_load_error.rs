//! Feature dataset loading errors.

use std::path::PathBuf;

use super::error_code::{self, BaselineErrorCode};

/// Errors raised while loading the feature-status dataset. Always fatal.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("Feature dataset not found: {path}")]
    NotFound { path: PathBuf },

    #[error("IO error reading feature dataset {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Feature dataset {path} is not valid JSON: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Malformed feature dataset entry `{feature}`: {message}")]
    Malformed { feature: String, message: String },
}

impl BaselineErrorCode for DataLoadError {
    fn error_code(&self) -> &'static str {
        error_code::DATA_LOAD_ERROR
    }
}
