//! Stylesheet processing errors.

use std::path::PathBuf;

use super::error_code::{self, BaselineErrorCode};

/// Errors raised while running one stylesheet through the usage analyzer.
/// Recoverable: the file is skipped and the remaining files are scanned.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("IO error reading stylesheet {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Style analyzer failed on {path}: {message}")]
    Analyzer { path: PathBuf, message: String },
}

impl BaselineErrorCode for ProcessingError {
    fn error_code(&self) -> &'static str {
        error_code::PROCESSING_ERROR
    }
}
