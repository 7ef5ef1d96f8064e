//! Per-file read errors.

use std::path::PathBuf;

use super::error_code::{self, BaselineErrorCode};

/// Errors that can occur while reading a source file before scanning it.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("File too large: {path} ({size} bytes, max {max})")]
    FileTooLarge { path: PathBuf, size: u64, max: u64 },
}

impl BaselineErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::FileTooLarge { .. } => error_code::FILE_TOO_LARGE,
            Self::Io { .. } => error_code::SCAN_ERROR,
        }
    }
}
