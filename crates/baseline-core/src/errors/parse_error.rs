//! Script parser errors.

use std::path::PathBuf;

use super::error_code::{self, BaselineErrorCode};

/// Errors that can occur while parsing a script file. Recoverable: the file
/// contributes zero violations and the run continues.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Unsupported script extension: {extension}")]
    UnsupportedLanguage { extension: String },

    #[error("Grammar unavailable for {language}: {message}")]
    GrammarUnavailable { language: String, message: String },

    #[error("Tree-sitter error parsing {path}: {message}")]
    TreeSitterError { path: PathBuf, message: String },

    #[error("Syntax error in {path} at {line}:{column} ({error_count} error nodes)")]
    Syntax {
        path: PathBuf,
        line: u32,
        column: u32,
        error_count: u32,
    },
}

impl BaselineErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedLanguage { .. } => error_code::UNSUPPORTED_LANGUAGE,
            _ => error_code::PARSE_ERROR,
        }
    }
}
