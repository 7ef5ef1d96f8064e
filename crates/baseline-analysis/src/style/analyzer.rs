//! The style analyzer seam.

use std::path::Path;

/// One feature usage reported by a style analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleUsage {
    /// Feature id as reported; lowercased by the scanner.
    pub feature_id: String,
    /// 1-based.
    pub line: u32,
    /// 1-based.
    pub column: u32,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum StyleAnalyzerError {
    #[error("syntax error at {line}:{column} ({error_count} error nodes)")]
    Syntax {
        line: u32,
        column: u32,
        error_count: u32,
    },

    #[error("grammar unavailable: {0}")]
    Grammar(String),

    #[error("{0}")]
    Other(String),
}

/// Reports every feature usage found in one stylesheet through `report`.
///
/// An error means the whole file is skipped; usages reported before the
/// error are discarded by the caller.
pub trait StyleAnalyzer {
    fn analyze(
        &mut self,
        path: &Path,
        source: &str,
        report: &mut dyn FnMut(StyleUsage),
    ) -> Result<(), StyleAnalyzerError>;
}
