//! StyleScanner: feeds stylesheets to a `StyleAnalyzer` and gates each
//! reported usage through the compliance oracle.

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use baseline_core::errors::{PipelineResult, ProcessingError};
use tracing::{debug, warn};

use super::analyzer::{StyleAnalyzer, StyleUsage};
use crate::compliance::ComplianceGate;
use crate::scanner::display_path;
use crate::violations::{ContextTag, ViolationKind, ViolationRecord, ViolationSet};

pub struct StyleScanner<'a> {
    analyzer: &'a mut dyn StyleAnalyzer,
    gate: ComplianceGate<'a>,
    root: Option<&'a Path>,
}

impl<'a> StyleScanner<'a> {
    pub fn new(analyzer: &'a mut dyn StyleAnalyzer, gate: ComplianceGate<'a>) -> Self {
        Self {
            analyzer,
            gate,
            root: None,
        }
    }

    /// Report file paths relative to `root`.
    pub fn with_root(mut self, root: &'a Path) -> Self {
        self.root = Some(root);
        self
    }

    /// Scan every stylesheet in order. A file that cannot be read or
    /// analyzed is logged, recorded as a non-fatal error, and skipped.
    pub fn scan_all(&mut self, paths: &[PathBuf]) -> PipelineResult<Vec<ViolationRecord>> {
        let mut violations = ViolationSet::new();
        let mut result = PipelineResult::default();
        for path in paths {
            match self.scan_file(path) {
                Ok(records) => violations.extend(records),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping stylesheet");
                    result.add_error(e);
                }
            }
        }
        result.data = violations.into_records();
        result
    }

    /// Read and scan one stylesheet.
    pub fn scan_file(&mut self, path: &Path) -> Result<Vec<ViolationRecord>, ProcessingError> {
        let source = std::fs::read_to_string(path).map_err(|source| ProcessingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.scan_source(path, &source)
    }

    /// Scan stylesheet text. Blank sources produce no violations and never
    /// reach the analyzer.
    pub fn scan_source(
        &mut self,
        path: &Path,
        source: &str,
    ) -> Result<Vec<ViolationRecord>, ProcessingError> {
        if source.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut usages: Vec<StyleUsage> = Vec::new();
        let analyzer = &mut *self.analyzer;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            analyzer.analyze(path, source, &mut |usage| usages.push(usage))
        }));
        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                return Err(ProcessingError::Analyzer {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                });
            }
            Err(payload) => {
                return Err(ProcessingError::Analyzer {
                    path: path.to_path_buf(),
                    message: panic_message(payload.as_ref()),
                });
            }
        }

        let file = display_path(path, self.root);
        let mut violations = ViolationSet::new();
        for usage in usages {
            let Some(feature) = self.gate.violation_for(&usage.feature_id) else {
                continue;
            };
            violations.insert(ViolationRecord {
                file: file.clone(),
                line: usage.line,
                column: usage.column,
                feature,
                kind: ViolationKind::Css,
                context: ContextTag::Style,
                function_scope: None,
                message: Some(usage.message),
            });
        }
        debug!(path = %file, violations = violations.len(), "stylesheet scanned");
        Ok(violations.into_records())
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("analyzer panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("analyzer panicked: {s}")
    } else {
        "analyzer panicked".to_string()
    }
}
