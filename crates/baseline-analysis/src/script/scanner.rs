//! ScriptScanner: parse → walk → gate → dedup for one script file.

use std::path::Path;

use baseline_core::errors::ParseError;
use tracing::{debug, warn};

use super::candidates::collect_candidates;
use crate::compliance::ComplianceGate;
use crate::parsers::ParserManager;
use crate::scanner::display_path;
use crate::violations::{ViolationKind, ViolationRecord, ViolationSet};

/// Scans script sources for non-compliant feature usage.
///
/// Owns its parsers; one scanner per thread of work.
pub struct ScriptScanner<'a> {
    gate: ComplianceGate<'a>,
    parsers: ParserManager,
    root: Option<&'a Path>,
}

impl<'a> ScriptScanner<'a> {
    pub fn new(gate: ComplianceGate<'a>) -> Self {
        Self {
            gate,
            parsers: ParserManager::new(),
            root: None,
        }
    }

    /// Report file paths relative to `root`.
    pub fn with_root(mut self, root: &'a Path) -> Self {
        self.root = Some(root);
        self
    }

    /// Scan one file. Parse failures are logged and yield no violations.
    pub fn scan(&mut self, path: &Path, source: &str) -> Vec<ViolationRecord> {
        match self.try_scan(path, source) {
            Ok(records) => records,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unparseable script");
                Vec::new()
            }
        }
    }

    /// Scan one file, surfacing parse failures to the caller.
    ///
    /// Records come back in traversal order, unique per
    /// `(file, line, feature)`.
    pub fn try_scan(
        &mut self,
        path: &Path,
        source: &str,
    ) -> Result<Vec<ViolationRecord>, ParseError> {
        if source.trim().is_empty() {
            return Ok(Vec::new());
        }
        let language = ParserManager::script_language_for(path)?;
        let parsed = self.parsers.parse(source, path, language)?;

        let file = display_path(path, self.root);
        let mut violations = ViolationSet::new();
        for candidate in collect_candidates(parsed.tree.root_node(), source) {
            let Some(feature) = self.gate.violation_for(candidate.name) else {
                continue;
            };
            violations.insert(ViolationRecord {
                file: file.clone(),
                line: candidate.line,
                column: candidate.column,
                feature,
                kind: ViolationKind::Js,
                context: candidate.tag,
                function_scope: candidate.function_scope.map(str::to_string),
                message: None,
            });
        }

        debug!(
            path = %file,
            %language,
            violations = violations.len(),
            parse_time_us = parsed.parse_time_us,
            "script scanned"
        );
        Ok(violations.into_records())
    }
}
