//! CompliancePipeline: the sequential run over an already-resolved file list.
//!
//! Phase 1 partitions by extension, phase 2 scans scripts in list order,
//! phase 3 scans stylesheets in list order, phase 4 merges both streams
//! into one run-wide `ViolationSet`. Per-file failures never abort the run.

use std::path::{Path, PathBuf};
use std::time::Instant;

use baseline_core::constants::DEFAULT_MAX_FILE_SIZE;
use baseline_core::errors::{PipelineResult, ScanError};
use baseline_core::types::policy::CompliancePolicy;
use tracing::{debug, info, warn};

use super::summary::RunSummary;
use crate::compliance::{ComplianceGate, ComplianceOracle};
use crate::scanner::language_detect::{SourceKind, SourceLanguage};
use crate::script::ScriptScanner;
use crate::style::{StyleAnalyzer, StyleScanner};
use crate::violations::{ViolationRecord, ViolationSet};
use crate::whitelist::WhitelistSet;

pub struct CompliancePipeline {
    oracle: ComplianceOracle,
    policy: CompliancePolicy,
    whitelist: WhitelistSet,
    analyzer: Box<dyn StyleAnalyzer>,
    max_file_size: u64,
    root: Option<PathBuf>,
    last_summary: RunSummary,
}

impl CompliancePipeline {
    pub fn new(
        oracle: ComplianceOracle,
        policy: CompliancePolicy,
        whitelist: WhitelistSet,
        analyzer: Box<dyn StyleAnalyzer>,
    ) -> Self {
        Self {
            oracle,
            policy,
            whitelist,
            analyzer,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            root: None,
            last_summary: RunSummary::default(),
        }
    }

    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    /// Report violation paths relative to `root`.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn oracle(&self) -> &ComplianceOracle {
        &self.oracle
    }

    pub fn policy(&self) -> &CompliancePolicy {
        &self.policy
    }

    /// Counters from the most recent `run`.
    pub fn last_summary(&self) -> &RunSummary {
        &self.last_summary
    }

    /// Scan `files` and return every violation: script violations first,
    /// then style violations, each in file-list then traversal order.
    pub fn run(&mut self, files: &[PathBuf]) -> PipelineResult<Vec<ViolationRecord>> {
        let start = Instant::now();
        let mut summary = RunSummary {
            files_total: files.len(),
            ..RunSummary::default()
        };
        let mut result: PipelineResult<Vec<ViolationRecord>> = PipelineResult::default();

        // Phase 1: partition
        let mut scripts = Vec::new();
        let mut styles = Vec::new();
        for path in files {
            match SourceLanguage::from_path(path).map(|l| l.kind()) {
                Some(SourceKind::Script) => scripts.push(path.clone()),
                Some(SourceKind::Style) => styles.push(path.clone()),
                None => {
                    debug!(path = %path.display(), "no scanner for extension, ignoring");
                    summary.files_ignored += 1;
                }
            }
        }

        let gate = ComplianceGate::new(&self.oracle, self.policy, &self.whitelist);
        let root = self.root.as_deref();
        let mut violations = ViolationSet::new();

        // Phase 2: scripts
        let mut script_scanner = ScriptScanner::new(gate);
        if let Some(root) = root {
            script_scanner = script_scanner.with_root(root);
        }
        for path in &scripts {
            let source = match read_bounded(path, self.max_file_size) {
                Ok(source) => source,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping script");
                    summary.files_skipped += 1;
                    result.add_error(e);
                    continue;
                }
            };
            match script_scanner.try_scan(path, &source) {
                Ok(records) => {
                    summary.scripts_scanned += 1;
                    violations.extend(records);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unparseable script");
                    summary.files_skipped += 1;
                    result.add_error(e);
                }
            }
        }

        // Phase 3: stylesheets
        let mut admitted = Vec::with_capacity(styles.len());
        for path in styles {
            match check_size(&path, self.max_file_size) {
                Ok(()) => admitted.push(path),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping stylesheet");
                    summary.files_skipped += 1;
                    result.add_error(e);
                }
            }
        }
        let mut style_scanner = StyleScanner::new(&mut *self.analyzer, gate);
        if let Some(root) = root {
            style_scanner = style_scanner.with_root(root);
        }
        let style_result = style_scanner.scan_all(&admitted);
        summary.styles_scanned = admitted.len() - style_result.error_count();
        summary.files_skipped += style_result.error_count();
        result.errors.extend(style_result.errors);

        // Phase 4: merge
        violations.extend(style_result.data);
        result.data = violations.into_records();

        summary.count_violations(&result.data);
        summary.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            policy = %self.policy,
            files = summary.files_total,
            violations = summary.violations,
            skipped = summary.files_skipped,
            duration_ms = summary.duration_ms,
            "compliance run complete"
        );
        self.last_summary = summary;
        result
    }
}

fn check_size(path: &Path, max: u64) -> Result<(), ScanError> {
    let size = std::fs::metadata(path)
        .map_err(|source| ScanError::Io {
            path: path.to_path_buf(),
            source,
        })?
        .len();
    if size > max {
        return Err(ScanError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max,
        });
    }
    Ok(())
}

fn read_bounded(path: &Path, max: u64) -> Result<String, ScanError> {
    check_size(path, max)?;
    std::fs::read_to_string(path).map_err(|source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    })
}
