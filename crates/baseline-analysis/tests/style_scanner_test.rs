//! Style Usage Scanner tests: analyzer reports through the oracle, per-file
//! failure isolation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use baseline_analysis::compliance::{ComplianceGate, ComplianceOracle};
use baseline_analysis::dataset::{BaselineLevel, FeatureDataset, FeatureStatusRecord};
use baseline_analysis::style::{StyleAnalyzer, StyleAnalyzerError, StyleUsage};
use baseline_analysis::violations::{ContextTag, ViolationKind};
use baseline_analysis::{CssUsageAnalyzer, StyleScanner, WhitelistSet};
use baseline_core::errors::{PipelineError, ProcessingError};
use baseline_core::types::policy::{BrowserTarget, CompliancePolicy};
use tempfile::TempDir;

fn gap_dataset() -> Arc<FeatureDataset> {
    Arc::new(FeatureDataset::from_records([(
        "gap",
        FeatureStatusRecord::new(BaselineLevel::Low)
            .with_low_date("2021-04-26")
            .with_support("chrome", "84")
            .with_support("safari", "14.1"),
    )]))
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Reports `gap` on line 1 for every file; fails on `bad.css`, panics on
/// `panic.css`.
struct ScriptedAnalyzer;

impl StyleAnalyzer for ScriptedAnalyzer {
    fn analyze(
        &mut self,
        path: &Path,
        _source: &str,
        report: &mut dyn FnMut(StyleUsage),
    ) -> Result<(), StyleAnalyzerError> {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        report(StyleUsage {
            feature_id: "GAP".to_string(),
            line: 1,
            column: 1,
            message: format!("gap in {name}"),
        });
        match name {
            "bad.css" => Err(StyleAnalyzerError::Other("unsupported syntax".to_string())),
            "panic.css" => panic!("analyzer bug"),
            _ => Ok(()),
        }
    }
}

#[test]
fn test_gap_violation_carries_analyzer_message() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "site.css", ".row {\n  gap: 1rem;\n}\n");

    let dataset = gap_dataset();
    let oracle = ComplianceOracle::new(dataset.clone());
    let whitelist = WhitelistSet::default();
    let mut analyzer = CssUsageAnalyzer::new(
        vec![BrowserTarget::parse("safari 13").unwrap()],
        dataset,
    );
    let mut scanner = StyleScanner::new(
        &mut analyzer,
        ComplianceGate::new(&oracle, CompliancePolicy::widely(), &whitelist),
    )
    .with_root(dir.path());

    let result = scanner.scan_all(&[path]);
    assert!(result.is_clean());
    assert_eq!(result.data.len(), 1);
    let v = &result.data[0];
    assert_eq!(v.file, "site.css");
    assert_eq!(v.feature, "gap");
    assert_eq!(v.kind, ViolationKind::Css);
    assert_eq!(v.context, ContextTag::Style);
    assert_eq!((v.line, v.column), (2, 3));
    assert_eq!(
        v.message.as_deref(),
        Some("CSS property `gap` is not supported by safari 13")
    );
}

#[test]
fn test_newly_target_accepts_gap() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "site.css", ".row { gap: 1rem; }");
    let dataset = gap_dataset();
    let oracle = ComplianceOracle::new(dataset.clone());
    let whitelist = WhitelistSet::default();
    let mut analyzer = CssUsageAnalyzer::new(Vec::new(), dataset);
    let mut scanner = StyleScanner::new(
        &mut analyzer,
        ComplianceGate::new(&oracle, CompliancePolicy::newly(), &whitelist),
    );
    assert!(scanner.scan_all(&[path]).data.is_empty());
}

#[test]
fn test_whitelist_applies_to_styles() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "site.css", ".row { gap: 1rem; }");
    let dataset = gap_dataset();
    let oracle = ComplianceOracle::new(dataset.clone());
    let whitelist = WhitelistSet::new(["Gap"]);
    let mut analyzer = CssUsageAnalyzer::new(Vec::new(), dataset);
    let mut scanner = StyleScanner::new(
        &mut analyzer,
        ComplianceGate::new(&oracle, CompliancePolicy::widely(), &whitelist),
    );
    assert!(scanner.scan_all(&[path]).data.is_empty());
}

#[test]
fn test_blank_stylesheet_is_skipped() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "empty.css", "   \n\n");
    let oracle = ComplianceOracle::new(gap_dataset());
    let whitelist = WhitelistSet::default();
    let mut analyzer = ScriptedAnalyzer;
    let mut scanner = StyleScanner::new(
        &mut analyzer,
        ComplianceGate::new(&oracle, CompliancePolicy::widely(), &whitelist),
    );
    let result = scanner.scan_all(&[path]);
    assert!(result.is_clean());
    assert!(result.data.is_empty());
}

/// One failing file does not affect the others.
#[test]
fn test_failing_files_are_isolated() {
    let dir = TempDir::new().unwrap();
    let files = vec![
        write(&dir, "a.css", ".a{}"),
        write(&dir, "bad.css", ".b{}"),
        write(&dir, "panic.css", ".c{}"),
        dir.path().join("missing.css"),
        write(&dir, "d.css", ".d{}"),
    ];
    let oracle = ComplianceOracle::new(gap_dataset());
    let whitelist = WhitelistSet::default();
    let mut analyzer = ScriptedAnalyzer;
    let mut scanner = StyleScanner::new(
        &mut analyzer,
        ComplianceGate::new(&oracle, CompliancePolicy::widely(), &whitelist),
    )
    .with_root(dir.path());

    let result = scanner.scan_all(&files);
    let files: Vec<_> = result.data.iter().map(|v| v.file.as_str()).collect();
    assert_eq!(files, vec!["a.css", "d.css"]);
    assert_eq!(result.data[0].message.as_deref(), Some("gap in a.css"));

    assert_eq!(result.error_count(), 3);
    assert!(result.errors.iter().all(|e| matches!(e, PipelineError::Processing(_))));
    assert!(matches!(
        &result.errors[2],
        PipelineError::Processing(ProcessingError::Io { .. })
    ));
}

#[test]
fn test_layout_fixture_against_web_features() {
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../test-fixtures");
    let dataset = Arc::new(FeatureDataset::load(&fixtures.join("dataset/web-features.json")).unwrap());
    let oracle = ComplianceOracle::new(dataset.clone());
    let whitelist = WhitelistSet::default();
    let mut analyzer = CssUsageAnalyzer::new(
        vec![BrowserTarget::parse("firefox 100").unwrap()],
        dataset,
    );
    let mut scanner = StyleScanner::new(
        &mut analyzer,
        ComplianceGate::new(&oracle, CompliancePolicy::widely(), &whitelist),
    );

    let result = scanner.scan_all(&[fixtures.join("styles/layout.css")]);
    assert!(result.is_clean());
    let sites: Vec<_> = result
        .data
        .iter()
        .map(|v| (v.feature.as_str(), v.line))
        .collect();
    assert_eq!(sites, vec![("container-queries", 6), ("has", 7)]);
    assert_eq!(
        result.data[0].message.as_deref(),
        Some("CSS at-rule `@container` is not supported by firefox 100")
    );
}
