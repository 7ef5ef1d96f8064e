//! baseline-analysis: the compliance detection engine.
//!
//! - Dataset: feature-status records keyed by lowercase feature id
//! - Compliance: the memoized feature compliance oracle
//! - Parsers: tree-sitter grammar selection for script sources
//! - Script: context-tracking syntax-tree walk that extracts candidates
//! - Style: tree-sitter-css usage analyzer and the style scanner
//! - Violations: violation records and `(file, line, feature)` dedup
//! - Engine: the sequential run pipeline merging both scanners

pub mod compliance;
pub mod dataset;
pub mod engine;
pub mod parsers;
pub mod scanner;
pub mod script;
pub mod style;
pub mod violations;
pub mod whitelist;

pub use compliance::ComplianceOracle;
pub use dataset::{BaselineLevel, FeatureDataset, FeatureStatusRecord};
pub use engine::{CompliancePipeline, RunSummary};
pub use script::ScriptScanner;
pub use style::{CssUsageAnalyzer, StyleAnalyzer, StyleScanner};
pub use violations::{ContextTag, ViolationKind, ViolationRecord, ViolationSet};
pub use whitelist::WhitelistSet;
