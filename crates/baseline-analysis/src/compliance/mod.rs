//! Feature Compliance Oracle: feature-status record + policy → pass/fail,
//! and the gate both scanners push candidates through.

pub mod gate;
pub mod oracle;

pub use gate::ComplianceGate;
pub use oracle::{decide, ComplianceOracle, DecisionKey};
