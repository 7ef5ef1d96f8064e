//! Candidate filter shared by the script and style scanners.

use baseline_core::types::policy::CompliancePolicy;

use super::oracle::ComplianceOracle;
use crate::whitelist::WhitelistSet;

/// Whitelist check followed by the oracle query, under one run policy.
#[derive(Debug, Clone, Copy)]
pub struct ComplianceGate<'a> {
    oracle: &'a ComplianceOracle,
    policy: CompliancePolicy,
    whitelist: &'a WhitelistSet,
}

impl<'a> ComplianceGate<'a> {
    pub fn new(
        oracle: &'a ComplianceOracle,
        policy: CompliancePolicy,
        whitelist: &'a WhitelistSet,
    ) -> Self {
        Self {
            oracle,
            policy,
            whitelist,
        }
    }

    pub fn policy(&self) -> &CompliancePolicy {
        &self.policy
    }

    /// Returns the lowercase feature id when `candidate` must be reported.
    /// Whitelisted names are dropped before the oracle is consulted.
    pub fn violation_for(&self, candidate: &str) -> Option<String> {
        let feature = candidate.to_lowercase();
        if self.whitelist.contains(&feature) {
            return None;
        }
        if self.oracle.is_compliant(&feature, &self.policy) {
            return None;
        }
        Some(feature)
    }
}
