//! The memoized compliance decision.
//!
//! Unknown features are compliant: undocumented identifiers are never
//! flagged, at the cost of missing uncatalogued features.

use std::cell::RefCell;
use std::sync::Arc;

use baseline_core::types::collections::FxHashMap;
use baseline_core::types::policy::{CompliancePolicy, TargetSpec};
use tracing::trace;

use crate::dataset::{BaselineLevel, FeatureDataset, FeatureStatusRecord};

/// Memo key. A decision is a pure function of this key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DecisionKey {
    pub feature_id: String,
    pub target: TargetSpec,
    pub strict: bool,
}

/// Uncached decision for one record under one policy.
pub fn decide(record: Option<&FeatureStatusRecord>, policy: &CompliancePolicy) -> bool {
    let Some(record) = record else {
        return true;
    };

    let passes = match policy.target {
        TargetSpec::Widely => record.level == BaselineLevel::High,
        TargetSpec::Newly => match record.level {
            BaselineLevel::High => true,
            BaselineLevel::Low => !policy.strict,
            BaselineLevel::None => false,
        },
        TargetSpec::Year(year) => match record.comparison_year() {
            Some(since) => since <= year,
            None => record.level == BaselineLevel::High,
        },
    };

    // Strictness only downgrades newly available features.
    if policy.strict && record.level == BaselineLevel::Low {
        return false;
    }
    passes
}

/// Answers `is_compliant(feature, policy)` over a shared, read-only dataset.
///
/// The memo table is written by the single scanning thread only; it never
/// evicts and is bounded by the number of distinct features referenced.
#[derive(Debug)]
pub struct ComplianceOracle {
    dataset: Arc<FeatureDataset>,
    memo: RefCell<FxHashMap<DecisionKey, bool>>,
}

impl ComplianceOracle {
    pub fn new(dataset: Arc<FeatureDataset>) -> Self {
        Self {
            dataset,
            memo: RefCell::new(FxHashMap::default()),
        }
    }

    pub fn dataset(&self) -> &Arc<FeatureDataset> {
        &self.dataset
    }

    /// Whether `feature_id` (any case) meets `policy`.
    pub fn is_compliant(&self, feature_id: &str, policy: &CompliancePolicy) -> bool {
        let key = DecisionKey {
            feature_id: feature_id.to_lowercase(),
            target: policy.target,
            strict: policy.strict,
        };
        if let Some(&cached) = self.memo.borrow().get(&key) {
            return cached;
        }

        let decision = decide(self.dataset.get(&key.feature_id), policy);
        trace!(feature = %key.feature_id, %policy, decision, "compliance decided");
        self.memo.borrow_mut().insert(key, decision);
        decision
    }

    /// Recompute without touching the memo.
    pub fn decide_uncached(&self, feature_id: &str, policy: &CompliancePolicy) -> bool {
        decide(self.dataset.get(feature_id), policy)
    }

    /// Number of memoized decisions.
    pub fn cached_decisions(&self) -> usize {
        self.memo.borrow().len()
    }

    /// Drop every memoized decision.
    pub fn clear_cache(&self) {
        self.memo.borrow_mut().clear();
    }

    /// Swap in a new dataset. The memo is invalidated with it.
    pub fn replace_dataset(&mut self, dataset: Arc<FeatureDataset>) {
        self.dataset = dataset;
        self.memo.get_mut().clear();
    }
}
