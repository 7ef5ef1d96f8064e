//! Feature Compliance Oracle tests: target rules, strict mode, memoization.

use std::sync::Arc;

use baseline_analysis::compliance::{decide, ComplianceOracle};
use baseline_analysis::dataset::{BaselineLevel, FeatureDataset, FeatureStatusRecord};
use baseline_core::types::policy::{CompliancePolicy, TargetSpec};
use proptest::prelude::*;

fn oracle() -> ComplianceOracle {
    let dataset = FeatureDataset::from_records([
        (
            "at",
            FeatureStatusRecord::new(BaselineLevel::Low).with_low_date("2021-09-01"),
        ),
        (
            "flexbox",
            FeatureStatusRecord::new(BaselineLevel::Low).with_low_date("2017-03-01"),
        ),
        (
            "fetch",
            FeatureStatusRecord::new(BaselineLevel::High)
                .with_low_date("2017-03-27")
                .with_high_date("2019-09-27"),
        ),
        ("undated-high", FeatureStatusRecord::new(BaselineLevel::High)),
        ("structuredclone", FeatureStatusRecord::new(BaselineLevel::None)),
    ]);
    ComplianceOracle::new(Arc::new(dataset))
}

#[test]
fn test_widely_requires_high() {
    let oracle = oracle();
    let policy = CompliancePolicy::widely();
    assert!(oracle.is_compliant("fetch", &policy));
    assert!(!oracle.is_compliant("at", &policy));
    assert!(!oracle.is_compliant("structuredclone", &policy));
}

#[test]
fn test_newly_accepts_low_unless_strict() {
    let oracle = oracle();
    assert!(oracle.is_compliant("at", &CompliancePolicy::newly()));
    assert!(!oracle.is_compliant("at", &CompliancePolicy::newly().strict()));
    assert!(oracle.is_compliant("fetch", &CompliancePolicy::newly().strict()));
    assert!(!oracle.is_compliant("structuredclone", &CompliancePolicy::newly()));
}

/// Low date 2017 against target year 2020 passes.
#[test]
fn test_year_compares_low_date() {
    let oracle = oracle();
    assert!(oracle.is_compliant("flexbox", &CompliancePolicy::year(2020)));
    assert!(oracle.is_compliant("flexbox", &CompliancePolicy::year(2017)));
    assert!(!oracle.is_compliant("flexbox", &CompliancePolicy::year(2016)));
    assert!(!oracle.is_compliant("at", &CompliancePolicy::year(2020)));
    assert!(!oracle.is_compliant("flexbox", &CompliancePolicy::year(2020).strict()));
}

#[test]
fn test_year_without_dates_falls_back_to_level() {
    let oracle = oracle();
    assert!(oracle.is_compliant("undated-high", &CompliancePolicy::year(2000)));
    assert!(!oracle.is_compliant("structuredclone", &CompliancePolicy::year(2030)));
}

/// Undocumented identifiers are never flagged.
#[test]
fn test_unknown_feature_is_compliant() {
    let oracle = oracle();
    for policy in [
        CompliancePolicy::widely(),
        CompliancePolicy::newly().strict(),
        CompliancePolicy::year(1999),
    ] {
        assert!(oracle.is_compliant("myHelper", &policy));
    }
}

#[test]
fn test_lookup_is_case_insensitive() {
    let oracle = oracle();
    assert!(!oracle.is_compliant("StructuredClone", &CompliancePolicy::widely()));
    assert!(!oracle.is_compliant("AT", &CompliancePolicy::widely()));
}

#[test]
fn test_memo_and_cache_invalidation() {
    let oracle = oracle();
    let policy = CompliancePolicy::widely();
    assert_eq!(oracle.cached_decisions(), 0);
    oracle.is_compliant("at", &policy);
    oracle.is_compliant("At", &policy);
    assert_eq!(oracle.cached_decisions(), 1);
    oracle.is_compliant("at", &CompliancePolicy::newly());
    assert_eq!(oracle.cached_decisions(), 2);
    oracle.clear_cache();
    assert_eq!(oracle.cached_decisions(), 0);
    assert!(!oracle.is_compliant("at", &policy));
}

#[test]
fn test_replace_dataset_invalidates_memo() {
    let mut oracle = oracle();
    let policy = CompliancePolicy::widely();
    assert!(!oracle.is_compliant("at", &policy));
    oracle.replace_dataset(Arc::new(FeatureDataset::from_records([(
        "at",
        FeatureStatusRecord::new(BaselineLevel::High),
    )])));
    assert_eq!(oracle.cached_decisions(), 0);
    assert!(oracle.is_compliant("at", &policy));
}

fn level_strategy() -> impl Strategy<Value = BaselineLevel> {
    prop_oneof![
        Just(BaselineLevel::High),
        Just(BaselineLevel::Low),
        Just(BaselineLevel::None),
    ]
}

fn target_strategy() -> impl Strategy<Value = TargetSpec> {
    prop_oneof![
        Just(TargetSpec::Widely),
        Just(TargetSpec::Newly),
        (2010u16..2030).prop_map(TargetSpec::Year),
    ]
}

proptest! {
    /// Memoized answers equal the uncached decision, call after call.
    #[test]
    fn prop_memo_is_deterministic(
        level in level_strategy(),
        low_year in proptest::option::of(2012u16..2028),
        target in target_strategy(),
        strict in any::<bool>(),
    ) {
        let mut record = FeatureStatusRecord::new(level);
        if let Some(year) = low_year {
            record = record.with_low_date(&format!("{year}-06-01"));
        }
        let expected = decide(Some(&record), &CompliancePolicy::new(target, strict));
        let oracle = ComplianceOracle::new(Arc::new(FeatureDataset::from_records([("f", record)])));
        let policy = CompliancePolicy::new(target, strict);
        prop_assert_eq!(oracle.is_compliant("f", &policy), expected);
        prop_assert_eq!(oracle.is_compliant("F", &policy), expected);
        prop_assert_eq!(oracle.decide_uncached("f", &policy), expected);
    }

    /// Strict mode never lets a newly available feature through.
    #[test]
    fn prop_strict_rejects_low(
        low_year in proptest::option::of(2012u16..2028),
        target in target_strategy(),
    ) {
        let mut record = FeatureStatusRecord::new(BaselineLevel::Low);
        if let Some(year) = low_year {
            record = record.with_low_date(&format!("{year}-01-15"));
        }
        prop_assert!(!decide(Some(&record), &CompliancePolicy::new(target, true)));
    }

    /// Relaxing strict mode never turns a pass into a fail.
    #[test]
    fn prop_strict_only_narrows(
        level in level_strategy(),
        target in target_strategy(),
    ) {
        let record = FeatureStatusRecord::new(level).with_low_date("2019-01-01");
        let strict = decide(Some(&record), &CompliancePolicy::new(target, true));
        let lenient = decide(Some(&record), &CompliancePolicy::new(target, false));
        prop_assert!(!strict || lenient);
    }
}
