//! Dataset loader tests over both accepted JSON shapes.

use std::path::{Path, PathBuf};

use baseline_analysis::dataset::{BaselineLevel, FeatureDataset};
use baseline_core::errors::{BaselineErrorCode, DataLoadError};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/dataset")
        .join(name)
}

#[test]
fn test_load_flat_shape_with_aliases() {
    let dataset = FeatureDataset::load(&fixture("flat.json")).unwrap();
    assert_eq!(dataset.len(), 7);

    let at = dataset.get("at").unwrap();
    assert_eq!(at.level, BaselineLevel::Low);
    assert_eq!(at.comparison_year(), Some(2021));

    let gap = dataset.get("GAP").unwrap();
    assert_eq!(gap.support.get("safari").unwrap().to_string(), "14.1");

    assert_eq!(dataset.get("structuredClone").unwrap().level, BaselineLevel::None);
}

#[test]
fn test_load_web_features_shape() {
    let dataset = FeatureDataset::load(&fixture("web-features.json")).unwrap();
    // the `moved` redirect stub is skipped
    assert_eq!(dataset.len(), 3);
    assert!(!dataset.contains("numeric-seperators"));

    let grid = dataset.get("grid").unwrap();
    assert_eq!(grid.level, BaselineLevel::High);
    let low = grid.low_date.unwrap();
    assert!(low.ranged);
    assert_eq!(low.year, 2020);

    let cq = dataset.get("container-queries").unwrap();
    assert_eq!(cq.support.len(), 4);
}

#[test]
fn test_missing_file_is_not_found() {
    let err = FeatureDataset::load(&fixture("does-not-exist.json")).unwrap_err();
    assert!(matches!(err, DataLoadError::NotFound { .. }));
    assert_eq!(err.error_code(), "DATA_LOAD_ERROR");
}

#[test]
fn test_malformed_entry_fails_the_load() {
    let err = FeatureDataset::load(&fixture("malformed.json")).unwrap_err();
    match err {
        DataLoadError::Malformed { feature, .. } => assert_eq!(feature, "at"),
        other => panic!("expected Malformed, got {other:?}"),
    }
}

#[test]
fn test_invalid_json_and_shapes() {
    assert!(matches!(
        FeatureDataset::from_json_str("{ not json").unwrap_err(),
        DataLoadError::Parse { .. }
    ));
    assert!(matches!(
        FeatureDataset::from_json_str("[1, 2]").unwrap_err(),
        DataLoadError::Malformed { .. }
    ));
    assert!(matches!(
        FeatureDataset::from_json_str(r#"{ "features": [] }"#).unwrap_err(),
        DataLoadError::Malformed { .. }
    ));
    assert!(matches!(
        FeatureDataset::from_json_str(r#"{ "at": { "baseline": "medium" } }"#).unwrap_err(),
        DataLoadError::Malformed { .. }
    ));
    assert!(matches!(
        FeatureDataset::from_json_str(r#"{ "at": { "baseline": "low", "baseline_low_date": "soon" } }"#)
            .unwrap_err(),
        DataLoadError::Malformed { .. }
    ));
}

#[test]
fn test_empty_dataset_is_valid() {
    let dataset = FeatureDataset::from_json_str("{}").unwrap();
    assert!(dataset.is_empty());
}
