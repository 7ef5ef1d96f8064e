//! JSON loader for the feature-status dataset.
//!
//! Two shapes are accepted:
//! - flat: `{ "<id>": { "baseline": "low", "baseline_low_date": "2021-09-01" } }`
//! - web-features: `{ "features": { "<id>": { "status": { ... } } } }`
//!
//! camelCase keys (`baselineLevel`, `baselineLowDate`, `baselineHighDate`)
//! are accepted as aliases. Any malformed entry fails the whole load.

use std::collections::BTreeMap;
use std::path::Path;

use baseline_core::errors::DataLoadError;
use baseline_core::types::collections::FxHashMap;
use baseline_core::types::policy::BrowserVersion;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::types::{BaselineDate, BaselineLevel, FeatureStatusRecord};

/// Redirect stubs in web-features carry no status of their own.
const REDIRECT_KINDS: &[&str] = &["moved", "split"];

#[derive(Debug, Deserialize)]
struct RawStatus {
    #[serde(alias = "baselineLevel", alias = "baseline_level")]
    baseline: BaselineLevel,
    #[serde(default, alias = "baselineLowDate")]
    baseline_low_date: Option<BaselineDate>,
    #[serde(default, alias = "baselineHighDate")]
    baseline_high_date: Option<BaselineDate>,
    #[serde(default)]
    support: BTreeMap<String, String>,
}

impl RawStatus {
    fn into_record(self, feature: &str) -> FeatureStatusRecord {
        let mut support = BTreeMap::new();
        for (browser, version) in self.support {
            match BrowserVersion::parse(&version) {
                Some(v) => {
                    support.insert(browser.to_ascii_lowercase(), v);
                }
                None => {
                    debug!(feature, browser, version, "skipping unparseable support version");
                }
            }
        }
        FeatureStatusRecord {
            level: self.baseline,
            low_date: self.baseline_low_date,
            high_date: self.baseline_high_date,
            support,
        }
    }
}

/// Read-only mapping from lowercase feature id to its status record.
#[derive(Debug, Clone, Default)]
pub struct FeatureDataset {
    records: FxHashMap<String, FeatureStatusRecord>,
}

impl FeatureDataset {
    /// Load a dataset file. Missing or malformed files are fatal.
    pub fn load(path: &Path) -> Result<Self, DataLoadError> {
        if !path.exists() {
            return Err(DataLoadError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|source| DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value =
            serde_json::from_str(&content).map_err(|e| DataLoadError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        let dataset = Self::from_value(value)?;
        info!(path = %path.display(), features = dataset.len(), "feature dataset loaded");
        Ok(dataset)
    }

    /// Parse a dataset from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, DataLoadError> {
        let value: Value = serde_json::from_str(json).map_err(|e| DataLoadError::Parse {
            path: "<string>".into(),
            message: e.to_string(),
        })?;
        Self::from_value(value)
    }

    /// Build a dataset from already-parsed JSON.
    pub fn from_value(value: Value) -> Result<Self, DataLoadError> {
        let Value::Object(mut top) = value else {
            return Err(DataLoadError::Malformed {
                feature: "<root>".to_string(),
                message: "dataset must be a JSON object".to_string(),
            });
        };

        let entries: Map<String, Value> = match top.remove("features") {
            Some(Value::Object(features)) => features,
            Some(_) => {
                return Err(DataLoadError::Malformed {
                    feature: "features".to_string(),
                    message: "`features` must be an object".to_string(),
                });
            }
            None => top,
        };

        let mut records = FxHashMap::default();
        for (id, entry) in entries {
            if let Some(record) = Self::parse_entry(&id, entry)? {
                records.insert(id.to_lowercase(), record);
            }
        }
        Ok(Self { records })
    }

    fn parse_entry(id: &str, entry: Value) -> Result<Option<FeatureStatusRecord>, DataLoadError> {
        let Value::Object(mut obj) = entry else {
            return Err(DataLoadError::Malformed {
                feature: id.to_string(),
                message: "entry must be an object".to_string(),
            });
        };

        if let Some(kind) = obj.get("kind").and_then(Value::as_str) {
            if REDIRECT_KINDS.contains(&kind) {
                debug!(feature = id, kind, "skipping redirect entry");
                return Ok(None);
            }
        }

        let status = match obj.remove("status") {
            Some(status) => status,
            None => Value::Object(obj),
        };
        let raw: RawStatus =
            serde_json::from_value(status).map_err(|e| DataLoadError::Malformed {
                feature: id.to_string(),
                message: e.to_string(),
            })?;
        Ok(Some(raw.into_record(id)))
    }

    /// Build a dataset directly from records (tests, embedders).
    pub fn from_records<I, K>(records: I) -> Self
    where
        I: IntoIterator<Item = (K, FeatureStatusRecord)>,
        K: AsRef<str>,
    {
        Self {
            records: records
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_lowercase(), v))
                .collect(),
        }
    }

    /// Case-insensitive lookup.
    pub fn get(&self, feature_id: &str) -> Option<&FeatureStatusRecord> {
        match self.records.get(feature_id) {
            Some(record) => Some(record),
            None => self.records.get(&feature_id.to_lowercase()),
        }
    }

    pub fn contains(&self, feature_id: &str) -> bool {
        self.get(feature_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
