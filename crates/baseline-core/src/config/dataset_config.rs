//! Feature dataset location.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_DATASET_PATH;

/// Where the feature-status dataset is read from.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DatasetConfig {
    /// Dataset path; relative paths resolve against the project root.
    pub path: Option<PathBuf>,
}

impl DatasetConfig {
    pub fn effective_path(&self, root: &Path) -> PathBuf {
        let path = self
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_PATH));
        if path.is_absolute() {
            path
        } else {
            root.join(path)
        }
    }
}
