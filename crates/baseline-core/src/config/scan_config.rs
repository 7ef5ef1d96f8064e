//! File selection configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_INCLUDE, DEFAULT_MAX_FILE_SIZE};

/// Configuration for which files get scanned.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScanConfig {
    /// Include globs. Default: every script and stylesheet extension.
    #[serde(default)]
    pub include: Vec<String>,
    /// Exclude globs applied after the includes.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Maximum file size in bytes. Default: 1MB.
    pub max_file_size: Option<u64>,
}

impl ScanConfig {
    /// Returns the effective include globs.
    pub fn effective_include(&self) -> Vec<String> {
        if self.include.is_empty() {
            DEFAULT_INCLUDE.iter().map(|s| (*s).to_string()).collect()
        } else {
            self.include.clone()
        }
    }

    /// Returns the effective max file size, defaulting to 1MB.
    pub fn effective_max_file_size(&self) -> u64 {
        self.max_file_size.unwrap_or(DEFAULT_MAX_FILE_SIZE)
    }
}
