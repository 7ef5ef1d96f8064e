//! Top-level configuration with 5-layer resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{DatasetConfig, PolicyConfig, ScanConfig, StyleConfig, TargetSetting};
use crate::constants::{PROJECT_CONFIG_FILE, USER_CONFIG_DIR};
use crate::errors::ConfigError;
use crate::types::policy::{BrowserTarget, CompliancePolicy};

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`BASELINE_*`)
/// 3. Project config (`baseline.toml` in project root)
/// 4. User config (`~/.baseline/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BaselineConfig {
    pub policy: PolicyConfig,
    pub scan: ScanConfig,
    pub style: StyleConfig,
    pub dataset: DatasetConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Explicit config file replacing the project `baseline.toml` lookup.
    pub config_path: Option<PathBuf>,
    pub target: Option<String>,
    pub strict: Option<bool>,
    pub dataset_path: Option<PathBuf>,
    pub browsers: Vec<String>,
}

impl BaselineConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        ::tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config, or the explicit --config file
        let explicit = cli_overrides.and_then(|cli| cli.config_path.clone());
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound {
                        path: path.display().to_string(),
                    });
                }
                Self::merge_toml_file(&mut config, &path)?;
            }
            None => {
                let project_config_path = root.join(PROJECT_CONFIG_FILE);
                if project_config_path.exists() {
                    Self::merge_toml_file(&mut config, &project_config_path)?;
                }
            }
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &BaselineConfig) -> Result<(), ConfigError> {
        config.policy.effective_target()?;
        config.style.browser_targets()?;
        if let Some(max_file_size) = config.scan.max_file_size {
            if max_file_size == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "scan.max_file_size".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        Ok(())
    }

    /// The resolved compliance policy.
    pub fn policy(&self) -> Result<CompliancePolicy, ConfigError> {
        self.policy.to_policy()
    }

    /// The resolved browser targets for the style analyzer.
    pub fn browser_targets(&self) -> Result<Vec<BrowserTarget>, ConfigError> {
        self.style.browser_targets()
    }

    /// Raw whitelist names; matching is case-insensitive downstream.
    pub fn whitelist_names(&self) -> &[String] {
        &self.policy.whitelist
    }

    /// Returns the user config path: `~/.baseline/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(USER_CONFIG_DIR).join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut BaselineConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: BaselineConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a value.
    fn merge(base: &mut BaselineConfig, other: &BaselineConfig) {
        // Policy
        if other.policy.target.is_some() {
            base.policy.target = other.policy.target.clone();
        }
        if other.policy.strict.is_some() {
            base.policy.strict = other.policy.strict;
        }
        if !other.policy.whitelist.is_empty() {
            base.policy.whitelist = other.policy.whitelist.clone();
        }

        // Scan
        if !other.scan.include.is_empty() {
            base.scan.include = other.scan.include.clone();
        }
        if !other.scan.exclude.is_empty() {
            base.scan.exclude = other.scan.exclude.clone();
        }
        if other.scan.max_file_size.is_some() {
            base.scan.max_file_size = other.scan.max_file_size;
        }

        // Style
        if !other.style.browsers.is_empty() {
            base.style.browsers = other.style.browsers.clone();
        }

        // Dataset
        if other.dataset.path.is_some() {
            base.dataset.path = other.dataset.path.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `BASELINE_TARGET`, `BASELINE_STRICT`, etc.
    fn apply_env_overrides(config: &mut BaselineConfig) {
        if let Ok(val) = std::env::var("BASELINE_TARGET") {
            config.policy.target = Some(TargetSetting::Name(val));
        }
        if let Ok(val) = std::env::var("BASELINE_STRICT") {
            if let Ok(v) = val.parse::<bool>() {
                config.policy.strict = Some(v);
            }
        }
        if let Ok(val) = std::env::var("BASELINE_WHITELIST") {
            config.policy.whitelist = split_list(&val);
        }
        if let Ok(val) = std::env::var("BASELINE_DATASET") {
            config.dataset.path = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("BASELINE_BROWSERS") {
            config.style.browsers = split_list(&val);
        }
        if let Ok(val) = std::env::var("BASELINE_MAX_FILE_SIZE") {
            if let Ok(v) = val.parse::<u64>() {
                config.scan.max_file_size = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut BaselineConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.target {
            config.policy.target = Some(TargetSetting::Name(v.clone()));
        }
        if let Some(v) = cli.strict {
            config.policy.strict = Some(v);
        }
        if let Some(ref v) = cli.dataset_path {
            config.dataset.path = Some(v.clone());
        }
        if !cli.browsers.is_empty() {
            config.style.browsers = cli.browsers.clone();
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
