//! Compliance policy configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_TARGET;
use crate::errors::ConfigError;
use crate::types::policy::{CompliancePolicy, TargetSpec};

/// `policy.target` as written in TOML: `"widely"`, `"newly"`, `"2021"` or `2021`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetSetting {
    Year(i64),
    Name(String),
}

impl TargetSetting {
    pub fn resolve(&self) -> Result<TargetSpec, ConfigError> {
        match self {
            Self::Year(y) => TargetSpec::parse(&y.to_string()),
            Self::Name(name) => TargetSpec::parse(name),
        }
    }
}

/// Configuration for the compliance policy.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PolicyConfig {
    /// Compliance target. Default: "widely".
    pub target: Option<TargetSetting>,
    /// Treat newly available features as failing. Default: false.
    pub strict: Option<bool>,
    /// Identifiers never reported, matched case-insensitively.
    #[serde(default)]
    pub whitelist: Vec<String>,
}

impl PolicyConfig {
    /// Returns the effective compliance target, defaulting to "widely".
    pub fn effective_target(&self) -> Result<TargetSpec, ConfigError> {
        match &self.target {
            Some(target) => target.resolve(),
            None => TargetSpec::parse(DEFAULT_TARGET),
        }
    }

    /// Returns the effective strict flag, defaulting to false.
    pub fn effective_strict(&self) -> bool {
        self.strict.unwrap_or(false)
    }

    /// Build the resolved policy.
    pub fn to_policy(&self) -> Result<CompliancePolicy, ConfigError> {
        Ok(CompliancePolicy::new(
            self.effective_target()?,
            self.effective_strict(),
        ))
    }
}
