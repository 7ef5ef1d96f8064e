//! Stylesheet analyzer configuration.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::types::policy::BrowserTarget;

/// Configuration for the style usage analyzer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StyleConfig {
    /// Browser targets, e.g. `["chrome >= 100", "safari 15.4"]`.
    #[serde(default)]
    pub browsers: Vec<String>,
}

impl StyleConfig {
    /// Parse every configured browser target.
    pub fn browser_targets(&self) -> Result<Vec<BrowserTarget>, ConfigError> {
        self.browsers.iter().map(|b| BrowserTarget::parse(b)).collect()
    }
}
