//! Compliance policy, compliance target, and browser target types.
//!
//! These are the resolved inputs the detection engine consumes. Parsing is
//! strict: an unrecognized target is a `ConfigError`, never a silent default.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::collections::SmallVec3;
use crate::errors::ConfigError;

/// The compliance bar requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetSpec {
    /// Only widely available (`high`) features pass.
    Widely,
    /// Newly available (`low`) features pass too, unless strict.
    Newly,
    /// Features that reached Baseline in or before this calendar year pass.
    Year(u16),
}

impl TargetSpec {
    /// Parse a target from a raw config string.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        raw.parse()
    }
}

impl FromStr for TargetSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "widely" => return Ok(Self::Widely),
            "newly" => return Ok(Self::Newly),
            _ => {}
        }
        if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(year) = trimmed.parse::<u16>() {
                if year > 0 {
                    return Ok(Self::Year(year));
                }
            }
        }
        Err(ConfigError::InvalidValue {
            field: "policy.target".to_string(),
            message: format!(
                "expected \"widely\", \"newly\", or a calendar year, got \"{trimmed}\""
            ),
        })
    }
}

impl fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Widely => f.write_str("widely"),
            Self::Newly => f.write_str("newly"),
            Self::Year(y) => write!(f, "{y}"),
        }
    }
}

/// The resolved compliance policy for one run. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompliancePolicy {
    pub target: TargetSpec,
    /// When set, newly available (`low`) features never pass.
    pub strict: bool,
}

impl CompliancePolicy {
    pub fn new(target: TargetSpec, strict: bool) -> Self {
        Self { target, strict }
    }

    pub fn widely() -> Self {
        Self::new(TargetSpec::Widely, false)
    }

    pub fn newly() -> Self {
        Self::new(TargetSpec::Newly, false)
    }

    pub fn year(year: u16) -> Self {
        Self::new(TargetSpec::Year(year), false)
    }

    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }
}

impl Default for CompliancePolicy {
    fn default() -> Self {
        Self::widely()
    }
}

impl fmt::Display for CompliancePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.strict {
            write!(f, "{} (strict)", self.target)
        } else {
            write!(f, "{}", self.target)
        }
    }
}

/// A dotted browser version such as `15.4` or `120`.
///
/// Dataset values may carry a leading `≤` ("this version or earlier");
/// the bound is kept as the version itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BrowserVersion {
    parts: SmallVec3<u32>,
}

impl BrowserVersion {
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim().trim_start_matches('≤').trim();
        if trimmed.is_empty() {
            return None;
        }
        let mut parts = SmallVec3::new();
        for piece in trimmed.split('.') {
            parts.push(piece.parse::<u32>().ok()?);
        }
        Some(Self { parts })
    }

    fn part(&self, idx: usize) -> u32 {
        self.parts.get(idx).copied().unwrap_or(0)
    }
}

impl Ord for BrowserVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        for idx in 0..len {
            match self.part(idx).cmp(&other.part(idx)) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for BrowserVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for BrowserVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, part) in self.parts.iter().enumerate() {
            if idx > 0 {
                f.write_str(".")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

/// Browserslist-style aliases mapped to dataset browser keys.
const BROWSER_ALIASES: &[(&str, &str)] = &[
    ("and_chr", "chrome_android"),
    ("and_ff", "firefox_android"),
    ("ff", "firefox"),
    ("ios_saf", "safari_ios"),
    ("ios", "safari_ios"),
    ("chromeandroid", "chrome_android"),
    ("firefoxandroid", "firefox_android"),
    ("msedge", "edge"),
];

/// One browser the stylesheets must support, e.g. `safari >= 15.4`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BrowserTarget {
    /// Dataset browser key (`chrome`, `safari_ios`, ...).
    pub browser: String,
    pub version: BrowserVersion,
}

impl BrowserTarget {
    /// Parse `"<browser> [>=] <version>"`.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let invalid = |message: &str| ConfigError::InvalidValue {
            field: "style.browsers".to_string(),
            message: format!("{message}: \"{}\"", raw.trim()),
        };

        let mut tokens = raw.split_whitespace();
        let name = tokens.next().ok_or_else(|| invalid("empty browser target"))?;
        let mut version = tokens.next().ok_or_else(|| invalid("missing browser version"))?;
        if version == ">=" {
            version = tokens.next().ok_or_else(|| invalid("missing browser version"))?;
        }
        let version = version.trim_start_matches(">=");
        if tokens.next().is_some() {
            return Err(invalid("unexpected trailing tokens"));
        }

        let lowered = name.to_ascii_lowercase();
        let browser = BROWSER_ALIASES
            .iter()
            .find(|(alias, _)| *alias == lowered)
            .map_or(lowered.clone(), |(_, key)| (*key).to_string());
        let version = BrowserVersion::parse(version).ok_or_else(|| invalid("invalid version"))?;

        Ok(Self { browser, version })
    }

    /// Whether a feature first supported in `since` is usable on this target.
    pub fn is_supported_since(&self, since: &BrowserVersion) -> bool {
        since <= &self.version
    }
}

impl fmt::Display for BrowserTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.browser, self.version)
    }
}
