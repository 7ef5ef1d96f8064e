//! Feature-status record types.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use baseline_core::types::policy::BrowserVersion;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

/// Browser-compatibility classification of a web-platform feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselineLevel {
    /// Widely available.
    High,
    /// Newly available.
    Low,
    /// Not (yet) Baseline.
    None,
}

impl BaselineLevel {
    pub fn name(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Low => "low",
            Self::None => "none",
        }
    }
}

impl fmt::Display for BaselineLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<'de> Deserialize<'de> for BaselineLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LevelVisitor;

        impl<'de> Visitor<'de> for LevelVisitor {
            type Value = BaselineLevel;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("\"high\", \"low\", \"none\", false, or null")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                match v.to_ascii_lowercase().as_str() {
                    "high" => Ok(BaselineLevel::High),
                    "low" => Ok(BaselineLevel::Low),
                    "none" | "false" | "" => Ok(BaselineLevel::None),
                    other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
                }
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                if v {
                    Err(E::invalid_value(de::Unexpected::Bool(v), &self))
                } else {
                    Ok(BaselineLevel::None)
                }
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(BaselineLevel::None)
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(BaselineLevel::None)
            }
        }

        deserializer.deserialize_any(LevelVisitor)
    }
}

/// A Baseline transition date. `ranged` marks `≤YYYY-MM-DD` values
/// ("on or before").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BaselineDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub ranged: bool,
}

impl FromStr for BaselineDate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (ranged, body) = match trimmed.strip_prefix('≤') {
            Some(rest) => (true, rest.trim()),
            None => (false, trimmed),
        };

        let mut parts = body.split('-');
        let year = parts
            .next()
            .filter(|y| y.len() == 4)
            .and_then(|y| y.parse::<u16>().ok())
            .ok_or_else(|| format!("invalid year in date \"{trimmed}\""))?;
        let month = match parts.next() {
            Some(m) => m
                .parse::<u8>()
                .ok()
                .filter(|m| (1..=12).contains(m))
                .ok_or_else(|| format!("invalid month in date \"{trimmed}\""))?,
            None => 1,
        };
        let day = match parts.next() {
            Some(d) => d
                .parse::<u8>()
                .ok()
                .filter(|d| (1..=31).contains(d))
                .ok_or_else(|| format!("invalid day in date \"{trimmed}\""))?,
            None => 1,
        };
        if parts.next().is_some() {
            return Err(format!("trailing components in date \"{trimmed}\""));
        }

        Ok(Self { year, month, day, ranged })
    }
}

impl<'de> Deserialize<'de> for BaselineDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

impl fmt::Display for BaselineDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ranged {
            f.write_str("≤")?;
        }
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Compliance-relevant status of one feature. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureStatusRecord {
    pub level: BaselineLevel,
    pub low_date: Option<BaselineDate>,
    pub high_date: Option<BaselineDate>,
    /// Dataset browser key → first supporting version.
    pub support: BTreeMap<String, BrowserVersion>,
}

impl FeatureStatusRecord {
    pub fn new(level: BaselineLevel) -> Self {
        Self {
            level,
            low_date: None,
            high_date: None,
            support: BTreeMap::new(),
        }
    }

    pub fn with_low_date(mut self, date: &str) -> Self {
        self.low_date = date.parse().ok();
        self
    }

    pub fn with_high_date(mut self, date: &str) -> Self {
        self.high_date = date.parse().ok();
        self
    }

    pub fn with_support(mut self, browser: &str, version: &str) -> Self {
        if let Some(v) = BrowserVersion::parse(version) {
            self.support.insert(browser.to_string(), v);
        }
        self
    }

    /// Year the feature became Baseline: the low date when known, else the
    /// high date.
    pub fn comparison_year(&self) -> Option<u16> {
        self.low_date.or(self.high_date).map(|d| d.year)
    }
}
