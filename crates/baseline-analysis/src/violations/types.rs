//! Violation record types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which scanner produced a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    Js,
    Css,
}

impl ViolationKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Js => "js",
            Self::Css => "css",
        }
    }
}

/// Syntactic role of the node that triggered a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextTag {
    FunctionCall,
    PropertyAccess,
    Import,
    Usage,
    /// Stylesheet construct reported by the style analyzer.
    Style,
}

impl ContextTag {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FunctionCall => "function_call",
            Self::PropertyAccess => "property_access",
            Self::Import => "import",
            Self::Usage => "usage",
            Self::Style => "style",
        }
    }
}

impl fmt::Display for ContextTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One non-compliant feature usage site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationRecord {
    pub file: String,
    /// 1-based source line.
    pub line: u32,
    /// 1-based source column.
    pub column: u32,
    /// Lowercase feature id.
    pub feature: String,
    pub kind: ViolationKind,
    pub context: ContextTag,
    /// Enclosing function for script violations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ViolationRecord {
    /// The `(file, line, feature)` identity used for deduplication.
    pub fn dedup_key(&self) -> (&str, u32, &str) {
        (&self.file, self.line, &self.feature)
    }
}

impl fmt::Display for ViolationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{} [{}] `{}` ({})",
            self.file,
            self.line,
            self.column,
            self.kind.name(),
            self.feature,
            self.context
        )?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}
