//! Language detection from file extension.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Source languages the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceLanguage {
    /// Plain script grammar, JSX enabled.
    JavaScript,
    /// Type-annotated script grammar.
    TypeScript,
    /// TypeScript with JSX.
    Tsx,
    Css,
}

/// Which scanner a file is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Script,
    Style,
}

impl SourceLanguage {
    /// Detect language from a file extension string.
    pub fn from_extension(ext: Option<&str>) -> Option<SourceLanguage> {
        match ext?.to_ascii_lowercase().as_str() {
            "js" | "jsx" | "mjs" | "cjs" => Some(SourceLanguage::JavaScript),
            "ts" | "mts" | "cts" => Some(SourceLanguage::TypeScript),
            "tsx" => Some(SourceLanguage::Tsx),
            "css" => Some(SourceLanguage::Css),
            _ => None,
        }
    }

    /// Detect language from a path's extension.
    pub fn from_path(path: &Path) -> Option<SourceLanguage> {
        Self::from_extension(path.extension().and_then(|e| e.to_str()))
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            SourceLanguage::Css => SourceKind::Style,
            _ => SourceKind::Script,
        }
    }

    /// Returns the display name of the language.
    pub fn name(&self) -> &'static str {
        match self {
            SourceLanguage::JavaScript => "JavaScript",
            SourceLanguage::TypeScript => "TypeScript",
            SourceLanguage::Tsx => "TSX",
            SourceLanguage::Css => "CSS",
        }
    }

    /// Get the tree-sitter grammar for this language.
    pub fn ts_language(&self) -> tree_sitter::Language {
        match self {
            SourceLanguage::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            SourceLanguage::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            SourceLanguage::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            SourceLanguage::Css => tree_sitter_css::LANGUAGE.into(),
        }
    }
}

impl std::fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
