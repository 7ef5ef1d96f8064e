//! ParserManager: one tree-sitter parser per grammar, created on first use.

use std::path::Path;
use std::time::Instant;

use baseline_core::errors::ParseError;
use baseline_core::types::collections::FxHashMap;
use tree_sitter::{Parser, Tree};
use tracing::debug;

use super::error_tolerant::summarize_errors;
use crate::scanner::language_detect::SourceLanguage;

/// A successfully parsed, error-free source file.
#[derive(Debug)]
pub struct ParsedSource {
    pub language: SourceLanguage,
    pub tree: Tree,
    pub parse_time_us: u64,
}

/// Owns the tree-sitter parsers for one scanner. Not shared across threads.
#[derive(Default)]
pub struct ParserManager {
    parsers: FxHashMap<SourceLanguage, Parser>,
}

impl ParserManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick the grammar for a script path: plain script (with JSX) or
    /// type-annotated script.
    pub fn script_language_for(path: &Path) -> Result<SourceLanguage, ParseError> {
        match SourceLanguage::from_path(path) {
            Some(lang) if lang != SourceLanguage::Css => Ok(lang),
            _ => Err(ParseError::UnsupportedLanguage {
                extension: path
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("")
                    .to_string(),
            }),
        }
    }

    /// Parse `source` with `language`. Trees containing ERROR or MISSING
    /// nodes are rejected as `ParseError::Syntax`.
    pub fn parse(
        &mut self,
        source: &str,
        path: &Path,
        language: SourceLanguage,
    ) -> Result<ParsedSource, ParseError> {
        let start = Instant::now();
        let parser = self.parser_for(language)?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ParseError::TreeSitterError {
                path: path.to_path_buf(),
                message: "parser returned no tree".to_string(),
            })?;

        if let Some(errors) = summarize_errors(tree.root_node()) {
            return Err(ParseError::Syntax {
                path: path.to_path_buf(),
                line: errors.line,
                column: errors.column,
                error_count: errors.count,
            });
        }

        let parse_time_us = start.elapsed().as_micros() as u64;
        debug!(path = %path.display(), %language, parse_time_us, "parsed");
        Ok(ParsedSource {
            language,
            tree,
            parse_time_us,
        })
    }

    fn parser_for(&mut self, language: SourceLanguage) -> Result<&mut Parser, ParseError> {
        if !self.parsers.contains_key(&language) {
            let mut parser = Parser::new();
            parser
                .set_language(&language.ts_language())
                .map_err(|e| ParseError::GrammarUnavailable {
                    language: language.name().to_string(),
                    message: e.to_string(),
                })?;
            self.parsers.insert(language, parser);
        }
        self.parsers
            .get_mut(&language)
            .ok_or_else(|| ParseError::GrammarUnavailable {
                language: language.name().to_string(),
                message: "parser cache miss".to_string(),
            })
    }
}
