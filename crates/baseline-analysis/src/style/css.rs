//! tree-sitter-css usage analyzer.
//!
//! Reports properties, notable values, at-rules, media features,
//! pseudo-classes, pseudo-elements, and value functions. With browser targets
//! configured, only usages some target lacks support for are reported, and the
//! message names those targets.

use std::path::Path;
use std::sync::Arc;

use baseline_core::types::collections::FxHashSet;
use baseline_core::types::policy::BrowserTarget;
use tree_sitter::{Node, Parser};
use tracing::trace;

use super::analyzer::{StyleAnalyzer, StyleAnalyzerError, StyleUsage};
use super::catalog::{self, StyleConstruct};
use crate::dataset::FeatureDataset;
use crate::parsers::error_tolerant::summarize_errors;
use crate::scanner::language_detect::SourceLanguage;

/// A construct found in the tree, before its message is built.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FoundUsage {
    construct: StyleConstruct,
    name: String,
    feature_id: String,
    line: u32,
    column: u32,
}

pub struct CssUsageAnalyzer {
    targets: Vec<BrowserTarget>,
    dataset: Arc<FeatureDataset>,
    parser: Option<Parser>,
}

impl CssUsageAnalyzer {
    pub fn new(targets: Vec<BrowserTarget>, dataset: Arc<FeatureDataset>) -> Self {
        Self {
            targets,
            dataset,
            parser: None,
        }
    }

    pub fn targets(&self) -> &[BrowserTarget] {
        &self.targets
    }

    fn parser(&mut self) -> Result<&mut Parser, StyleAnalyzerError> {
        if self.parser.is_none() {
            let mut parser = Parser::new();
            parser
                .set_language(&SourceLanguage::Css.ts_language())
                .map_err(|e| StyleAnalyzerError::Grammar(e.to_string()))?;
            self.parser = Some(parser);
        }
        self.parser
            .as_mut()
            .ok_or_else(|| StyleAnalyzerError::Grammar("parser cache miss".to_string()))
    }

    /// Message for one usage under the configured targets.
    ///
    /// Returns `None` when every target browser supports the feature. With
    /// no targets configured every usage is described.
    pub fn describe(
        &self,
        construct: StyleConstruct,
        name: &str,
        feature_id: &str,
    ) -> Option<String> {
        let subject = format!("CSS {construct} `{name}`");
        if self.targets.is_empty() {
            return Some(format!("{subject} used"));
        }
        let Some(record) = self.dataset.get(feature_id) else {
            return Some(format!("{subject} has no support data for feature `{feature_id}`"));
        };
        let missing: Vec<String> = self
            .targets
            .iter()
            .filter(|target| match record.support.get(&target.browser) {
                Some(since) => !target.is_supported_since(since),
                None => true,
            })
            .map(ToString::to_string)
            .collect();
        if missing.is_empty() {
            return None;
        }
        Some(format!("{subject} is not supported by {}", missing.join(", ")))
    }
}

impl StyleAnalyzer for CssUsageAnalyzer {
    fn analyze(
        &mut self,
        path: &Path,
        source: &str,
        report: &mut dyn FnMut(StyleUsage),
    ) -> Result<(), StyleAnalyzerError> {
        let tree = self
            .parser()?
            .parse(source, None)
            .ok_or_else(|| StyleAnalyzerError::Other("parser returned no tree".to_string()))?;

        if let Some(errors) = summarize_errors(tree.root_node()) {
            return Err(StyleAnalyzerError::Syntax {
                line: errors.line,
                column: errors.column,
                error_count: errors.count,
            });
        }

        let mut walker = UsageWalker {
            source: source.as_bytes(),
            seen: FxHashSet::default(),
            found: Vec::new(),
        };
        walker.visit(tree.root_node());
        trace!(path = %path.display(), usages = walker.found.len(), "stylesheet analyzed");

        for usage in walker.found {
            let Some(message) = self.describe(usage.construct, &usage.name, &usage.feature_id)
            else {
                trace!(feature = %usage.feature_id, line = usage.line, "supported by all targets");
                continue;
            };
            report(StyleUsage {
                feature_id: usage.feature_id,
                line: usage.line,
                column: usage.column,
                message,
            });
        }
        Ok(())
    }
}

struct UsageWalker<'s> {
    source: &'s [u8],
    /// `(feature, line)` already reported.
    seen: FxHashSet<(String, u32)>,
    found: Vec<FoundUsage>,
}

impl<'s> UsageWalker<'s> {
    fn text(&self, node: Node<'_>) -> &'s str {
        node.utf8_text(self.source).unwrap_or("")
    }

    fn push(&mut self, construct: StyleConstruct, name: &str, feature_id: String, at: Node<'_>) {
        if name.is_empty() || feature_id.is_empty() {
            return;
        }
        let pos = at.start_position();
        let line = pos.row as u32 + 1;
        if !self.seen.insert((feature_id.clone(), line)) {
            return;
        }
        self.found.push(FoundUsage {
            construct,
            name: name.to_string(),
            feature_id,
            line,
            column: pos.column as u32 + 1,
        });
    }

    fn visit_children(&mut self, node: Node<'_>) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.visit(child);
        }
    }

    fn visit(&mut self, node: Node<'_>) {
        match node.kind() {
            "comment" | "string_value" => {}

            "declaration" => {
                if let Some(prop) = child_of_kind(node, "property_name") {
                    let property = self.text(prop);
                    if let Some(id) = catalog::property_feature(property) {
                        self.push(StyleConstruct::Property, property, id, prop);
                    }
                    let mut cursor = node.walk();
                    for value in node.named_children(&mut cursor) {
                        if value.kind() != "plain_value" {
                            continue;
                        }
                        let text = self.text(value);
                        if let Some(id) = catalog::value_feature(property, text) {
                            self.push(StyleConstruct::Value, text, id, value);
                        }
                    }
                }
                self.visit_children(node);
            }

            "call_expression" => {
                if let Some(function) = child_of_kind(node, "function_name") {
                    let name = self.text(function);
                    self.push(StyleConstruct::Function, name, catalog::function_feature(name), function);
                }
                self.visit_children(node);
            }

            "pseudo_class_selector" => {
                if let Some(name_node) = child_after(node, ":", "class_name") {
                    let name = self.text(name_node);
                    self.push(StyleConstruct::PseudoClass, name, catalog::named_feature(name), name_node);
                }
                self.visit_children(node);
            }

            "pseudo_element_selector" => {
                if let Some(name_node) = child_after(node, "::", "tag_name") {
                    let name = self.text(name_node);
                    self.push(StyleConstruct::PseudoElement, name, catalog::named_feature(name), name_node);
                }
                self.visit_children(node);
            }

            "feature_query" => {
                if let Some(feature) = child_of_kind(node, "feature_name") {
                    let name = self.text(feature);
                    self.push(StyleConstruct::MediaFeature, name, catalog::named_feature(name), feature);
                }
                self.visit_children(node);
            }

            "media_statement" => {
                self.push(StyleConstruct::AtRule, "@media", catalog::at_rule_feature("media"), node);
                self.visit_children(node);
            }

            "supports_statement" => {
                self.push(StyleConstruct::AtRule, "@supports", catalog::at_rule_feature("supports"), node);
                self.visit_children(node);
            }

            "keyframes_statement" => {
                let keyword = child_of_kind(node, "at_keyword")
                    .map_or("@keyframes", |k| self.text(k));
                self.push(StyleConstruct::AtRule, keyword, catalog::at_rule_feature(keyword), node);
                self.visit_children(node);
            }

            "at_rule" => {
                if let Some(keyword) = child_of_kind(node, "at_keyword") {
                    let name = self.text(keyword);
                    self.push(StyleConstruct::AtRule, name, catalog::at_rule_feature(name), keyword);
                }
                self.visit_children(node);
            }

            // Universally supported statements.
            "import_statement" | "charset_statement" | "namespace_statement" => {}

            _ => self.visit_children(node),
        }
    }
}

fn child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.named_children(&mut cursor).find(|c| c.kind() == kind);
    found
}

/// First `kind` child after the `token` child. Skips a leading selector
/// that may share the kind (`p::before` has two `tag_name` children).
fn child_after<'t>(node: Node<'t>, token: &str, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .skip_while(|c| c.kind() != token)
        .find(|c| c.kind() == kind);
    found
}
