//! Candidate extraction: one recursive walk over a script syntax tree.
//!
//! Candidates are emitted in visit order. A call is emitted before its
//! callee is visited, so `function_call` wins over `property_access` and
//! `usage` when the same name lands on the same line.

use tree_sitter::Node;

use super::context::{ScanContext, ANONYMOUS_FUNCTION};
use crate::violations::ContextTag;

/// A name that may denote a platform feature, before the compliance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'s> {
    pub name: &'s str,
    /// 1-based.
    pub line: u32,
    /// 1-based.
    pub column: u32,
    pub tag: ContextTag,
    pub function_scope: Option<&'s str>,
}

const FUNCTION_KINDS: &[&str] = &[
    "function_declaration",
    "function_expression",
    "function",
    "generator_function_declaration",
    "generator_function",
    "arrow_function",
    "method_definition",
];

/// Type-level subtrees carry no runtime feature usage.
const TYPE_KINDS: &[&str] = &[
    "type_annotation",
    "type_arguments",
    "type_parameters",
    "type_alias_declaration",
    "interface_declaration",
    "implements_clause",
    "type_predicate_annotation",
    "asserts_annotation",
];

const JSX_ELEMENT_KINDS: &[&str] = &[
    "jsx_opening_element",
    "jsx_closing_element",
    "jsx_self_closing_element",
];

/// Walk `root` and return every candidate in visit order.
pub fn collect_candidates<'s>(root: Node<'s>, source: &'s str) -> Vec<Candidate<'s>> {
    let mut walker = CandidateWalker {
        source: source.as_bytes(),
        out: Vec::new(),
    };
    walker.visit(root, ScanContext::root());
    walker.out
}

struct CandidateWalker<'s> {
    source: &'s [u8],
    out: Vec<Candidate<'s>>,
}

impl<'s> CandidateWalker<'s> {
    fn text(&self, node: Node<'s>) -> &'s str {
        node.utf8_text(self.source).unwrap_or("")
    }

    fn emit(&mut self, name: &'s str, at: Node<'s>, tag: ContextTag, ctx: ScanContext<'s>) {
        if name.is_empty() {
            return;
        }
        let pos = at.start_position();
        self.out.push(Candidate {
            name,
            line: pos.row as u32 + 1,
            column: pos.column as u32 + 1,
            tag,
            function_scope: ctx.function_name,
        });
    }

    fn visit_children(&mut self, node: Node<'s>, ctx: ScanContext<'s>) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.visit(child, ctx);
        }
    }

    /// Visit every named child, routing the child in field `field` to
    /// `field_ctx` and the rest to `rest_ctx`.
    fn visit_split(
        &mut self,
        node: Node<'s>,
        field: &str,
        field_ctx: ScanContext<'s>,
        rest_ctx: ScanContext<'s>,
    ) {
        let target = node.child_by_field_name(field).map(|n| n.id());
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if Some(child.id()) == target {
                self.visit(child, field_ctx);
            } else {
                self.visit(child, rest_ctx);
            }
        }
    }

    fn visit(&mut self, node: Node<'s>, ctx: ScanContext<'s>) {
        let kind = node.kind();
        if FUNCTION_KINDS.contains(&kind) {
            return self.visit_function(node, ctx);
        }
        if TYPE_KINDS.contains(&kind) {
            return;
        }
        if JSX_ELEMENT_KINDS.contains(&kind) {
            return self.visit_jsx_element(node, ctx);
        }

        match kind {
            "comment" | "string" | "regex" | "number" | "property_identifier" => {}

            "identifier" | "shorthand_property_identifier" => {
                if !ctx.is_binding_position() {
                    self.emit(self.text(node), node, ContextTag::Usage, ctx);
                }
            }

            "import_statement" => self.visit_import(node, ctx),

            "export_statement" => {
                // Re-exports (`export { x } from "m"`) name another module's
                // bindings; nothing is read locally.
                if node.child_by_field_name("source").is_none() {
                    self.visit_children(node, ctx);
                }
            }

            "await_expression" => {
                self.emit("await", node, ContextTag::Usage, ctx);
                self.visit_children(node, ctx.read());
            }

            "yield_expression" => {
                self.emit("yield", node, ContextTag::Usage, ctx);
                self.visit_children(node, ctx.read());
            }

            "call_expression" => {
                if let Some(callee) = node.child_by_field_name("function") {
                    self.emit_call(callee, ctx);
                }
                self.visit_children(node, ctx.read());
            }

            "new_expression" => {
                if let Some(constructor) = node.child_by_field_name("constructor") {
                    self.emit_call(constructor, ctx);
                }
                self.visit_children(node, ctx.read());
            }

            "member_expression" => {
                let property = node.child_by_field_name("property");
                if let Some(prop) = property {
                    // Assigning `obj.at = ...` writes the property, it does
                    // not use it.
                    if is_member_name(prop) && !ctx.in_assignment_lhs {
                        self.emit(self.text(prop), prop, ContextTag::PropertyAccess, ctx);
                    }
                }
                if let Some(object) = node.child_by_field_name("object") {
                    self.visit(object, ctx.read());
                }
            }

            "subscript_expression" => self.visit_children(node, ctx.read()),

            "variable_declarator" => {
                self.visit_split(node, "name", ctx.declaration(), ctx.read());
            }

            "assignment_expression" | "augmented_assignment_expression" => {
                self.visit_split(node, "left", ctx.assignment(), ctx.read());
            }

            // Default values inside binding patterns are evaluated reads.
            "assignment_pattern" | "object_assignment_pattern" => {
                self.visit_split(node, "left", ctx, ctx.read());
            }

            "required_parameter" | "optional_parameter" => {
                self.visit_split(node, "pattern", ctx.declaration(), ctx.read());
            }

            "formal_parameters" => self.visit_children(node, ctx.declaration()),

            "computed_property_name" => self.visit_children(node, ctx.read()),

            "catch_clause" => {
                self.visit_split(node, "parameter", ctx.declaration(), ctx.read());
            }

            "for_in_statement" => {
                let left_ctx = if node.child_by_field_name("kind").is_some() {
                    ctx.declaration()
                } else {
                    ctx.assignment()
                };
                self.visit_split(node, "left", left_ctx, ctx.read());
            }

            "class_declaration" | "class" | "abstract_class_declaration" => {
                self.visit_split(node, "name", ctx.declaration(), ctx.read());
            }

            "enum_declaration" | "internal_module" | "module" => {
                self.visit_split(node, "name", ctx.declaration(), ctx.read());
            }

            "labeled_statement" | "break_statement" | "continue_statement" => {
                self.visit_split(node, "label", ctx.declaration(), ctx);
            }

            _ => self.visit_children(node, ctx),
        }
    }

    /// Emit the `function_call` candidate for a callee or constructor.
    fn emit_call(&mut self, callee: Node<'s>, ctx: ScanContext<'s>) {
        match callee.kind() {
            "identifier" => self.emit(self.text(callee), callee, ContextTag::FunctionCall, ctx),
            "member_expression" => {
                if let Some(prop) = callee.child_by_field_name("property") {
                    if is_member_name(prop) {
                        self.emit(self.text(prop), prop, ContextTag::FunctionCall, ctx);
                    }
                }
            }
            // Dynamic `import("./m.js")`.
            "import" => self.emit("import", callee, ContextTag::FunctionCall, ctx),
            _ => {}
        }
    }

    fn visit_import(&mut self, node: Node<'s>, ctx: ScanContext<'s>) {
        self.emit("import", node, ContextTag::Import, ctx);

        // Local names bound by `{ a, b as c }` are reported as import
        // candidates; default and namespace bindings are not.
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if current.kind() == "import_specifier" {
                let bound = current
                    .child_by_field_name("alias")
                    .or_else(|| current.child_by_field_name("name"));
                if let Some(bound) = bound {
                    self.emit(self.text(bound), bound, ContextTag::Import, ctx);
                }
                continue;
            }
            let mut cursor = current.walk();
            let children: Vec<_> = current.named_children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
    }

    fn visit_function(&mut self, node: Node<'s>, ctx: ScanContext<'s>) {
        let name = self.function_name(node);
        let inner = ctx.entering_function(name);
        let name_node = node.child_by_field_name("name").map(|n| n.id());
        let params = node
            .child_by_field_name("parameters")
            .or_else(|| node.child_by_field_name("parameter"))
            .map(|n| n.id());

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if Some(child.id()) == name_node {
                continue;
            }
            if Some(child.id()) == params {
                self.visit(child, inner.declaration());
            } else {
                self.visit(child, inner);
            }
        }
    }

    /// Declared name, else the name of the binding the function is
    /// assigned to, else `<anonymous>`.
    fn function_name(&self, node: Node<'s>) -> &'s str {
        if let Some(name) = node.child_by_field_name("name") {
            return self.text(name);
        }
        let Some(parent) = node.parent() else {
            return ANONYMOUS_FUNCTION;
        };
        let binding = match parent.kind() {
            "variable_declarator" => parent.child_by_field_name("name"),
            "assignment_expression" => parent.child_by_field_name("left").map(|left| {
                left.child_by_field_name("property").unwrap_or(left)
            }),
            "pair" => parent.child_by_field_name("key"),
            _ => None,
        };
        match binding {
            Some(b) if matches!(b.kind(), "identifier" | "property_identifier") => self.text(b),
            _ => ANONYMOUS_FUNCTION,
        }
    }

    /// Tag names in JSX are component references, not feature usage.
    fn visit_jsx_element(&mut self, node: Node<'s>, ctx: ScanContext<'s>) {
        let name = node.child_by_field_name("name").map(|n| n.id());
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if Some(child.id()) != name {
                self.visit(child, ctx);
            }
        }
    }
}

fn is_member_name(node: Node<'_>) -> bool {
    matches!(
        node.kind(),
        "property_identifier" | "private_property_identifier"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::language_detect::SourceLanguage;

    fn candidates(source: &str, language: SourceLanguage) -> Vec<(String, u32, ContextTag)> {
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&language.ts_language()).unwrap();
        let tree = parser.parse(source, None).unwrap();
        collect_candidates(tree.root_node(), source)
            .into_iter()
            .map(|c| (c.name.to_string(), c.line, c.tag))
            .collect()
    }

    fn js(source: &str) -> Vec<(String, u32, ContextTag)> {
        candidates(source, SourceLanguage::JavaScript)
    }

    fn names(found: &[(String, u32, ContextTag)]) -> Vec<&str> {
        found.iter().map(|(n, _, _)| n.as_str()).collect()
    }

    #[test]
    fn method_call_emits_call_before_property_access() {
        let found = js("array.at(-1);");
        assert_eq!(found[0], ("at".to_string(), 1, ContextTag::FunctionCall));
        assert!(found.contains(&("at".to_string(), 1, ContextTag::PropertyAccess)));
        assert!(found.contains(&("array".to_string(), 1, ContextTag::Usage)));
    }

    #[test]
    fn binding_targets_are_exempt() {
        let found = js("const at = 5;\nobj.at = 5;\nlet { flat, b = flat } = o;");
        let names = names(&found);
        assert!(!names.contains(&"at"));
        assert!(names.contains(&"obj"));
        assert!(names.contains(&"o"));
        // default value reads the earlier binding
        assert_eq!(names.iter().filter(|n| **n == "flat").count(), 1);
    }

    #[test]
    fn member_object_of_assignment_target_is_read() {
        let found = js("navigator.clipboard = x;");
        let names = names(&found);
        assert!(names.contains(&"navigator"));
        assert!(!names.contains(&"clipboard"));
    }

    #[test]
    fn import_statement_and_specifiers() {
        let found = js("import def, { a, b as c } from 'm';");
        assert_eq!(found[0], ("import".to_string(), 1, ContextTag::Import));
        let names = names(&found);
        assert!(names.contains(&"a"));
        assert!(names.contains(&"c"));
        assert!(!names.contains(&"b"));
        assert!(!names.contains(&"def"));
    }

    #[test]
    fn await_and_yield_are_usage() {
        let found = js("async function f() { await g(); }\nfunction* h() { yield 1; }");
        assert!(found.contains(&("await".to_string(), 1, ContextTag::Usage)));
        assert!(found.contains(&("yield".to_string(), 2, ContextTag::Usage)));
        assert!(!names(&found).contains(&"f"));
    }

    #[test]
    fn function_scope_follows_nesting() {
        let source = "const outer = () => {\n  function inner() { a.at(0); }\n  b.at(1);\n};";
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&SourceLanguage::JavaScript.ts_language())
            .unwrap();
        let tree = parser.parse(source, None).unwrap();
        let found = collect_candidates(tree.root_node(), source);
        let at_calls: Vec<_> = found
            .iter()
            .filter(|c| c.name == "at" && c.tag == ContextTag::FunctionCall)
            .map(|c| (c.line, c.function_scope))
            .collect();
        assert_eq!(at_calls, vec![(2, Some("inner")), (3, Some("outer"))]);
    }

    #[test]
    fn typescript_types_are_skipped() {
        let found = candidates(
            "function f(x: Array<number> = []): number { return x.length; }",
            SourceLanguage::TypeScript,
        );
        let names = names(&found);
        assert!(names.contains(&"length"));
        assert!(!names.contains(&"Array"));
        // parameter binding is exempt, the read in the body is not
        assert_eq!(names.iter().filter(|n| **n == "x").count(), 1);
    }

    #[test]
    fn jsx_tag_names_are_skipped() {
        let found = candidates("const el = <Widget size={data.at(0)} />;", SourceLanguage::Tsx);
        let names = names(&found);
        assert!(!names.contains(&"Widget"));
        assert!(names.contains(&"at"));
    }

    #[test]
    fn new_and_dynamic_import_are_calls() {
        let found = js("new URLPattern(p);\nimport('./m.js');");
        assert!(found.contains(&("URLPattern".to_string(), 1, ContextTag::FunctionCall)));
        assert!(found.contains(&("import".to_string(), 2, ContextTag::FunctionCall)));
    }

    #[test]
    fn namespace_names_are_declarations() {
        let found = candidates("namespace at { export const x = 1; }", SourceLanguage::TypeScript);
        assert!(!names(&found).contains(&"at"));
    }
}
