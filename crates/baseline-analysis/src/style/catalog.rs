//! Stylesheet construct → feature id mapping.
//!
//! Most constructs map to a feature id equal to their own name; the tables
//! hold the exceptions.

use std::fmt;

/// The kind of stylesheet construct a usage came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleConstruct {
    Property,
    Value,
    AtRule,
    MediaFeature,
    PseudoClass,
    PseudoElement,
    Function,
}

impl StyleConstruct {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Property => "property",
            Self::Value => "value",
            Self::AtRule => "at-rule",
            Self::MediaFeature => "media feature",
            Self::PseudoClass => "pseudo-class",
            Self::PseudoElement => "pseudo-element",
            Self::Function => "function",
        }
    }
}

impl fmt::Display for StyleConstruct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const AT_RULE_FEATURES: &[(&str, &str)] = &[
    ("container", "container-queries"),
    ("layer", "cascade-layers"),
    ("property", "registered-custom-properties"),
    ("keyframes", "animations-css"),
    ("media", "media-queries"),
    ("font-feature-values", "font-feature-values"),
    ("view-transition", "cross-document-view-transitions"),
];

const FUNCTION_FEATURES: &[(&str, &str)] = &[
    ("clamp", "min-max-clamp"),
    ("min", "min-max-clamp"),
    ("max", "min-max-clamp"),
    ("oklch", "oklab"),
    ("oklab", "oklab"),
    ("lab", "lab"),
    ("lch", "lab"),
    ("color-mix", "color-mix"),
    ("light-dark", "light-dark"),
];

/// `(property, value)` pairs whose value is its own feature.
const VALUE_FEATURES: &[(&str, &str, &str)] = &[
    ("display", "grid", "grid"),
    ("display", "inline-grid", "grid"),
    ("display", "flex", "flexbox"),
    ("display", "inline-flex", "flexbox"),
    ("display", "contents", "display-contents"),
    ("display", "flow-root", "flow-root"),
    ("position", "sticky", "sticky-positioning"),
    ("grid-template-columns", "subgrid", "subgrid"),
    ("grid-template-rows", "subgrid", "subgrid"),
];

/// Strip a vendor prefix (`-webkit-`, `-moz-`, ...). Custom properties
/// (`--x`) are left untouched.
pub fn strip_vendor_prefix(name: &str) -> &str {
    if name.starts_with("--") {
        return name;
    }
    match name.strip_prefix('-') {
        Some(rest) => match rest.find('-') {
            Some(idx) if idx > 0 => &rest[idx + 1..],
            _ => name,
        },
        None => name,
    }
}

fn lookup(table: &[(&str, &str)], name: &str) -> String {
    table
        .iter()
        .find(|(key, _)| *key == name)
        .map_or_else(|| name.to_string(), |(_, id)| (*id).to_string())
}

/// Feature id for a declared property, or `None` for custom properties.
pub fn property_feature(property: &str) -> Option<String> {
    if property.starts_with("--") {
        return None;
    }
    Some(strip_vendor_prefix(&property.to_ascii_lowercase()).to_string())
}

/// Feature id for a notable `property: value` pair.
pub fn value_feature(property: &str, value: &str) -> Option<String> {
    let property = property.to_ascii_lowercase();
    let property = strip_vendor_prefix(&property);
    let value = value.to_ascii_lowercase();
    let value = strip_vendor_prefix(&value);
    VALUE_FEATURES
        .iter()
        .find(|(p, v, _)| *p == property && *v == value)
        .map(|(_, _, id)| (*id).to_string())
}

/// Feature id for an at-rule keyword, with or without the leading `@`.
pub fn at_rule_feature(keyword: &str) -> String {
    let name = keyword.trim_start_matches('@').to_ascii_lowercase();
    lookup(AT_RULE_FEATURES, strip_vendor_prefix(&name))
}

/// Feature id for a value function such as `clamp()`.
pub fn function_feature(function: &str) -> String {
    let name = function.to_ascii_lowercase();
    lookup(FUNCTION_FEATURES, strip_vendor_prefix(&name))
}

/// Feature id for a pseudo-class, pseudo-element, or media feature name.
pub fn named_feature(name: &str) -> String {
    let name = name.to_ascii_lowercase();
    strip_vendor_prefix(&name).to_string()
}
