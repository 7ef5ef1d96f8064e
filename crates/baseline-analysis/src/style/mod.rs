//! Style Usage Scanner: runs each stylesheet through a pluggable usage
//! analyzer and converts its reports into `css` violations.

pub mod analyzer;
pub mod catalog;
pub mod css;
pub mod scanner;

pub use analyzer::{StyleAnalyzer, StyleAnalyzerError, StyleUsage};
pub use css::CssUsageAnalyzer;
pub use scanner::StyleScanner;
