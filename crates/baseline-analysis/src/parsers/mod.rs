//! Tree-sitter parser subsystem: grammar selection per file and syntax
//! error detection.

pub mod error_tolerant;
pub mod manager;

pub use manager::{ParsedSource, ParserManager};
