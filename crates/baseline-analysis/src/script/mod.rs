//! Script Usage Scanner: parse, walk with context, extract candidate
//! feature names, filter through the compliance gate, dedup.

pub mod candidates;
pub mod context;
pub mod scanner;

pub use candidates::{collect_candidates, Candidate};
pub use context::ScanContext;
pub use scanner::ScriptScanner;
