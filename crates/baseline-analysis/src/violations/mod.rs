//! Violation records and run-wide deduplication.

pub mod dedup;
pub mod types;

pub use dedup::ViolationSet;
pub use types::{ContextTag, ViolationKind, ViolationRecord};
