//! The run pipeline: partition, scan scripts, scan styles, merge.

pub mod pipeline;
pub mod summary;

pub use pipeline::CompliancePipeline;
pub use summary::RunSummary;
