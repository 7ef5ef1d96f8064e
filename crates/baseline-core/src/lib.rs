//! baseline-core: shared foundation for the Baseline compliance checker.
//!
//! - Errors: one `thiserror` enum per subsystem, each with a stable error code
//! - Config: TOML-based, layered resolution into a `CompliancePolicy`
//! - Types: policy, compliance target, browser targets, collection aliases
//! - Tracing: `EnvFilter`-driven subscriber setup

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::BaselineConfig;
pub use errors::{ConfigError, DataLoadError, ParseError, PipelineError, PipelineResult};
pub use types::policy::{BrowserTarget, CompliancePolicy, TargetSpec};
