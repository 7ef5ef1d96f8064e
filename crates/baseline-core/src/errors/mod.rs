//! Error handling for the Baseline checker.
//! One error enum per subsystem, `thiserror` only.
//!
//! `ConfigError` and `DataLoadError` are fatal and abort a run before any
//! list is produced. `ParseError`, `ProcessingError` and `ScanError` are
//! absorbed at file granularity and surface only in `PipelineResult::errors`.

pub mod config_error;
pub mod data_load_error;
pub mod error_code;
pub mod parse_error;
pub mod pipeline_error;
pub mod processing_error;
pub mod scan_error;

pub use config_error::ConfigError;
pub use data_load_error::DataLoadError;
pub use error_code::BaselineErrorCode;
pub use parse_error::ParseError;
pub use pipeline_error::{PipelineError, PipelineResult};
pub use processing_error::ProcessingError;
pub use scan_error::ScanError;
