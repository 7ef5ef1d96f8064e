//! BaselineErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this to expose a structured error code
/// string for CI logs and JSON output.
pub trait BaselineErrorCode {
    /// Returns the error code string (e.g., "CONFIG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn tagged(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const DATA_LOAD_ERROR: &str = "DATA_LOAD_ERROR";
pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const UNSUPPORTED_LANGUAGE: &str = "UNSUPPORTED_LANGUAGE";
pub const PROCESSING_ERROR: &str = "PROCESSING_ERROR";
pub const SCAN_ERROR: &str = "SCAN_ERROR";
pub const FILE_TOO_LARGE: &str = "FILE_TOO_LARGE";
