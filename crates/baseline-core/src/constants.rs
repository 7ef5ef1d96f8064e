//! Shared constants for the Baseline compliance checker.

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Project config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "baseline.toml";

/// User config directory name under `$HOME`.
pub const USER_CONFIG_DIR: &str = ".baseline";

/// Default compliance target.
pub const DEFAULT_TARGET: &str = "widely";

/// Default path of the feature-status dataset, relative to the project root.
pub const DEFAULT_DATASET_PATH: &str = "web-features.json";

/// Maximum source file size in bytes (default: 1MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_048_576;

/// Environment variable holding the log filter.
pub const LOG_ENV_VAR: &str = "BASELINE_LOG";

/// Log filter used when `BASELINE_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "baseline_core=info,baseline_analysis=info,baseline_check=info";

/// Default include globs when the config names none.
pub const DEFAULT_INCLUDE: &[&str] = &[
    "**/*.js", "**/*.jsx", "**/*.mjs", "**/*.cjs", "**/*.ts", "**/*.tsx", "**/*.mts",
    "**/*.cts", "**/*.css",
];
