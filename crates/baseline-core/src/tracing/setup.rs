//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::{DEFAULT_LOG_FILTER, LOG_ENV_VAR};

static INIT: Once = Once::new();

/// Initialize the tracing/logging system with the default filter.
///
/// Reads `BASELINE_LOG` for per-crate log levels.
/// Format: `BASELINE_LOG=baseline_analysis=debug,baseline_core=warn`
pub fn init_tracing() {
    init_tracing_with_default(DEFAULT_LOG_FILTER);
}

/// Initialize tracing, falling back to `default_filter` when `BASELINE_LOG`
/// is not set or does not parse. Logs go to stderr so stdout stays free for
/// the violation report.
///
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing_with_default(default_filter: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(default_filter));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .init();
    });
}
