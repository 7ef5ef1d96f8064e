//! Per-run counters.

use std::fmt;

use serde::Serialize;

use crate::violations::{ViolationKind, ViolationRecord};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub files_total: usize,
    pub scripts_scanned: usize,
    pub styles_scanned: usize,
    /// Routed to a scanner but not scanned (too large, unreadable,
    /// unparseable).
    pub files_skipped: usize,
    /// Extensions no scanner handles.
    pub files_ignored: usize,
    pub violations: usize,
    pub js_violations: usize,
    pub css_violations: usize,
    pub duration_ms: u64,
}

impl RunSummary {
    pub(crate) fn count_violations(&mut self, records: &[ViolationRecord]) {
        self.violations = records.len();
        self.js_violations = records.iter().filter(|r| r.kind == ViolationKind::Js).count();
        self.css_violations = self.violations - self.js_violations;
    }

    pub fn is_clean(&self) -> bool {
        self.violations == 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} violation(s) ({} js, {} css) in {} file(s): {} script(s), {} stylesheet(s) scanned, {} skipped, {} ignored, {}ms",
            self.violations,
            self.js_violations,
            self.css_violations,
            self.files_total,
            self.scripts_scanned,
            self.styles_scanned,
            self.files_skipped,
            self.files_ignored,
            self.duration_ms,
        )
    }
}
