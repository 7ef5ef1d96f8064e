//! File enumeration for the command-line gate.
//!
//! The engine itself takes an already-resolved list; this walker produces it
//! with gitignore semantics plus include/exclude globs.

use std::path::{Path, PathBuf};

use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use tracing::{debug, warn};

use crate::scanner::language_detect::SourceLanguage;

/// Build output and dependency directories never worth scanning.
pub const DEFAULT_IGNORE_DIRS: &[&str] = &[
    "node_modules",
    "bower_components",
    "jspm_packages",
    ".pnpm",
    ".yarn",
    ".git",
    "dist",
    "build",
    "out",
    "coverage",
    ".nyc_output",
    ".next",
    ".nuxt",
    ".svelte-kit",
    ".turbo",
    ".cache",
    ".parcel-cache",
];

/// Walk `root` and return every supported source file matching `include`
/// and not matching `exclude`, sorted for deterministic scan order.
///
/// Invalid globs are logged and skipped.
pub fn collect_files(root: &Path, include: &[String], exclude: &[String]) -> Vec<PathBuf> {
    let mut overrides = OverrideBuilder::new(root);
    for pattern in include {
        if let Err(e) = overrides.add(pattern) {
            warn!(pattern, error = %e, "ignoring invalid include glob");
        }
    }
    for pattern in exclude {
        if let Err(e) = overrides.add(&format!("!{pattern}")) {
            warn!(pattern, error = %e, "ignoring invalid exclude glob");
        }
    }
    for dir in DEFAULT_IGNORE_DIRS {
        if let Err(e) = overrides.add(&format!("!**/{dir}")) {
            warn!(dir, error = %e, "ignoring invalid default ignore glob");
        }
    }

    let mut builder = WalkBuilder::new(root);
    builder.hidden(false).git_ignore(true).git_exclude(true);
    match overrides.build() {
        Ok(built) => {
            builder.overrides(built);
        }
        Err(e) => warn!(error = %e, "file globs rejected, walking without them"),
    }

    let mut files: Vec<PathBuf> = builder
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "skipping unreadable path");
                None
            }
        })
        .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
        .map(|entry| entry.into_path())
        .filter(|path| SourceLanguage::from_path(path).is_some())
        .collect();

    files.sort();
    debug!(root = %root.display(), files = files.len(), "file walk complete");
    files
}
