//! Source classification and file enumeration.

use std::path::Path;

pub mod language_detect;
pub mod walker;

pub use language_detect::{SourceKind, SourceLanguage};
pub use walker::collect_files;

/// Path as reported in violations: relative to `root` when it lies under
/// it, otherwise as given. Separators are normalized to `/`.
pub fn display_path(path: &Path, root: Option<&Path>) -> String {
    let shown = root
        .and_then(|r| path.strip_prefix(r).ok())
        .filter(|rel| !rel.as_os_str().is_empty())
        .unwrap_or(path);
    shown.to_string_lossy().replace('\\', "/")
}
