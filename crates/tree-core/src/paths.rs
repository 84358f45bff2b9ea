//! Filesystem existence checks

use std::path::Path;

/// Check whether a file or directory exists at `path`
///
/// Never fails: permission errors and missing parent directories both read as `false`.
pub fn exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().try_exists().unwrap_or(false)
}
