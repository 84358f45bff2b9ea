//! Typed failures that callers may want to match on
//!
//! Everything else travels as `anyhow::Error` with context attached at the call site.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading a component template from the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to parse manifest {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures while reconciling the target project's package manifest
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("Package manifest not found: {0}")]
    ManifestNotFound(PathBuf),

    #[error("Failed to parse package manifest {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Package manifest {0} is not a JSON object")]
    ManifestShape(PathBuf),

    #[error("`{command}` failed: {reason}")]
    PackageManager { command: String, reason: String },
}
