//! Product configuration trait for CLI binaries
//!
//! The core never works out where the catalog lives on its own. A binary implements
//! this trait and the catalog root is resolved from it, so tests can point the
//! materializer at a synthetic catalog instead.

use std::path::PathBuf;

/// Configuration trait for a CLI built on top of this library
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the CLI command)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Environment variable that overrides the catalog location
    fn catalog_env(&self) -> &'static str;

    /// Catalog directory used when neither a flag nor the environment names one
    fn default_catalog_dir(&self) -> PathBuf;

    /// Resolve the catalog root: explicit path, then environment, then the default
    fn resolve_catalog_dir(&self, explicit: Option<PathBuf>) -> PathBuf {
        explicit
            .or_else(|| std::env::var_os(self.catalog_env()).map(PathBuf::from))
            .unwrap_or_else(|| self.default_catalog_dir())
    }
}
