//! The bundled template catalog
//!
//! This module provides:
//! - Catalog layout (template directories, hooks, the default utilities file)
//! - Component manifest parsing
//! - Recursive template copying

pub mod copier;
pub mod manifest;

use crate::error::CatalogError;
use crate::paths::exists;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tokio::fs;

pub use copier::copy_template;
pub use manifest::{ComponentManifest, StyleFragment, StyleGroup, MANIFEST_FILE};

/// Catalog entry reserved for individually addressable hook files
pub const HOOKS_DIR: &str = "hooks";

/// Extension of hook files in the catalog and in the project
pub const HOOK_EXTENSION: &str = "ts";

/// Default shared utilities file at the catalog root
pub const UTILS_FILE: &str = "utils.ts";

/// Read-only view of a catalog directory
#[derive(Debug, Clone)]
pub struct Catalog {
    root: PathBuf,
}

impl Catalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn template_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn has_template(&self, name: &str) -> bool {
        // The hooks directory is not a template, and names must not escape the root
        if matches!(name, "" | "." | ".." | HOOKS_DIR) || name.contains(['/', '\\']) {
            return false;
        }
        exists(self.template_dir(name))
    }

    pub fn hook_file(&self, hook: &str) -> PathBuf {
        self.root
            .join(HOOKS_DIR)
            .join(format!("{}.{}", hook, HOOK_EXTENSION))
    }

    pub fn utils_file(&self) -> PathBuf {
        self.root.join(UTILS_FILE)
    }

    /// List template names, sorted, without the hooks directory
    pub async fn list(&self) -> Result<Vec<String>> {
        let mut entries = fs::read_dir(&self.root)
            .await
            .with_context(|| format!("Failed to read catalog {}", self.root.display()))?;

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name != HOOKS_DIR && !name.starts_with('.') {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }

    /// Load a template's manifest, `None` when the template ships without one
    pub async fn load_manifest(&self, name: &str) -> Result<Option<ComponentManifest>> {
        let path = self.template_dir(name).join(MANIFEST_FILE);
        if !exists(&path) {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let manifest = ComponentManifest::from_json(&content).map_err(|source| {
            CatalogError::ManifestParse {
                path: path.clone(),
                source,
            }
        })?;

        let unknown = manifest.unknown_keys();
        if !unknown.is_empty() {
            eprintln!(
                "{} Unrecognized keys in {}: {}",
                "Warning:".yellow(),
                path.display(),
                unknown.join(", ")
            );
        }

        Ok(Some(manifest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn catalog_fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in ["sidebar", "button", "hooks", "tiptap"] {
            std::fs::create_dir_all(dir.path().join(name)).unwrap();
        }
        std::fs::write(dir.path().join("utils.ts"), "export {}\n").unwrap();
        dir
    }

    #[tokio::test]
    async fn test_list_sorted_without_hooks() {
        let dir = catalog_fixture();
        let catalog = Catalog::new(dir.path());

        let names = catalog.list().await.unwrap();
        assert_eq!(names, vec!["button", "sidebar", "tiptap"]);
    }

    #[test]
    fn test_has_template() {
        let dir = catalog_fixture();
        let catalog = Catalog::new(dir.path());

        assert!(catalog.has_template("button"));
        assert!(!catalog.has_template("hooks"));
        assert!(!catalog.has_template("does-not-exist"));
        assert!(!catalog.has_template("../button"));
    }

    #[test]
    fn test_hook_file_path() {
        let catalog = Catalog::new("/catalog");
        assert_eq!(
            catalog.hook_file("use-mobile"),
            PathBuf::from("/catalog/hooks/use-mobile.ts")
        );
    }

    #[tokio::test]
    async fn test_load_manifest_missing_is_none() {
        let dir = catalog_fixture();
        let catalog = Catalog::new(dir.path());
        assert!(catalog.load_manifest("button").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_load_manifest_malformed_is_error() {
        let dir = catalog_fixture();
        std::fs::write(dir.path().join("button").join(MANIFEST_FILE), "{ nope").unwrap();
        let catalog = Catalog::new(dir.path());

        let err = catalog.load_manifest("button").await.unwrap_err();
        assert!(err.downcast_ref::<CatalogError>().is_some());
    }
}
