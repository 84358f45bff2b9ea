//! Target project layout and the optional `tree.yaml` override file

use crate::paths::exists;
use crate::runtime::PackageManagerKind;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the per-project override file
pub const PROJECT_CONFIG_FILE: &str = "tree.yaml";

/// Where things land inside the target project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub root: PathBuf,
    /// Parent directory of every materialized component
    pub components_dir: PathBuf,
    /// Shared UI output directory
    pub ui_dir: PathBuf,
    pub hooks_dir: PathBuf,
    /// Shared utilities file
    pub utils_file: PathBuf,
    /// Global stylesheet receiving style fragments
    pub stylesheet: PathBuf,
    /// Package manifest (package.json)
    pub package_manifest: PathBuf,
}

impl ProjectLayout {
    /// Default layout rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_paths(root, &PathOverrides::default())
    }

    /// Layout rooted at `root`, with any overridden relative paths applied
    pub fn with_paths(root: impl Into<PathBuf>, paths: &PathOverrides) -> Self {
        let root = root.into();
        let pick = |value: &Option<PathBuf>, default: &str| {
            root.join(value.as_deref().unwrap_or(Path::new(default)))
        };

        Self {
            components_dir: pick(&paths.components, "src/components"),
            ui_dir: pick(&paths.ui, "src/components/ui"),
            hooks_dir: pick(&paths.hooks, "src/hooks"),
            utils_file: pick(&paths.utils, "src/lib/utils.ts"),
            stylesheet: pick(&paths.stylesheet, "src/app/globals.css"),
            package_manifest: root.join("package.json"),
            root,
        }
    }

    /// Destination directory for a component
    pub fn component_dir(&self, name: &str) -> PathBuf {
        self.components_dir.join(name)
    }

    /// Destination path for a hook file
    pub fn hook_file(&self, file_name: &str) -> PathBuf {
        self.hooks_dir.join(file_name)
    }
}

/// Relative path overrides from `tree.yaml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathOverrides {
    #[serde(default)]
    pub components: Option<PathBuf>,
    #[serde(default)]
    pub ui: Option<PathBuf>,
    #[serde(default)]
    pub hooks: Option<PathBuf>,
    #[serde(default)]
    pub utils: Option<PathBuf>,
    #[serde(default)]
    pub stylesheet: Option<PathBuf>,
}

/// Contents of `tree.yaml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    #[serde(default)]
    pub paths: PathOverrides,

    /// Package manager to run instead of lockfile detection
    #[serde(default)]
    pub package_manager: Option<PackageManagerKind>,
}

impl ProjectConfig {
    /// Load `tree.yaml` from the project root, defaults when it does not exist
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(PROJECT_CONFIG_FILE);
        if !exists(&path) {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn layout(&self, project_root: impl Into<PathBuf>) -> ProjectLayout {
        ProjectLayout::with_paths(project_root, &self.paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_layout() {
        let layout = ProjectLayout::new("/work/app");

        assert_eq!(layout.components_dir, PathBuf::from("/work/app/src/components"));
        assert_eq!(layout.ui_dir, PathBuf::from("/work/app/src/components/ui"));
        assert_eq!(layout.utils_file, PathBuf::from("/work/app/src/lib/utils.ts"));
        assert_eq!(layout.stylesheet, PathBuf::from("/work/app/src/app/globals.css"));
        assert_eq!(layout.package_manifest, PathBuf::from("/work/app/package.json"));
        assert_eq!(
            layout.component_dir("sidebar"),
            PathBuf::from("/work/app/src/components/sidebar")
        );
    }

    #[test]
    fn test_missing_config_is_default() {
        let dir = TempDir::new().unwrap();
        assert_eq!(ProjectConfig::load(dir.path()).unwrap(), ProjectConfig::default());
    }

    #[test]
    fn test_config_overrides_paths_and_package_manager() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(PROJECT_CONFIG_FILE),
            "paths:\n  stylesheet: app/globals.css\n  hooks: hooks\npackage_manager: npm\n",
        )
        .unwrap();

        let config = ProjectConfig::load(dir.path()).unwrap();
        assert_eq!(config.package_manager, Some(PackageManagerKind::Npm));

        let layout = config.layout(dir.path());
        assert_eq!(layout.stylesheet, dir.path().join("app/globals.css"));
        assert_eq!(layout.hooks_dir, dir.path().join("hooks"));
        assert_eq!(layout.components_dir, dir.path().join("src/components"));
    }

    #[test]
    fn test_config_rejects_unknown_keys() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(PROJECT_CONFIG_FILE), "stylesheet: x.css\n").unwrap();
        assert!(ProjectConfig::load(dir.path()).is_err());
    }
}
