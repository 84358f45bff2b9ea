//! Baseline project files that every component expects

use crate::config::ProjectLayout;
use crate::paths::exists;
use crate::templates::copier::copy_file;
use crate::templates::Catalog;
use anyhow::{Context, Result};
use colored::Colorize;
use tokio::fs;

/// Written when the catalog has no default utilities file
const UTILS_PLACEHOLDER: &str = "// Add shared utility functions here\n";

/// Make sure the shared utilities file and the UI output directory exist
///
/// Safe to call before every component; existing files are never touched.
pub async fn ensure_project_skeleton(catalog: &Catalog, layout: &ProjectLayout) -> Result<()> {
    if !exists(&layout.utils_file) {
        let default_utils = catalog.utils_file();
        if exists(&default_utils) {
            copy_file(&default_utils, &layout.utils_file).await?;
        } else {
            if let Some(parent) = layout.utils_file.parent() {
                fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            fs::write(&layout.utils_file, UTILS_PLACEHOLDER)
                .await
                .with_context(|| format!("Failed to write {}", layout.utils_file.display()))?;
        }
        println!("{} Created {}", "✓".green(), display_relative(layout, &layout.utils_file));
    }

    if !exists(&layout.ui_dir) {
        fs::create_dir_all(&layout.ui_dir)
            .await
            .with_context(|| format!("Failed to create directory: {}", layout.ui_dir.display()))?;
        println!("{} Created {}", "✓".green(), display_relative(layout, &layout.ui_dir));
    }

    Ok(())
}

/// Path relative to the project root for status lines
pub(crate) fn display_relative(layout: &ProjectLayout, path: &std::path::Path) -> String {
    path.strip_prefix(&layout.root)
        .unwrap_or(path)
        .display()
        .to_string()
}
