//! Template file copying

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;
use walkdir::WalkDir;

/// Copy every file under `source` into `target_dir`, preserving structure
///
/// Existing files at the destination are overwritten. Returns the copied paths
/// relative to `target_dir`, in walk order.
pub async fn copy_template(source: &Path, target_dir: &Path) -> Result<Vec<String>> {
    fs::create_dir_all(target_dir)
        .await
        .with_context(|| format!("Failed to create directory: {}", target_dir.display()))?;

    let mut copied_files = Vec::new();

    let entries = WalkDir::new(source)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to walk template {}", source.display()))?;

    for entry in entries {
        let relative = entry
            .path()
            .strip_prefix(source)
            .with_context(|| format!("Unexpected path {}", entry.path().display()))?;
        let target_path = target_dir.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target_path).await.with_context(|| {
                format!("Failed to create directory: {}", target_path.display())
            })?;
            continue;
        }

        copy_file(entry.path(), &target_path).await?;
        copied_files.push(relative.to_string_lossy().replace('\\', "/"));
    }

    Ok(copied_files)
}

/// Copy a single file, creating the destination's parent directories
pub async fn copy_file(source: &Path, target_path: &Path) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::copy(source, target_path).await.with_context(|| {
        format!(
            "Failed to copy {} to {}",
            source.display(),
            target_path.display()
        )
    })?;

    Ok(())
}
