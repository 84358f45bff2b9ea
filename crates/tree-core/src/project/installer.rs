//! Adding missing packages to the project's package.json

use crate::config::ProjectLayout;
use crate::error::InstallError;
use crate::paths::exists;
use crate::runtime::PackageManager;
use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::{Map, Value};
use tokio::fs;

/// Version written when a specifier names none
pub const DEFAULT_VERSION: &str = "latest";

/// Dependency sections that count as "already installed"
const DEPENDENCY_SECTIONS: [&str; 2] = ["dependencies", "devDependencies"];

/// Split a specifier into `(name, version)`
///
/// The split happens at the last `@` that is not the leading scope marker, so
/// `@scope/pkg@1.0.0` yields `("@scope/pkg", "1.0.0")` and `@scope/pkg` yields
/// `("@scope/pkg", "latest")`.
pub fn parse_specifier(spec: &str) -> (&str, &str) {
    let spec = spec.trim();
    match spec.rfind('@') {
        Some(idx) if idx > 0 => {
            let (name, version) = (&spec[..idx], &spec[idx + 1..]);
            if version.is_empty() {
                (name, DEFAULT_VERSION)
            } else {
                (name, version)
            }
        }
        _ => (spec, DEFAULT_VERSION),
    }
}

/// Outcome of one installer pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// `(name, version)` pairs written to `dependencies`
    pub added: Vec<(String, String)>,
    /// Names already present in either dependency section
    pub satisfied: Vec<String>,
    /// Whether the package manager ran
    pub installed: bool,
}

/// Reconciles specifiers against the project's package manifest
pub struct Installer<'a, P> {
    layout: &'a ProjectLayout,
    package_manager: &'a P,
    skip_install: bool,
}

impl<'a, P: PackageManager> Installer<'a, P> {
    pub fn new(layout: &'a ProjectLayout, package_manager: &'a P) -> Self {
        Self {
            layout,
            package_manager,
            skip_install: false,
        }
    }

    /// Write package.json but leave running the package manager to the user
    pub fn skip_install(mut self, skip: bool) -> Self {
        self.skip_install = skip;
        self
    }

    /// Add every unsatisfied specifier, then install once if anything was added
    pub async fn install_packages(&self, specifiers: &[String]) -> Result<InstallReport> {
        let path = &self.layout.package_manifest;
        if !exists(path) {
            return Err(InstallError::ManifestNotFound(path.clone()).into());
        }

        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut manifest: Value =
            serde_json::from_str(&content).map_err(|source| InstallError::ManifestParse {
                path: path.clone(),
                source,
            })?;
        let root = manifest
            .as_object_mut()
            .ok_or_else(|| InstallError::ManifestShape(path.clone()))?;

        let mut report = InstallReport::default();

        for spec in specifiers {
            let (name, version) = parse_specifier(spec);
            if name.is_empty() {
                continue;
            }

            if report.added.iter().any(|(added, _)| added == name) {
                continue;
            }

            if is_declared(root, name) {
                if !report.satisfied.iter().any(|s| s == name) {
                    report.satisfied.push(name.to_string());
                }
                continue;
            }

            let dependencies = root
                .entry("dependencies")
                .or_insert_with(|| Value::Object(Map::new()))
                .as_object_mut()
                .ok_or_else(|| InstallError::ManifestShape(path.clone()))?;
            dependencies.insert(name.to_string(), Value::String(version.to_string()));
            report.added.push((name.to_string(), version.to_string()));
        }

        for name in &report.satisfied {
            println!("{} {} is already in package.json", "✓".green(), name);
        }

        if report.added.is_empty() {
            return Ok(report);
        }

        let names: Vec<String> = report
            .added
            .iter()
            .map(|(name, version)| format!("{}@{}", name, version))
            .collect();
        println!("{} {}", "Adding packages:".cyan(), names.join(", "));

        let mut serialized =
            serde_json::to_string_pretty(&manifest).context("Failed to serialize package.json")?;
        serialized.push('\n');
        fs::write(path, serialized)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        if self.skip_install {
            println!(
                "{} Skipped install, run your package manager to fetch the new packages",
                "Note:".dimmed()
            );
            return Ok(report);
        }

        if let Err(e) = self.package_manager.install(&self.layout.root).await {
            eprintln!("{} Package installation failed: {}", "Error:".red(), e);
            return Err(e);
        }
        report.installed = true;

        Ok(report)
    }
}

fn is_declared(manifest: &Map<String, Value>, name: &str) -> bool {
    DEPENDENCY_SECTIONS.iter().any(|section| {
        manifest
            .get(*section)
            .and_then(Value::as_object)
            .is_some_and(|deps| deps.contains_key(name))
    })
}
