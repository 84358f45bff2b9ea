//! Materializing a component and everything it depends on
//!
//! `add_component` walks the dependency closure depth-first and strictly in
//! declared order. Each template is copied, then its manifest drives the
//! installer, the style merger, hook copies and finally the nested components.
//! Nothing is rolled back: a hard error leaves earlier side effects in place and
//! re-running the same command is the recovery path.

use crate::config::ProjectLayout;
use crate::paths::exists;
use crate::project::bootstrap::display_relative;
use crate::project::{ensure_project_skeleton, merge_styles, Installer};
use crate::runtime::PackageManager;
use crate::templates::copier::copy_file;
use crate::templates::{copy_template, Catalog, ComponentManifest};
use anyhow::Result;
use colored::Colorize;
use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;

/// Everything one `add` changed, in the order it happened
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddReport {
    /// Components copied into the project
    pub components: Vec<String>,
    /// Requested or declared components absent from the catalog
    pub missing: Vec<String>,
    /// Components reached again within the same walk and skipped
    pub already_visited: Vec<String>,
    /// `(name, version)` pairs added to package.json
    pub packages: Vec<(String, String)>,
    /// Hooks copied into the project
    pub hooks: Vec<String>,
    /// Hooks declared by a manifest but absent from the catalog
    pub missing_hooks: Vec<String>,
    /// CSS variables inserted into the stylesheet
    pub style_variables: Vec<String>,
}

impl AddReport {
    /// Human-readable summary, one line per non-empty category
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if !self.components.is_empty() {
            lines.push(format!("Components: {}", self.components.join(", ")));
        }
        if !self.packages.is_empty() {
            let packages: Vec<String> = self
                .packages
                .iter()
                .map(|(name, version)| format!("{}@{}", name, version))
                .collect();
            lines.push(format!("Packages: {}", packages.join(", ")));
        }
        if !self.hooks.is_empty() {
            lines.push(format!("Hooks: {}", self.hooks.join(", ")));
        }
        if !self.style_variables.is_empty() {
            lines.push(format!("Style variables: {}", self.style_variables.join(", ")));
        }
        if !self.missing.is_empty() {
            lines.push(format!("Not in catalog: {}", self.missing.join(", ")));
        }
        if !self.missing_hooks.is_empty() {
            lines.push(format!("Hooks not in catalog: {}", self.missing_hooks.join(", ")));
        }
        lines
    }

    /// True when nothing requested was found in the catalog
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    fn extend(&mut self, other: AddReport) {
        self.components.extend(other.components);
        self.missing.extend(other.missing);
        self.already_visited.extend(other.already_visited);
        self.packages.extend(other.packages);
        self.hooks.extend(other.hooks);
        self.missing_hooks.extend(other.missing_hooks);
        self.style_variables.extend(other.style_variables);
    }
}

/// Walk-scoped state: names already entered and what has been done so far
#[derive(Default)]
struct Walk {
    visited: HashSet<String>,
    report: AddReport,
}

/// Copies templates from a catalog into a project
pub struct Materializer<P> {
    catalog: Catalog,
    layout: ProjectLayout,
    package_manager: P,
    skip_install: bool,
}

impl<P: PackageManager> Materializer<P> {
    pub fn new(catalog: Catalog, layout: ProjectLayout, package_manager: P) -> Self {
        Self {
            catalog,
            layout,
            package_manager,
            skip_install: false,
        }
    }

    /// Update package.json without running the package manager
    pub fn skip_install(mut self, skip: bool) -> Self {
        self.skip_install = skip;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    pub fn package_manager(&self) -> &P {
        &self.package_manager
    }

    /// Add a component and its dependency closure
    ///
    /// A name missing from the catalog is reported, not raised.
    pub async fn add_component(&self, name: &str) -> Result<AddReport> {
        let mut walk = Walk::default();
        self.materialize(name, &mut walk).await?;
        Ok(walk.report)
    }

    /// Add several components one after another, each with its own walk
    pub async fn add_components(&self, names: &[String]) -> Result<AddReport> {
        let mut report = AddReport::default();
        for name in names {
            report.extend(self.add_component(name).await?);
        }
        Ok(report)
    }

    fn materialize<'a>(
        &'a self,
        name: &'a str,
        walk: &'a mut Walk,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            if !walk.visited.insert(name.to_string()) {
                walk.report.already_visited.push(name.to_string());
                return Ok(());
            }

            let source = self.catalog.template_dir(name);
            let target = self.layout.component_dir(name);

            ensure_project_skeleton(&self.catalog, &self.layout).await?;

            if !self.catalog.has_template(name) {
                eprintln!(
                    "{} Template '{}' does not exist in {}",
                    "Warning:".yellow(),
                    name,
                    self.catalog.root().display()
                );
                walk.report.missing.push(name.to_string());
                return Ok(());
            }

            let copied = copy_template(&source, &target).await?;
            println!(
                "{} Added {} ({} files) to {}",
                "✓".green(),
                name.bold(),
                copied.len(),
                display_relative(&self.layout, &target)
            );
            walk.report.components.push(name.to_string());

            match self.catalog.load_manifest(name).await? {
                Some(manifest) if !manifest.is_empty() => self.apply_manifest(&manifest, walk).await,
                _ => Ok(()),
            }
        })
    }

    async fn apply_manifest(&self, manifest: &ComponentManifest, walk: &mut Walk) -> Result<()> {
        if !manifest.packages.is_empty() {
            let report = Installer::new(&self.layout, &self.package_manager)
                .skip_install(self.skip_install)
                .install_packages(&manifest.packages)
                .await?;
            walk.report.packages.extend(report.added);
        }

        if let Some(styles) = &manifest.styles {
            let report = merge_styles(&self.layout.stylesheet, styles).await?;
            if !report.added.is_empty() {
                println!(
                    "{} Added {} style variable(s) to {}",
                    "✓".green(),
                    report.added.len(),
                    display_relative(&self.layout, &self.layout.stylesheet)
                );
            }
            walk.report.style_variables.extend(report.added);
        }

        for hook in &manifest.hooks {
            let source = self.catalog.hook_file(hook);
            if !exists(&source) {
                eprintln!(
                    "{} Hook '{}' not found at {}",
                    "Warning:".yellow(),
                    hook,
                    source.display()
                );
                walk.report.missing_hooks.push(hook.clone());
                continue;
            }

            let Some(file_name) = source.file_name() else {
                continue;
            };
            let target = self.layout.hook_file(&file_name.to_string_lossy());
            copy_file(&source, &target).await?;
            println!(
                "{} Added hook {} to {}",
                "✓".green(),
                hook.bold(),
                display_relative(&self.layout, &target)
            );
            walk.report.hooks.push(hook.clone());
        }

        if !manifest.components.is_empty() {
            println!(
                "{} {}",
                "Resolving component dependencies:".cyan(),
                manifest.components.join(", ")
            );
        }
        for dependency in &manifest.components {
            self.materialize(dependency, walk).await?;
        }

        Ok(())
    }
}
