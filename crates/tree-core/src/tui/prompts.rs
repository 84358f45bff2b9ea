//! Charm-style CLI prompts using cliclack

use crate::materializer::Materializer;
use crate::product::ProductConfig;
use crate::runtime::PackageManager;
use crate::templates::ComponentManifest;
use anyhow::Result;

/// Options for the interactive selector
#[derive(Debug, Clone, Default)]
pub struct SelectArgs {
    /// Skip the confirmation prompt
    pub yes: bool,
}

/// Run the interactive component selector
pub async fn run<C: ProductConfig, P: PackageManager>(
    config: &C,
    materializer: &Materializer<P>,
    args: SelectArgs,
) -> Result<()> {
    cliclack::intro(config.display_name())?;

    let catalog = materializer.catalog();
    cliclack::log::info(format!("Using templates from {}", catalog.root().display()))?;

    // Step 1: Select component
    let Some(name) = select_component(materializer).await? else {
        cliclack::outro_cancel("Cancelled")?;
        return Ok(());
    };

    // Step 2: Confirm target
    let project_dir = &materializer.layout().root;
    let confirm = if args.yes {
        true
    } else {
        cliclack::confirm(format!("Add {} to {}?", name, project_dir.display()))
            .initial_value(true)
            .interact()?
    };

    if !confirm {
        cliclack::outro_cancel("Cancelled")?;
        return Ok(());
    }

    // Step 3: Materialize
    cliclack::log::step(format!("Adding {}...", name))?;
    let report = materializer.add_component(&name).await?;

    // Step 4: Summary
    if report.is_empty() {
        cliclack::log::warning(format!("{} was not added", name))?;
    }
    for line in report.summary_lines() {
        cliclack::log::success(line)?;
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}

async fn select_component<P: PackageManager>(
    materializer: &Materializer<P>,
) -> Result<Option<String>> {
    let catalog = materializer.catalog();

    let spinner = cliclack::spinner();
    spinner.start("Loading templates...");

    let names = match catalog.list().await {
        Ok(names) => names,
        Err(e) => {
            spinner.stop("Failed to load templates");
            return Err(e);
        }
    };

    let mut entries: Vec<(String, String)> = Vec::with_capacity(names.len());
    for name in names {
        let hint = match catalog.load_manifest(&name).await {
            Ok(Some(manifest)) => describe(&manifest),
            _ => String::new(),
        };
        entries.push((name, hint));
    }

    spinner.stop(format!("{} templates available", entries.len()));

    if entries.is_empty() {
        anyhow::bail!("No templates found in {}", catalog.root().display());
    }

    let mut select = cliclack::select("Select a component to add");
    for (idx, (name, hint)) in entries.iter().enumerate() {
        select = select.item(idx, name, hint);
    }

    let selected_idx: usize = select.interact()?;

    Ok(entries.into_iter().nth(selected_idx).map(|(name, _)| name))
}

/// Short hint listing what a template pulls in
fn describe(manifest: &ComponentManifest) -> String {
    let mut parts = Vec::new();
    if !manifest.components.is_empty() {
        parts.push(format!("uses {}", manifest.components.join(", ")));
    }
    if !manifest.packages.is_empty() {
        parts.push(format!("{} package(s)", manifest.packages.len()));
    }
    if !manifest.hooks.is_empty() {
        parts.push(format!("{} hook(s)", manifest.hooks.len()));
    }
    parts.join(" · ")
}
