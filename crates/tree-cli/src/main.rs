//! tree-cli - copy UI component templates into a project

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tree_core::tui::SelectArgs;
use tree_core::{
    Catalog, CommandPackageManager, Materializer, PackageManagerKind, ProductConfig,
    ProjectConfig,
};

/// Catalog bundled with the source tree
const BUNDLED_CATALOG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../templates");

/// tree-cli product configuration
#[derive(Clone)]
pub struct TreeConfig;

impl ProductConfig for TreeConfig {
    fn name(&self) -> &'static str {
        "tree-cli"
    }

    fn display_name(&self) -> &'static str {
        "tree-cli"
    }

    fn catalog_env(&self) -> &'static str {
        "TREE_CATALOG_DIR"
    }

    fn default_catalog_dir(&self) -> PathBuf {
        // An installed binary ships its catalog alongside the executable
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("templates")))
            .filter(|dir| dir.is_dir())
            .unwrap_or_else(|| PathBuf::from(BUNDLED_CATALOG))
    }
}

#[derive(Parser, Debug)]
#[command(name = "tree-cli")]
#[command(about = "CLI for copying UI component templates into a project")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory containing component templates
    #[arg(long = "catalog-dir", global = true)]
    pub catalog_dir: Option<PathBuf>,

    /// Project directory to add components to
    #[arg(short = 'C', long = "cwd", global = true)]
    pub cwd: Option<PathBuf>,

    /// Package manager to install with (pnpm, npm, yarn, bun); detected from the lockfile by default
    #[arg(long = "package-manager", global = true)]
    pub package_manager: Option<PackageManagerKind>,

    /// Update package.json without running the package manager
    #[arg(long = "skip-install", global = true)]
    pub skip_install: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long, global = true)]
    pub yes: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add one or more components to the project
    Add(AddArgs),
    /// List the components available in the catalog
    List,
}

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Component names, added in order
    #[arg(required = true)]
    pub names: Vec<String>,
}

fn build_materializer(
    config: &TreeConfig,
    args: &Args,
) -> Result<Materializer<CommandPackageManager>> {
    let project_root = match &args.cwd {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Failed to read current directory")?,
    };
    let project_config = ProjectConfig::load(&project_root)?;

    let kind = args
        .package_manager
        .or(project_config.package_manager)
        .unwrap_or_else(|| PackageManagerKind::detect(&project_root));
    let catalog = Catalog::new(config.resolve_catalog_dir(args.catalog_dir.clone()));
    let layout = project_config.layout(project_root);

    Ok(
        Materializer::new(catalog, layout, CommandPackageManager::new(kind))
            .skip_install(args.skip_install),
    )
}

fn warn_if_unavailable(materializer: &Materializer<CommandPackageManager>, skip_install: bool) {
    let kind = materializer.package_manager().kind();
    if !skip_install && !kind.is_available() {
        eprintln!(
            "{} {} was not found on PATH, installs will fail until it is available",
            "Warning:".yellow(),
            kind
        );
    }
}

async fn list(config: &TreeConfig, materializer: &Materializer<CommandPackageManager>) -> Result<()> {
    let catalog = materializer.catalog();
    let names = catalog.list().await?;
    if names.is_empty() {
        println!("No templates found in {}", catalog.root().display());
        return Ok(());
    }

    println!("{}", "Available components:".cyan().bold());
    for name in names {
        println!("  {} {}", "->".blue(), name);
    }
    println!();
    println!("Run `{} add <name>` to add one", config.name());
    Ok(())
}

async fn add(materializer: &Materializer<CommandPackageManager>, names: &[String]) -> Result<()> {
    let report = materializer.add_components(names).await?;

    println!();
    for line in report.summary_lines() {
        println!("  {}", line);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let config = TreeConfig;
    let materializer = build_materializer(&config, &args)?;

    match &args.command {
        Some(Command::Add(add_args)) => {
            warn_if_unavailable(&materializer, args.skip_install);
            add(&materializer, &add_args.names).await
        }
        Some(Command::List) => list(&config, &materializer).await,
        None => {
            warn_if_unavailable(&materializer, args.skip_install);

            // No subcommand provided, pick a component interactively
            let result =
                tree_core::run(&config, &materializer, SelectArgs { yes: args.yes }).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_with_global_flags() {
        let args = Args::try_parse_from([
            "tree-cli",
            "add",
            "sidebar",
            "tiptap",
            "--package-manager",
            "npm",
            "--skip-install",
        ])
        .unwrap();

        assert_eq!(args.package_manager, Some(PackageManagerKind::Npm));
        assert!(args.skip_install);
        match args.command {
            Some(Command::Add(add)) => assert_eq!(add.names, vec!["sidebar", "tiptap"]),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_add_requires_a_name() {
        assert!(Args::try_parse_from(["tree-cli", "add"]).is_err());
    }

    #[test]
    fn test_rejects_unknown_package_manager() {
        assert!(Args::try_parse_from(["tree-cli", "--package-manager", "pip", "list"]).is_err());
    }

    #[test]
    fn test_explicit_catalog_dir() {
        let dir = TreeConfig.resolve_catalog_dir(Some(PathBuf::from("/tmp/templates")));
        assert_eq!(dir, PathBuf::from("/tmp/templates"));
    }
}
