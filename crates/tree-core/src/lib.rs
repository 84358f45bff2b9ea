//! Tree Core - copy UI component templates into a project
//!
//! A catalog is a directory of component templates. Adding a component copies its
//! directory into the project, then follows its optional `dependencies.json`:
//! missing npm packages are added to package.json and installed, CSS variables are
//! merged into the global stylesheet, hook files are copied, and nested components
//! are added the same way.
//!
//! # Architecture
//!
//! - **Layer 1: Project operations** - skeleton bootstrap, style merging, package installation
//! - **Layer 2: Orchestration** - `Materializer` walks the dependency closure
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based selector (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based interactive selector
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use tree_core::{Catalog, CommandPackageManager, Materializer, PackageManagerKind, ProjectLayout};
//!
//! let materializer = Materializer::new(
//!     Catalog::new("/usr/share/tree-cli/templates"),
//!     ProjectLayout::new(std::env::current_dir()?),
//!     CommandPackageManager::new(PackageManagerKind::Pnpm),
//! );
//! let report = materializer.add_component("sidebar").await?;
//! ```

pub mod config;
pub mod error;
pub mod materializer;
pub mod paths;
pub mod product;
pub mod project;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{ProjectConfig, ProjectLayout};
pub use error::{CatalogError, InstallError};
pub use materializer::{AddReport, Materializer};
pub use paths::exists;
pub use product::ProductConfig;
pub use runtime::{CommandPackageManager, PackageManager, PackageManagerKind};
pub use templates::{Catalog, ComponentManifest, StyleFragment};

#[cfg(feature = "tui")]
pub use tui::run;
