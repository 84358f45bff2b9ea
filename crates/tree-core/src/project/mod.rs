//! Mutations of the target project: skeleton, stylesheet and package manifest

pub mod bootstrap;
pub mod installer;
pub mod styles;

pub use bootstrap::ensure_project_skeleton;
pub use installer::{parse_specifier, InstallReport, Installer};
pub use styles::{merge_styles, StyleMergeReport};
