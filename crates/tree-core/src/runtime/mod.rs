//! Package manager detection and invocation

pub mod package_manager;

pub use package_manager::{CommandPackageManager, PackageManager, PackageManagerKind};
