//! Package manager detection and invocation
//!
//! The installer only ever asks for one thing: "install whatever package.json
//! now declares". [`PackageManager`] is that seam; [`CommandPackageManager`]
//! runs the real binary with the user's terminal attached.

use crate::error::InstallError;
use crate::paths::exists;
use anyhow::Result;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::path::Path;
use std::process::{Command, Stdio};
use std::str::FromStr;
use tokio::process::Command as TokioCommand;

/// Lockfiles in detection order
const LOCKFILES: &[(&str, PackageManagerKind)] = &[
    ("pnpm-lock.yaml", PackageManagerKind::Pnpm),
    ("bun.lockb", PackageManagerKind::Bun),
    ("bun.lock", PackageManagerKind::Bun),
    ("yarn.lock", PackageManagerKind::Yarn),
    ("package-lock.json", PackageManagerKind::Npm),
];

/// Supported JavaScript package managers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManagerKind {
    #[default]
    Pnpm,
    Npm,
    Yarn,
    Bun,
}

impl PackageManagerKind {
    pub fn binary(&self) -> &'static str {
        match self {
            PackageManagerKind::Pnpm => "pnpm",
            PackageManagerKind::Npm => "npm",
            PackageManagerKind::Yarn => "yarn",
            PackageManagerKind::Bun => "bun",
        }
    }

    /// Pick the package manager whose lockfile is in `project_root`, pnpm otherwise
    pub fn detect(project_root: &Path) -> Self {
        LOCKFILES
            .iter()
            .find(|(lockfile, _)| exists(project_root.join(lockfile)))
            .map(|(_, kind)| *kind)
            .unwrap_or_default()
    }

    /// Check whether the binary answers `--version`
    pub fn is_available(&self) -> bool {
        Command::new(self.binary())
            .arg("--version")
            .output()
            .is_ok_and(|o| o.status.success())
    }
}

impl fmt::Display for PackageManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.binary())
    }
}

impl FromStr for PackageManagerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pnpm" => Ok(PackageManagerKind::Pnpm),
            "npm" => Ok(PackageManagerKind::Npm),
            "yarn" => Ok(PackageManagerKind::Yarn),
            "bun" => Ok(PackageManagerKind::Bun),
            other => Err(format!(
                "unknown package manager '{}' (expected pnpm, npm, yarn or bun)",
                other
            )),
        }
    }
}

/// Installs the dependencies a project's package.json declares
pub trait PackageManager: Send + Sync {
    fn install(&self, project_root: &Path) -> impl Future<Output = Result<()>> + Send;
}

/// Runs `<package manager> install` as a child process
#[derive(Debug, Clone, Copy)]
pub struct CommandPackageManager {
    kind: PackageManagerKind,
}

impl CommandPackageManager {
    pub fn new(kind: PackageManagerKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> PackageManagerKind {
        self.kind
    }

    pub fn install_command(&self) -> String {
        format!("{} install", self.kind.binary())
    }
}

impl PackageManager for CommandPackageManager {
    async fn install(&self, project_root: &Path) -> Result<()> {
        let cmd = self.install_command();
        println!("{} {}", "Running:".dimmed(), cmd.yellow());

        // Inherited stdio so the installer's own progress output stays live
        let status = TokioCommand::new(self.kind.binary())
            .arg("install")
            .current_dir(project_root)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| InstallError::PackageManager {
                command: cmd.clone(),
                reason: e.to_string(),
            })?;

        if !status.success() {
            return Err(InstallError::PackageManager {
                command: cmd,
                reason: match status.code() {
                    Some(code) => format!("exited with code {}", code),
                    None => "terminated by signal".to_string(),
                },
            }
            .into());
        }

        Ok(())
    }
}
