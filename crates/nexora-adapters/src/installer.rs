//! Package installer adapters.
//!
//! [`NpmInstaller`] shells out to the package manager in the project
//! directory. [`RecordingInstaller`] only records calls; the workflow tests
//! run against it.

use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
    sync::{Arc, Mutex},
};

use tracing::{debug, instrument};

use nexora_core::{
    application::{ApplicationError, ports::PackageInstaller},
    error::NexoraResult,
};

/// Runs `npm install` / `npm uninstall` in the project root.
#[derive(Debug, Clone)]
pub struct NpmInstaller {
    binary: String,
    legacy_peer_deps: bool,
}

impl NpmInstaller {
    pub fn new() -> Self {
        Self {
            binary: "npm".to_string(),
            legacy_peer_deps: true,
        }
    }

    /// Use another npm-compatible binary.
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn with_legacy_peer_deps(mut self, on: bool) -> Self {
        self.legacy_peer_deps = on;
        self
    }

    /// Arguments for one install call.
    pub fn install_args(&self, packages: &[String], dev: bool) -> Vec<String> {
        let mut args = vec![
            "install".to_string(),
            if dev { "--save-dev" } else { "--save" }.to_string(),
        ];
        if self.legacy_peer_deps {
            args.push("--legacy-peer-deps".to_string());
        }
        args.extend(packages.iter().cloned());
        args
    }

    /// Arguments for one uninstall call.
    pub fn uninstall_args(&self, packages: &[String]) -> Vec<String> {
        let mut args = vec!["uninstall".to_string()];
        if self.legacy_peer_deps {
            args.push("--legacy-peer-deps".to_string());
        }
        args.extend(packages.iter().cloned());
        args
    }

    fn run(&self, operation: &'static str, root: &Path, args: &[String]) -> NexoraResult<()> {
        let failed = |reason: String| ApplicationError::DependencySync {
            operation,
            reason,
            files_committed: false,
        };

        debug!(binary = %self.binary, ?args, "spawning package manager");
        let output = Command::new(&self.binary)
            .args(args)
            .current_dir(root)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| failed(format!("could not run {}: {e}", self.binary)))?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = stderr.lines().rev().find(|l| !l.trim().is_empty()).unwrap_or("");
        Err(failed(format!("{} exited with {}: {}", self.binary, output.status, detail.trim())).into())
    }
}

impl Default for NpmInstaller {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageInstaller for NpmInstaller {
    #[instrument(skip(self, packages), fields(root = %project_root.display(), count = packages.len()))]
    fn install(&self, project_root: &Path, packages: &[String], dev: bool) -> NexoraResult<()> {
        self.run("install", project_root, &self.install_args(packages, dev))
    }

    #[instrument(skip(self, packages), fields(root = %project_root.display(), count = packages.len()))]
    fn uninstall(&self, project_root: &Path, packages: &[String]) -> NexoraResult<()> {
        self.run("uninstall", project_root, &self.uninstall_args(packages))
    }
}

/// One recorded installer call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallCall {
    Install {
        root: PathBuf,
        packages: Vec<String>,
        dev: bool,
    },
    Uninstall {
        root: PathBuf,
        packages: Vec<String>,
    },
}

/// Installer that only records what it was asked to do.
///
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingInstaller {
    calls: Arc<Mutex<Vec<InstallCall>>>,
}

impl RecordingInstaller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<InstallCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Every package passed to a successful install, in call order.
    pub fn installed(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                InstallCall::Install { packages, .. } => Some(packages),
                InstallCall::Uninstall { .. } => None,
            })
            .flatten()
            .collect()
    }

    /// Every package passed to an uninstall, in call order.
    pub fn uninstalled(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                InstallCall::Uninstall { packages, .. } => Some(packages),
                InstallCall::Install { .. } => None,
            })
            .flatten()
            .collect()
    }

    fn record(&self, call: InstallCall) -> NexoraResult<()> {
        self.calls
            .lock()
            .map_err(|_| ApplicationError::StoreLockError)?
            .push(call);
        Ok(())
    }
}

impl PackageInstaller for RecordingInstaller {
    fn install(&self, project_root: &Path, packages: &[String], dev: bool) -> NexoraResult<()> {
        self.record(InstallCall::Install {
            root: project_root.to_path_buf(),
            packages: packages.to_vec(),
            dev,
        })
    }

    fn uninstall(&self, project_root: &Path, packages: &[String]) -> NexoraResult<()> {
        self.record(InstallCall::Uninstall {
            root: project_root.to_path_buf(),
            packages: packages.to_vec(),
        })
    }
}
