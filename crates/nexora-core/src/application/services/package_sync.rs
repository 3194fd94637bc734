//! Running planned package changes through the installer port.

use std::path::Path;

use tracing::info;

use crate::{
    application::{ApplicationError, ports::PackageInstaller},
    domain::{DependencyDelta, PackageSet},
    error::{NexoraError, NexoraResult},
};

/// Runs installs and uninstalls after project files are already written,
/// so every failure is reported with `files_committed: true`.
pub(crate) struct PackageSync<'a> {
    installer: &'a dyn PackageInstaller,
    root: &'a Path,
}

impl<'a> PackageSync<'a> {
    pub(crate) fn new(installer: &'a dyn PackageInstaller, root: &'a Path) -> Self {
        Self { installer, root }
    }

    /// One install call for regular dependencies, one for dev dependencies.
    pub(crate) fn install_set(&self, set: &PackageSet) -> NexoraResult<()> {
        let deps: Vec<String> = set.dependencies.iter().cloned().collect();
        let dev: Vec<String> = set.dev_dependencies.iter().cloned().collect();
        self.install(&deps, false)?;
        self.install(&dev, true)
    }

    /// Install what `delta` adds.
    pub(crate) fn install_delta(&self, delta: &DependencyDelta) -> NexoraResult<()> {
        self.install(&delta.install, false)?;
        self.install(&delta.install_dev, true)
    }

    /// Uninstall what `delta` drops.
    pub(crate) fn uninstall_delta(&self, delta: &DependencyDelta) -> NexoraResult<()> {
        if delta.uninstall.is_empty() {
            return Ok(());
        }
        info!(packages = ?delta.uninstall, "Uninstalling packages");
        self.installer
            .uninstall(self.root, &delta.uninstall)
            .map_err(|e| failure("uninstall", e))
    }

    fn install(&self, packages: &[String], dev: bool) -> NexoraResult<()> {
        if packages.is_empty() {
            return Ok(());
        }
        info!(packages = ?packages, dev, "Installing packages");
        self.installer
            .install(self.root, packages, dev)
            .map_err(|e| failure("install", e))
    }
}

fn failure(operation: &'static str, error: NexoraError) -> NexoraError {
    let reason = match error {
        NexoraError::Application(ApplicationError::DependencySync { reason, .. }) => reason,
        other => other.to_string(),
    };
    ApplicationError::DependencySync {
        operation,
        reason,
        files_committed: true,
    }
    .into()
}
