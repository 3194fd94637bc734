//! Native project bootstrap adapters.
//!
//! [`NpxInitializer`] runs the React Native community CLI to generate the
//! Android and iOS projects. [`RecordingInitializer`] only records calls.

use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
    sync::{Arc, Mutex},
};

use tracing::{debug, instrument};

use nexora_core::{
    application::{ApplicationError, ports::ProjectInitializer},
    error::NexoraResult,
};

const COMMUNITY_CLI: &str = "@react-native-community/cli";

/// Runs `npx @react-native-community/cli init <Name> --skip-install`.
///
/// Packages are installed later by the composer, so the bootstrap never
/// touches the registry itself.
#[derive(Debug, Clone)]
pub struct NpxInitializer {
    binary: String,
    version: Option<String>,
}

impl NpxInitializer {
    pub fn new() -> Self {
        Self {
            binary: "npx".to_string(),
            version: None,
        }
    }

    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Pin the React Native version passed to `init --version`.
    pub fn with_version(mut self, version: Option<String>) -> Self {
        self.version = version;
        self
    }

    pub fn init_args(&self, root: &Path, name: &str) -> Vec<String> {
        let mut args = vec![
            "--yes".to_string(),
            COMMUNITY_CLI.to_string(),
            "init".to_string(),
            name.to_string(),
            "--directory".to_string(),
            root.display().to_string(),
            "--skip-install".to_string(),
            "--skip-git-init".to_string(),
        ];
        if let Some(version) = &self.version {
            args.push("--version".to_string());
            args.push(version.clone());
        }
        args
    }
}

impl Default for NpxInitializer {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectInitializer for NpxInitializer {
    #[instrument(skip(self), fields(root = %root.display()))]
    fn init(&self, root: &Path, name: &str) -> NexoraResult<()> {
        let failed = |reason: String| ApplicationError::NativeInit { reason };
        let cwd = match root.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let args = self.init_args(root, name);

        debug!(binary = %self.binary, ?args, "spawning native bootstrap");
        let output = Command::new(&self.binary)
            .args(&args)
            .current_dir(cwd)
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

/// One recorded bootstrap call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitCall {
    pub root: PathBuf,
    pub name: String,
}

/// Initializer that records its calls and generates nothing.
///
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingInitializer {
    calls: Arc<Mutex<Vec<InitCall>>>,
}

impl RecordingInitializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<InitCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl ProjectInitializer for RecordingInitializer {
    fn init(&self, root: &Path, name: &str) -> NexoraResult<()> {
        self.calls
            .lock()
            .map_err(|_| ApplicationError::StoreLockError)?
            .push(InitCall {
                root: root.to_path_buf(),
                name: name.to_string(),
            });
        Ok(())
    }
}
