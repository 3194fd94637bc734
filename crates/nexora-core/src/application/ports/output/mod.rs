//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `nexora-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{Language, RenderContext, TemplateSet};
use crate::error::NexoraResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `nexora_adapters::filesystem::LocalFilesystem` (production)
/// - `nexora_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - Every call completes before returning; services never overlap I/O
/// - Missing files are errors for reads and removals; callers check
///   `exists` first when absence is expected
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> NexoraResult<()>;

    /// Write content to a file, replacing it. Parents must exist.
    fn write_file(&self, path: &Path, content: &str) -> NexoraResult<()>;

    /// Read a UTF-8 file.
    fn read_to_string(&self, path: &Path) -> NexoraResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> NexoraResult<()>;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> NexoraResult<()>;

    /// Copy one file, creating the destination's parents.
    fn copy_file(&self, from: &Path, to: &Path) -> NexoraResult<()>;

    /// Every file below `root`, as paths relative to `root`.
    ///
    /// Entries whose relative path starts with one of `exclude` (compared by
    /// path component) are skipped, and excluded directories are not walked.
    fn list_files(&self, root: &Path, exclude: &[PathBuf]) -> NexoraResult<Vec<PathBuf>>;

    /// Create `path` only if it does not exist yet.
    ///
    /// Returns `Ok(false)` when the file is already there.
    fn try_create_new(&self, path: &Path, content: &str) -> NexoraResult<bool>;
}

/// Port for template-set lookup, keyed by `(set name, language)`.
///
/// Implemented by:
/// - `nexora_adapters::template_registry::InMemoryRegistry` (built-in sets
///   plus on-disk overrides)
pub trait TemplateRegistry: Send + Sync {
    /// The set registered under `(name, language)`.
    ///
    /// `Ok(None)` means nothing is registered; callers treat that as "nothing
    /// to render" rather than an error.
    fn lookup(&self, name: &str, language: Language) -> NexoraResult<Option<TemplateSet>>;

    /// Names of all registered sets.
    fn sets(&self) -> NexoraResult<Vec<String>>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `nexora_adapters::renderer::HandlebarsRenderer`
///
/// Implementations must leave JSX object-literal props (`style={{ .. }}`)
/// byte-identical; see [`crate::domain::MaskedTemplate`].
pub trait TemplateRenderer: Send + Sync {
    /// Render one template text against `context`.
    fn render(&self, template: &str, context: &RenderContext) -> NexoraResult<String>;
}

/// Port for the package manager.
///
/// Implemented by:
/// - `nexora_adapters::installer::NpmInstaller` (production)
/// - `nexora_adapters::installer::RecordingInstaller` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait PackageInstaller: Send + Sync {
    /// Install `packages` as regular (or dev) dependencies.
    fn install(&self, project_root: &Path, packages: &[String], dev: bool) -> NexoraResult<()>;

    /// Uninstall `packages`.
    fn uninstall(&self, project_root: &Path, packages: &[String]) -> NexoraResult<()>;
}

/// Port for the native project bootstrap (Android/iOS folders, Metro and
/// Babel config, the React Native dependency pins).
///
/// Implemented by:
/// - `nexora_adapters::initializer::NpxInitializer` (production)
/// - `nexora_adapters::initializer::RecordingInitializer` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait ProjectInitializer: Send + Sync {
    /// Generate the native project `name` into `root`, which may not exist yet.
    fn init(&self, root: &Path, name: &str) -> NexoraResult<()>;
}
