//! Filesystem-based template set loader.
//!
//! Reads override template sets from a directory tree so a team can ship its
//! own variants of the built-in sets without rebuilding the binary.
//!
//! # Directory layout expected
//!
//! ```text
//! templates/
//! ├── redux/
//! │   ├── set.toml             ← optional manifest
//! │   ├── typescript/
//! │   │   └── src/store/index.ts
//! │   └── javascript/
//! │       └── src/store/index.js
//! └── core/
//!     └── typescript/
//!         └── package.json
//! ```
//!
//! The set name is the directory name. Every file under a language folder is
//! one template file; its path relative to that folder is its destination.
//!
//! # `set.toml` format
//!
//! ```toml
//! # Files not listed here are written with the default "always" policy.
//! [[files]]
//! path   = "package.json"
//! policy = "create-only"       # always | create-only
//! ```

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use nexora_core::{
    application::ApplicationError,
    domain::{Language, TemplateFile, TemplateSet, WritePolicy},
    error::{NexoraError, NexoraResult},
};

/// Manifest file name inside a set directory.
pub const SET_MANIFEST: &str = "set.toml";

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised `set.toml`.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct SetManifest {
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

/// `[[files]]` entry: a per-file policy override.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileEntry {
    /// Destination path, relative to the language folder.
    pub path: String,
    #[serde(default)]
    pub policy: WritePolicy,
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads every template set found under one directory.
///
/// # Example
///
/// ```no_run
/// use nexora_adapters::FilesystemTemplateLoader;
///
/// let loader = FilesystemTemplateLoader::new("./templates");
/// let sets = loader.load_all()?;
/// println!("Loaded {} template sets", sets.len());
/// # Ok::<(), nexora_core::error::NexoraError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FilesystemTemplateLoader {
    templates_dir: PathBuf,
}

impl FilesystemTemplateLoader {
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    /// Load every valid set under the templates directory, one entry per
    /// set and language found.
    ///
    /// # Errors
    ///
    /// Fails when the directory is missing or unreadable. A set directory
    /// whose manifest or files cannot be read is **skipped with a `WARN`
    /// log** rather than failing the whole batch.
    #[instrument(skip(self), fields(dir = %self.templates_dir.display()))]
    pub fn load_all(&self) -> NexoraResult<Vec<TemplateSet>> {
        if !self.templates_dir.is_dir() {
            return Err(NexoraError::Configuration {
                message: format!(
                    "templates directory not found: {}",
                    self.templates_dir.display()
                ),
            });
        }

        let read_dir = fs::read_dir(&self.templates_dir)
            .map_err(|e| io_error(&self.templates_dir, e, "read templates directory"))?;

        let mut dirs = Vec::new();
        for entry in read_dir {
            let entry =
                entry.map_err(|e| io_error(&self.templates_dir, e, "read directory entry"))?;
            if entry.path().is_dir() {
                dirs.push(entry.path());
            }
        }
        dirs.sort();

        let mut sets = Vec::new();
        for dir in dirs {
            match self.load_set_dir(&dir) {
                Ok(loaded) if loaded.is_empty() => {
                    warn!(dir = %dir.display(), "no language folders in template set, skipping");
                }
                Ok(loaded) => {
                    for set in &loaded {
                        debug!(name = %set.name, language = %set.language, files = set.len(), "loaded template set");
                    }
                    sets.extend(loaded);
                }
                Err(e) => {
                    warn!(
                        dir   = %dir.display(),
                        error = %e,
                        "skipping template set due to load error"
                    );
                }
            }
        }

        debug!(count = sets.len(), "finished loading template sets");
        Ok(sets)
    }

    /// Load both language variants of one set directory.
    fn load_set_dir(&self, dir: &Path) -> NexoraResult<Vec<TemplateSet>> {
        let name = dir
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| NexoraError::Configuration {
                message: format!("template set directory name is not UTF-8: {}", dir.display()),
            })?;

        let manifest = read_manifest(dir)?;
        let policies: HashMap<String, WritePolicy> = manifest
            .files
            .into_iter()
            .map(|entry| (normalize_path(&entry.path), entry.policy))
            .collect();

        let mut sets = Vec::new();
        for language in Language::ALL {
            let root = dir.join(language.folder());
            if !root.is_dir() {
                continue;
            }

            let mut set = TemplateSet::new(name, language);
            for entry in WalkDir::new(&root).sort_by_file_name() {
                let entry = entry.map_err(|e| {
                    let path = e.path().unwrap_or(root.as_path()).to_path_buf();
                    io_error(&path, e.into(), "walk template set")
                })?;
                if !entry.file_type().is_file() {
                    continue;
                }

                let relative = entry
                    .path()
                    .strip_prefix(&root)
                    .map(|p| normalize_path(&p.to_string_lossy()))
                    .map_err(|_| NexoraError::Internal {
                        message: format!("walked outside {}", root.display()),
                    })?;
                let content = fs::read_to_string(entry.path())
                    .map_err(|e| io_error(entry.path(), e, "read template file"))?;

                let mut file = TemplateFile::new(relative.clone(), content);
                if policies.get(&relative) == Some(&WritePolicy::CreateOnly) {
                    file = file.create_only();
                }
                set.push(file);
            }

            if !set.is_empty() {
                sets.push(set);
            }
        }
        Ok(sets)
    }
}

fn read_manifest(dir: &Path) -> NexoraResult<SetManifest> {
    let path = dir.join(SET_MANIFEST);
    if !path.exists() {
        return Ok(SetManifest::default());
    }

    let raw = fs::read_to_string(&path).map_err(|e| io_error(&path, e, "read manifest"))?;
    toml::from_str(&raw).map_err(|e| NexoraError::Configuration {
        message: format!("failed to parse '{}': {e}", path.display()),
    })
}

fn io_error(path: &Path, e: std::io::Error, operation: &str) -> NexoraError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}

/// Forward slashes everywhere so manifest paths compare on every platform.
fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
