//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use nexora_core::{
    application::{ApplicationError, ports::Filesystem},
    error::NexoraResult,
};

/// In-memory filesystem for testing.
///
/// Clones share the same tree, so a test can hand one clone to a service
/// and inspect the other.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// Seed a file, creating its parent directories.
    pub fn insert_file(&self, path: impl AsRef<Path>, content: impl Into<String>) {
        if let Ok(mut inner) = self.inner.write() {
            let path = path.as_ref();
            if let Some(parent) = path.parent() {
                insert_ancestors(&mut inner.directories, parent);
            }
            inner.files.insert(path.to_path_buf(), content.into());
        }
    }

    /// All file paths, sorted.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Whether `path` is a known directory.
    pub fn is_dir(&self, path: impl AsRef<Path>) -> bool {
        self.inner
            .read()
            .map(|inner| inner.directories.contains(path.as_ref()))
            .unwrap_or(false)
    }

    /// Clear all contents.
    pub fn clear(&self) {
        if let Ok(mut inner) = self.inner.write() {
            inner.files.clear();
            inner.directories.clear();
        }
    }

    fn read(&self) -> NexoraResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }

    fn write(&self) -> NexoraResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

fn insert_ancestors(directories: &mut BTreeSet<PathBuf>, path: &Path) {
    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        directories.insert(current.clone());
    }
}

fn not_found(path: &Path, what: &str) -> nexora_core::error::NexoraError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("{what} does not exist"),
    }
    .into()
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> NexoraResult<()> {
        let mut inner = self.write()?;
        insert_ancestors(&mut inner.directories, path);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> NexoraResult<()> {
        let mut inner = self.write()?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(not_found(parent, "Parent directory"));
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> NexoraResult<String> {
        self.read()?
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path, "File"))
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn remove_dir_all(&self, path: &Path) -> NexoraResult<()> {
        let mut inner = self.write()?;
        if !inner.directories.contains(path) {
            return Err(not_found(path, "Directory"));
        }

        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> NexoraResult<()> {
        let mut inner = self.write()?;
        inner
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| not_found(path, "File"))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> NexoraResult<()> {
        let mut inner = self.write()?;
        let content = inner
            .files
            .get(from)
            .cloned()
            .ok_or_else(|| not_found(from, "File"))?;
        if let Some(parent) = to.parent() {
            insert_ancestors(&mut inner.directories, parent);
        }
        inner.files.insert(to.to_path_buf(), content);
        Ok(())
    }

    fn list_files(&self, root: &Path, exclude: &[PathBuf]) -> NexoraResult<Vec<PathBuf>> {
        let inner = self.read()?;
        Ok(inner
            .files
            .keys()
            .filter_map(|p| p.strip_prefix(root).ok())
            .filter(|rel| !exclude.iter().any(|ex| rel.starts_with(ex)))
            .map(Path::to_path_buf)
            .collect())
    }

    fn try_create_new(&self, path: &Path, content: &str) -> NexoraResult<bool> {
        let mut inner = self.write()?;
        if inner.files.contains_key(path) {
            return Ok(false);
        }
        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let fs = MemoryFilesystem::new();
        let other = fs.clone();
        fs.create_dir_all(Path::new("/p/src")).unwrap();
        fs.write_file(Path::new("/p/src/a.ts"), "a").unwrap();

        assert_eq!(other.read_file("/p/src/a.ts").as_deref(), Some("a"));
        assert!(other.is_dir("/p"));
    }

    #[test]
    fn write_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/nope/a.ts"), "a").is_err());
    }

    #[test]
    fn remove_dir_all_drops_subtree_only() {
        let fs = MemoryFilesystem::new();
        fs.insert_file("/p/src/store/index.ts", "s");
        fs.insert_file("/p/src/storage.ts", "x");

        fs.remove_dir_all(Path::new("/p/src/store")).unwrap();
        assert!(!fs.exists(Path::new("/p/src/store")));
        assert!(!fs.exists(Path::new("/p/src/store/index.ts")));
        assert!(fs.exists(Path::new("/p/src/storage.ts")));
    }

    #[test]
    fn list_files_is_relative_and_excludes_by_component() {
        let fs = MemoryFilesystem::new();
        fs.insert_file("/p/.gitignore", "");
        fs.insert_file("/p/.git/HEAD", "");
        fs.insert_file("/p/ios/Pods/x", "");
        fs.insert_file("/p/ios/App/y", "");
        fs.insert_file("/other/z", "");

        let files = fs
            .list_files(
                Path::new("/p"),
                &[PathBuf::from(".git"), PathBuf::from("ios/Pods")],
            )
            .unwrap();
        assert_eq!(
            files,
            vec![PathBuf::from(".gitignore"), PathBuf::from("ios/App/y")]
        );
    }

    #[test]
    fn try_create_new_is_exclusive() {
        let fs = MemoryFilesystem::new();
        assert!(fs.try_create_new(Path::new("/p/.nexora.lock"), "t").unwrap());
        assert!(!fs.try_create_new(Path::new("/p/.nexora.lock"), "u").unwrap());
    }
}
