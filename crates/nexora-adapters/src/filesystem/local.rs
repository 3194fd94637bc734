//! Local filesystem adapter using std::fs.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use nexora_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{NexoraError, NexoraResult},
};
use walkdir::WalkDir;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> NexoraResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> NexoraResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_to_string(&self, path: &Path) -> NexoraResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_dir_all(&self, path: &Path) -> NexoraResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }

    fn remove_file(&self, path: &Path) -> NexoraResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> NexoraResult<()> {
        if let Some(parent) = to.parent() {
            self.create_dir_all(parent)?;
        }
        std::fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| map_io_error(from, e, "copy file"))
    }

    fn list_files(&self, root: &Path, exclude: &[PathBuf]) -> NexoraResult<Vec<PathBuf>> {
        let excluded = |path: &Path| {
            path.strip_prefix(root)
                .is_ok_and(|rel| exclude.iter().any(|ex| rel.starts_with(ex)))
        };

        let mut files = Vec::new();
        for entry in WalkDir::new(root)
            .into_iter()
            .filter_entry(|e| !excluded(e.path()))
        {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                map_io_error(&path, e.into(), "walk directory")
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(root) {
                files.push(relative.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }

    fn try_create_new(&self, path: &Path, content: &str) -> NexoraResult<bool> {
        let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(map_io_error(path, e, "create file")),
        };
        file.write_all(content.as_bytes())
            .map_err(|e| map_io_error(path, e, "write file"))?;
        Ok(true)
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> NexoraError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn list_files_prunes_by_component() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let fs = LocalFilesystem::new();
        for file in [
            ".gitignore",
            ".git/HEAD",
            "node_modules/react/index.js",
            "android/app/build/out.apk",
            "android/app/src/Main.java",
            "src/App.tsx",
        ] {
            let path = root.join(file);
            fs.create_dir_all(path.parent().unwrap()).unwrap();
            fs.write_file(&path, "x").unwrap();
        }

        let exclude: Vec<PathBuf> = [".git", "node_modules", "android/app/build"]
            .iter()
            .map(PathBuf::from)
            .collect();
        let files = fs.list_files(root, &exclude).unwrap();
        assert_eq!(
            files,
            vec![
                PathBuf::from(".gitignore"),
                PathBuf::from("android/app/src/Main.java"),
                PathBuf::from("src/App.tsx"),
            ]
        );
    }

    #[test]
    fn try_create_new_refuses_existing_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".nexora.lock");
        let fs = LocalFilesystem::new();

        assert!(fs.try_create_new(&path, "a").unwrap());
        assert!(!fs.try_create_new(&path, "b").unwrap());
        assert_eq!(fs.read_to_string(&path).unwrap(), "a");
    }

    #[test]
    fn copy_creates_parents() {
        let dir = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let from = dir.path().join("a.txt");
        fs.write_file(&from, "hello").unwrap();

        let to = dir.path().join("deep/nested/a.txt");
        fs.copy_file(&from, &to).unwrap();
        assert_eq!(fs.read_to_string(&to).unwrap(), "hello");
    }

    #[test]
    fn read_errors_carry_the_path() {
        let err = LocalFilesystem::new()
            .read_to_string(Path::new("/definitely/not/here.txt"))
            .unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }
}
