//! Per-project exclusive lock for mutating commands.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    application::{ApplicationError, ports::Filesystem},
    error::NexoraResult,
};

/// Lock file name at the project root.
pub const LOCK_FILE: &str = ".nexora.lock";

/// Held for the duration of a mutating command; released on drop.
///
/// The lock file holds an owner token and the pid. On release the file is
/// only deleted if it still carries this holder's token.
pub struct ProjectLock<'a> {
    filesystem: &'a dyn Filesystem,
    path: PathBuf,
    token: Uuid,
}

impl<'a> ProjectLock<'a> {
    /// Take the lock or fail fast with `ProjectLocked`.
    pub fn acquire(filesystem: &'a dyn Filesystem, project_root: &Path) -> NexoraResult<Self> {
        let path = project_root.join(LOCK_FILE);
        let token = Uuid::new_v4();
        let content = format!("{token}\n{}\n", std::process::id());

        if !filesystem.try_create_new(&path, &content)? {
            return Err(ApplicationError::ProjectLocked { path }.into());
        }

        debug!(path = %path.display(), "Project lock acquired");
        Ok(Self {
            filesystem,
            path,
            token,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ProjectLock<'_> {
    fn drop(&mut self) {
        let owned = self
            .filesystem
            .read_to_string(&self.path)
            .map(|content| content.starts_with(&self.token.to_string()))
            .unwrap_or(false);

        if !owned {
            warn!(path = %self.path.display(), "Lock file changed while held; leaving it in place");
            return;
        }
        match self.filesystem.remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Project lock released"),
            Err(e) => warn!(error = %e, path = %self.path.display(), "Failed to release project lock"),
        }
    }
}

impl std::fmt::Debug for ProjectLock<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectLock")
            .field("path", &self.path)
            .field("token", &self.token)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;
    use crate::error::NexoraError;
    use std::sync::{Arc, Mutex};

    #[test]
    fn held_lock_fails_fast() {
        let mut fs = MockFilesystem::new();
        fs.expect_try_create_new().returning(|_, _| Ok(false));

        let err = ProjectLock::acquire(&fs, Path::new("/work/app")).unwrap_err();
        match err {
            NexoraError::Application(ApplicationError::ProjectLocked { path }) => {
                assert_eq!(path, Path::new("/work/app/.nexora.lock"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn release_removes_own_lock_only() {
        let written = Arc::new(Mutex::new(String::new()));
        let mut fs = MockFilesystem::new();
        let sink = Arc::clone(&written);
        fs.expect_try_create_new().returning(move |_, content| {
            *sink.lock().unwrap() = content.to_string();
            Ok(true)
        });
        let source = Arc::clone(&written);
        fs.expect_read_to_string()
            .returning(move |_| Ok(source.lock().unwrap().clone()));
        fs.expect_remove_file().times(1).returning(|_| Ok(()));

        let lock = ProjectLock::acquire(&fs, Path::new("/work/app")).unwrap();
        assert!(lock.path().ends_with(LOCK_FILE));
        drop(lock);
    }

    #[test]
    fn foreign_lock_is_left_alone() {
        let mut fs = MockFilesystem::new();
        fs.expect_try_create_new().returning(|_, _| Ok(true));
        fs.expect_read_to_string()
            .returning(|_| Ok("someone-else\n1\n".to_string()));
        fs.expect_remove_file().never();

        let lock = ProjectLock::acquire(&fs, Path::new("/work/app")).unwrap();
        drop(lock);
    }
}
