//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The directory is not a project this tool generated.
    #[error("Not a Nexora React Native project: {path} ({reason})")]
    NotAManagedProject { path: PathBuf, reason: String },

    /// The project config exists but cannot be parsed.
    #[error("Corrupt project configuration at {path}: {reason}")]
    CorruptConfig { path: PathBuf, reason: String },

    /// Template rendering failed.
    #[error("Template rendering failed for {template}: {reason}")]
    RenderingFailed { template: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Package install or uninstall failed.
    ///
    /// `files_committed` records whether project files and config had already
    /// been written; they are not rolled back.
    #[error("Dependency {operation} failed: {reason}")]
    DependencySync {
        operation: &'static str,
        reason: String,
        files_committed: bool,
    },

    /// The native React Native bootstrap failed.
    #[error("Native project setup failed: {reason}")]
    NativeInit { reason: String },

    /// Another invocation holds the project lock.
    #[error("Project is locked by another nexora process ({path})")]
    ProjectLocked { path: PathBuf },

    /// Store access failed (lock poisoned, etc.).
    #[error("Shared state lock poisoned")]
    StoreLockError,

    /// Validation failed (application-level, not domain).
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Project already exists at target location.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NotAManagedProject { .. } => vec![
                "Run this command inside a project created with nexora-rn create".into(),
                "Or point at one with --path <dir>".into(),
            ],
            Self::CorruptConfig { path, .. } => vec![
                format!("Fix or restore {}", path.display()),
                "Backups from nexora-rn update live in .nexora-backups/".into(),
            ],
            Self::RenderingFailed { template, .. } => vec![
                format!("Check the template '{template}'"),
                "Remove overrides from templates.local_path to fall back to built-ins".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::DependencySync {
                files_committed, ..
            } => {
                let mut hints = vec![
                    "Check your network connection and npm registry access".into(),
                    "Re-run the install manually: npm install".into(),
                ];
                if *files_committed {
                    hints.insert(0, "Project files and config were already updated".into());
                }
                hints
            }
            Self::NativeInit { .. } => vec![
                "Check that Node.js and npx are on PATH".into(),
                "Or create the project without native folders: --skip-native".into(),
            ],
            Self::ProjectLocked { path } => vec![
                "Wait for the other nexora-rn command to finish".into(),
                format!("If no command is running, delete {}", path.display()),
            ],
            Self::StoreLockError => vec![
                "An internal lock was poisoned by an earlier panic".into(),
                "Try again".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Use --force to overwrite (destructive)".into(),
                "Choose a different project name".into(),
            ],
            Self::ValidationFailed(_) => vec!["Check the command arguments".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotAManagedProject { .. } => ErrorCategory::NotFound,
            Self::CorruptConfig { .. } => ErrorCategory::Configuration,
            Self::RenderingFailed { .. } => ErrorCategory::Template,
            Self::FilesystemError { .. } | Self::StoreLockError => ErrorCategory::Internal,
            Self::DependencySync { .. } | Self::NativeInit { .. } => ErrorCategory::Dependency,
            Self::ProjectLocked { .. } => ErrorCategory::Validation,
            Self::ValidationFailed(_) | Self::ProjectExists { .. } => ErrorCategory::Validation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dependency_failure_mentions_committed_files() {
        let committed = ApplicationError::DependencySync {
            operation: "install",
            reason: "exit status 1".into(),
            files_committed: true,
        };
        assert!(committed.suggestions()[0].contains("already updated"));

        let clean = ApplicationError::DependencySync {
            operation: "install",
            reason: "exit status 1".into(),
            files_committed: false,
        };
        assert!(!clean.suggestions()[0].contains("already updated"));
    }

    #[test]
    fn not_managed_is_not_found() {
        let err = ApplicationError::NotAManagedProject {
            path: PathBuf::from("/tmp/x"),
            reason: "missing .nexora-cli-config.json".into(),
        };
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.to_string().contains("/tmp/x"));
    }
}
