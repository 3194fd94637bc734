//! Unified error handling for Nexora Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Nexora Core operations.
///
/// This enum wraps all possible errors that can occur when using nexora-core,
/// providing a unified interface for error handling.
#[derive(Debug, Error, Clone)]
pub enum NexoraError {
    /// Errors from the domain layer (feature-model violations).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl NexoraError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in Nexora".into(),
                "Please report this issue at: https://github.com/nexora/nexora-rn/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Template => ErrorCategory::Template,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Whether a later attempt might succeed without user changes.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Application(
                ApplicationError::StoreLockError | ApplicationError::ProjectLocked { .. }
            )
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Template,
    Dependency,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type NexoraResult<T> = Result<T, NexoraError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> NexoraResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> NexoraResult<T> {
        self.map_err(|e| NexoraError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn wraps_domain_errors_transparently() {
        let err: NexoraError = DomainError::UnknownFeature {
            key: "graphql".into(),
            valid: vec!["api", "auth"],
        }
        .into();
        assert_eq!(err.to_string(), "Unknown feature 'graphql'");
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.suggestions()[0].contains("api, auth"));
    }

    #[test]
    fn lock_contention_is_retryable() {
        let err: NexoraError = ApplicationError::ProjectLocked {
            path: PathBuf::from("/tmp/app/.nexora.lock"),
        }
        .into();
        assert!(err.is_retryable());
        assert!(!NexoraError::Internal { message: "x".into() }.is_retryable());
    }

    #[test]
    fn context_wraps_foreign_errors() {
        let parsed: Result<u8, _> = "x".parse::<u8>();
        let err = parsed.context("parsing port").unwrap_err();
        assert!(err.to_string().starts_with("Internal error: parsing port:"));
    }
}
