// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (carried through reports and outcomes)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Unknown feature '{key}'")]
    UnknownFeature { key: String, valid: Vec<&'static str> },

    #[error("Invalid value '{value}' for {field} (expected one of: {expected})")]
    InvalidValue {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Duplicate path in project structure: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    // ========================================================================
    // Template Errors
    // ========================================================================
    #[error("Template syntax error at line {line}: {reason}")]
    TemplateSyntax { line: usize, reason: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Feature '{feature}' requires '{requires}' to be enabled")]
    FeatureRequires {
        feature: &'static str,
        requires: &'static str,
    },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownFeature { valid, .. } => vec![
                format!("Valid features: {}", valid.join(", ")),
                "Example: nexora-rn add drawer".into(),
            ],
            Self::InvalidValue { field, expected, .. } => {
                vec![format!("Accepted values for {field}: {expected}")]
            }
            Self::InvalidProjectName { .. } => vec![
                "Use letters, digits, '-' and '_' only".into(),
                "Start with a letter".into(),
                "Examples: MyApp, shop-app, demo_2".into(),
            ],
            Self::TemplateSyntax { .. } => vec![
                "Check for an unbalanced '{{' in the template".into(),
                "Object literals in props must close with '}}'".into(),
            ],
            Self::FeatureRequires { requires, .. } => {
                vec![format!("Enable it first: nexora-rn add {requires}")]
            }
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownFeature { .. } => ErrorCategory::NotFound,
            Self::InvalidValue { .. }
            | Self::InvalidProjectName { .. }
            | Self::FeatureRequires { .. } => ErrorCategory::Validation,
            Self::TemplateSyntax { .. } => ErrorCategory::Template,
            Self::DuplicatePath { .. } | Self::AbsolutePathNotAllowed { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Template,
    Internal,
}
