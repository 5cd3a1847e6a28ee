//! Unified error handling for exforge core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for exforge core operations.
///
/// The three failure classes of a scaffold map onto it as follows:
/// - validation: `Domain(..)` with a validation category
/// - collision: `Application(AlreadyExists { .. })`
/// - execution: `Application(StepFailed { .. })`
#[derive(Debug, Error, Clone)]
pub enum ExforgeError {
    /// Errors from the domain layer (invalid input, broken invariants).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (collision, execution failures).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl ExforgeError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec!["This appears to be a bug in exforge".into()],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// The target root already existed.
    pub fn is_collision(&self) -> bool {
        matches!(
            self,
            Self::Application(ApplicationError::AlreadyExists { .. })
        )
    }

    /// Index of the plan step that failed, if this is an execution failure.
    pub fn failed_step(&self) -> Option<usize> {
        match self {
            Self::Application(ApplicationError::StepFailed { index, .. }) => Some(*index),
            _ => None,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    Execution,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type ExforgeResult<T> = Result<T, ExforgeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn collision_is_detected() {
        let err: ExforgeError = ApplicationError::AlreadyExists {
            path: PathBuf::from("x"),
        }
        .into();
        assert!(err.is_collision());
        assert_eq!(err.category(), ErrorCategory::Conflict);
        assert_eq!(err.failed_step(), None);
    }

    #[test]
    fn failed_step_is_exposed() {
        let err: ExforgeError = ApplicationError::step_failed(3, "run", "exit 1").into();
        assert_eq!(err.failed_step(), Some(3));
        assert_eq!(err.category(), ErrorCategory::Execution);
    }

    #[test]
    fn validation_maps_through() {
        let err: ExforgeError = DomainError::EmptyProjectName.into();
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn configuration_and_internal_keep_their_category() {
        let config = ExforgeError::Configuration {
            message: "bad".into(),
        };
        assert_eq!(config.category(), ErrorCategory::Configuration);
        let internal = ExforgeError::Internal {
            message: "bug".into(),
        };
        assert_eq!(internal.category(), ErrorCategory::Internal);
        assert!(!internal.suggestions().is_empty());
    }
}
