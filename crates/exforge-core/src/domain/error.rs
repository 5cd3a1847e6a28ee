// ============================================================================
// domain/error.rs - VALIDATION ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (errors are reported, never retried)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Input Validation Errors
    // ========================================================================
    #[error("Project name cannot be empty")]
    EmptyProjectName,

    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Invalid {field} '{value}': expected a port number between 1 and 65535")]
    InvalidPort { field: &'static str, value: String },

    #[error("Value for {field} cannot be written to the environment file: {reason}")]
    UnencodableValue { field: &'static str, reason: String },

    // ========================================================================
    // Plan Invariant Violations
    // ========================================================================
    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Invalid generation plan: {0}")]
    InvalidPlan(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EmptyProjectName => vec![
                "Pass a project name as the first argument".into(),
                "Example: exforge my-api".into(),
            ],
            Self::InvalidProjectName { name, reason } => vec![
                format!("Project name '{}' is invalid: {}", name, reason),
                "Use ASCII letters, digits, '-', '_' and '.'".into(),
                "Start with a letter or number".into(),
                "Examples: my-api, users_service, api2".into(),
            ],
            Self::InvalidPort { field, .. } => vec![
                format!("Enter a number between 1 and 65535 for the {}", field),
                "Leave the answer blank to use the default".into(),
            ],
            Self::UnencodableValue { field, .. } => vec![
                format!("Remove control characters from the {}", field),
                "A value may use at most two of the quote characters ' \" `".into(),
                "A value with both ' and ` may not contain \\n or \\r".into(),
            ],
            Self::AbsolutePathNotAllowed { .. } | Self::InvalidPlan(_) => vec![
                "This is a bug in exforge, please report it".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyProjectName
            | Self::InvalidProjectName { .. }
            | Self::InvalidPort { .. }
            | Self::UnencodableValue { .. } => ErrorCategory::Validation,
            Self::AbsolutePathNotAllowed { .. } | Self::InvalidPlan(_) => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
