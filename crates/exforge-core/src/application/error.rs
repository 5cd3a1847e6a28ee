//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not input
//! validation. Validation errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while guarding, planning or executing a scaffold.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Target root already exists; nothing was touched.
    #[error("Project already exists at {path}")]
    AlreadyExists { path: PathBuf },

    /// A plan step failed; earlier steps remain applied.
    #[error("Step {number} ({step}) failed: {reason}")]
    StepFailed {
        /// Zero-based position of the step in the plan.
        index: usize,
        /// One-based position, for humans.
        number: usize,
        step: String,
        reason: String,
    },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// External command could not be started.
    #[error("Could not start `{command}`: {reason}")]
    CommandSpawn { command: String, reason: String },

    /// External command exited unsuccessfully.
    #[error("`{command}` exited with {}", describe_code(.code))]
    CommandFailed { command: String, code: Option<i32> },

    /// Shared adapter state was poisoned by a panicking thread.
    #[error("Adapter state lock poisoned")]
    LockPoisoned,
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".into(),
    }
}

impl ApplicationError {
    /// Wrap a lower-level failure as the failure of plan step `index`.
    pub fn step_failed(index: usize, step: impl ToString, cause: impl ToString) -> Self {
        Self::StepFailed {
            index,
            number: index + 1,
            step: step.to_string(),
            reason: cause.to_string(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::AlreadyExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name".into(),
                format!("Or remove the existing directory: rm -rf {}", path.display()),
            ],
            Self::StepFailed { step, .. } => vec![
                format!("The failing step was: {}", step),
                "Files created before the failure were left in place".into(),
                "Delete the partially created project directory before retrying".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::CommandSpawn { command, .. } => vec![
                format!("Ensure `{}` is installed and in your PATH", command),
                "Or point --package-manager at another program".into(),
            ],
            Self::CommandFailed { .. } => vec![
                "Check the command output above for details".into(),
            ],
            Self::LockPoisoned => vec!["This is a bug in exforge, please report it".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::AlreadyExists { .. } => ErrorCategory::Conflict,
            Self::StepFailed { .. }
            | Self::FilesystemError { .. }
            | Self::CommandSpawn { .. }
            | Self::CommandFailed { .. } => ErrorCategory::Execution,
            Self::LockPoisoned => ErrorCategory::Internal,
        }
    }
}
