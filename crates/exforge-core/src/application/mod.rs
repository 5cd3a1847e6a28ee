//! Application layer for exforge.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (guard, planner, executor, scaffold)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer. Input rules live in
//! `crate::domain`; ordering and failure policy live here.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    CollisionGuard, ExecutionReport, ExecutionState, PlanExecutor, ScaffoldPlanner,
    ScaffoldService, StepObserver,
};

// Re-export port traits (for adapter implementation)
pub use ports::{CommandRunner, CommandStatus, DependencySet, Filesystem, TemplateCatalog};

pub use error::ApplicationError;
