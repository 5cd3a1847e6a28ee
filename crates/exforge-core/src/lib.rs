//! Exforge Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the exforge
//! backend generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           exforge-cli (CLI)             │
//! │   (prompts, config, output, exit code)  │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (CollisionGuard, ScaffoldPlanner,      │
//! │   PlanExecutor, ScaffoldService)        │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (Filesystem, CommandRunner, Catalog)    │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    exforge-adapters (Infrastructure)    │
//! │ (LocalFilesystem, ProcessRunner, etc)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (ConfigResolver, GenerationPlan, ...)   │
//! │        No External Dependencies         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::path::Path;
//! use exforge_core::domain::{ConfigResolver, RawAnswers};
//!
//! // 1. Resolve answers into one immutable record
//! let resolver = ConfigResolver::new(Box::new(|| "generated".to_string()));
//! let config = resolver.resolve(&RawAnswers::default(), "demo-api").unwrap();
//!
//! // 2. Use application service (with injected adapters)
//! let service = ScaffoldService::new(catalog, filesystem, runner);
//! service.scaffold(&config, Path::new("demo-api")).unwrap();
//! ```

// Domain layer (stable, well-defined API)
pub mod domain;

// Application layer (orchestration logic)
pub mod application;

// Error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CollisionGuard, ExecutionReport, ExecutionState, PlanExecutor, ScaffoldPlanner,
        ScaffoldService, StepObserver,
        ports::{CommandRunner, CommandStatus, DependencySet, Filesystem, TemplateCatalog},
    };
    pub use crate::domain::{
        CommandLine, ConfigResolver, ConfigurationRecord, EnvKey, FileContent, GenerationPlan,
        PackageManager, ProjectName, RawAnswers, RelativePath, SecretSource, Step,
        TemplateDescriptor,
    };
    pub use crate::error::{ExforgeError, ExforgeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
