// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for exforge.
//!
//! This module contains pure logic with no I/O. Filesystem access and
//! process spawning are handled via ports (traits) defined in the
//! application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or process calls
//! - **Injected randomness**: secrets come from a [`SecretSource`]
//! - **Immutable records**: a resolved configuration is never mutated
//!
// Public API - what the world sees
pub mod encoding;
pub mod entities;
pub mod error;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    common::RelativePath,
    configuration::{
        ConfigResolver, ConfigurationRecord, DEFAULT_API_PORT, DEFAULT_DB_HOST, DEFAULT_DB_PORT,
        DEFAULT_DB_USER, DEFAULT_JWT_EXPIRES_IN, DEFAULT_PROJECT_NAME, ProjectName, RawAnswers,
        SecretSource,
    },
    package_manager::PackageManager,
    plan::{CommandLine, GenerationPlan, Step},
    template::{EnvKey, FileContent, RenderFn, TemplateDescriptor},
};

pub use error::{DomainError, ErrorCategory};

pub use validation::DomainValidator;
