//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `exforge-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{CommandLine, ConfigurationRecord, FileContent, RelativePath, TemplateDescriptor};
use crate::error::ExforgeResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `exforge_adapters::filesystem::LocalFilesystem` (production)
/// - `exforge_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - `create_dir` is deliberately non-recursive: plans create parents first
/// - Paths are whatever the plan holds; the port never resolves them against
///   the process working directory
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create exactly one directory. Fails if the path already exists.
    fn create_dir(&self, path: &Path) -> ExforgeResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> ExforgeResult<()>;

    /// Read a file; `Ok(None)` if nothing exists at the path.
    fn read_file(&self, path: &Path) -> ExforgeResult<Option<String>>;

    /// Check if path exists, whatever its type.
    fn exists(&self, path: &Path) -> bool;
}

/// Exit status of a finished external command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl CommandStatus {
    pub const SUCCESS: Self = Self { code: Some(0) };

    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Port for running external programs.
///
/// Implemented by:
/// - `exforge_adapters::process::ProcessRunner` (blocking, inherited stdio)
/// - `exforge_adapters::process::RecordingRunner` (testing)
///
/// A runner blocks until the command exits. Spawn failures are errors; a
/// non-zero exit is a status, judged by the caller.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    fn run(&self, command: &CommandLine) -> ExforgeResult<CommandStatus>;
}

/// Packages installed into a generated project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    pub runtime: Vec<String>,
    pub development: Vec<String>,
}

/// Port for the set of files a generated project consists of.
///
/// Implemented by:
/// - `exforge_adapters::catalog::ExpressTypeormCatalog` (built-in)
pub trait TemplateCatalog: Send + Sync {
    /// Descriptors rendered from the configuration, in write order.
    fn templates_for(&self, config: &ConfigurationRecord) -> Vec<TemplateDescriptor>;

    /// Files whose content does not depend on the configuration.
    fn supporting_files(&self) -> Vec<(RelativePath, FileContent)> {
        Vec::new()
    }

    /// Directories that must exist even when no file is written into them.
    fn layout_directories(&self) -> Vec<RelativePath> {
        Vec::new()
    }

    /// Packages the generated code requires.
    fn dependencies(&self) -> DependencySet;
}
