//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `exforge-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: Directory and file operations
//!   - `CommandRunner`: Blocking external process execution
//!   - `TemplateCatalog`: The files a generated project consists of
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{CommandRunner, CommandStatus, DependencySet, Filesystem, TemplateCatalog};

#[cfg(test)]
pub use output::{MockCommandRunner, MockFilesystem};
