//! Infrastructure adapters for exforge.
//!
//! This crate implements the ports defined in `exforge_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod catalog;
pub mod filesystem;
pub mod process;
pub mod secrets;

// Re-export commonly used adapters
pub use catalog::ExpressTypeormCatalog;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::{ProcessRunner, RecordingRunner};
pub use secrets::{FixedSecretSource, RandomSecretSource, SeededSecretSource};
