pub mod common;
pub mod configuration;
pub mod package_manager;
pub mod plan;
pub mod template;

pub use crate::domain::DomainError;
pub use configuration::{ConfigResolver, ConfigurationRecord, ProjectName, RawAnswers};
pub use package_manager::PackageManager;
pub use plan::{CommandLine, GenerationPlan, Step};
pub use template::{EnvKey, FileContent, TemplateDescriptor};
