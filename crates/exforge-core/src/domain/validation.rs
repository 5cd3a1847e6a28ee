use crate::domain::{
    entities::{GenerationPlan, TemplateDescriptor},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across callers.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_plan(plan: &GenerationPlan) -> Result<(), DomainError> {
        plan.validate()
    }

    /// Catalog outputs must be unique relative paths.
    pub fn validate_descriptors(descriptors: &[TemplateDescriptor]) -> Result<(), DomainError> {
        let mut seen = std::collections::HashSet::new();
        for descriptor in descriptors {
            let path = descriptor.path();
            if path.as_path().is_absolute() {
                return Err(DomainError::AbsolutePathNotAllowed {
                    path: path.to_string(),
                });
            }
            if !seen.insert(path) {
                return Err(DomainError::InvalidPlan(format!(
                    "template path {path} is produced twice"
                )));
            }
        }
        Ok(())
    }
}
