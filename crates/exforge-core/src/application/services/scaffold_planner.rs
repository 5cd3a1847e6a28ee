//! Scaffold planner - turns a configuration into an ordered [`GenerationPlan`].
//!
//! The planner performs no I/O. Its output order is the execution order:
//!
//! 1. the root, then every directory the project needs (parents first)
//! 2. manifest bootstrap through the package manager
//! 3. manifest updates (merged into the bootstrapped manifest)
//! 4. runtime, then development dependency installs
//! 5. supporting files, then the remaining source files

use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, instrument};

use crate::{
    application::ports::TemplateCatalog,
    domain::{
        ConfigurationRecord, DomainValidator as validator, GenerationPlan, PackageManager,
        RelativePath, Step,
    },
    error::ExforgeResult,
};

/// Builds generation plans from a template catalog.
pub struct ScaffoldPlanner<'a> {
    catalog: &'a dyn TemplateCatalog,
    package_manager: PackageManager,
}

impl<'a> ScaffoldPlanner<'a> {
    pub fn new(catalog: &'a dyn TemplateCatalog, package_manager: PackageManager) -> Self {
        Self {
            catalog,
            package_manager,
        }
    }

    /// Plan the project rooted at `root`.
    ///
    /// The returned plan has already passed [`GenerationPlan::validate`].
    #[instrument(skip_all, fields(project = %config.project_name(), root = %root.display()))]
    pub fn plan(&self, config: &ConfigurationRecord, root: &Path) -> ExforgeResult<GenerationPlan> {
        let descriptors = self.catalog.templates_for(config);
        validator::validate_descriptors(&descriptors)?;

        let rendered: Vec<(RelativePath, _)> = descriptors
            .iter()
            .map(|d| (d.path().clone(), d.render(config)))
            .collect();
        let supporting = self.catalog.supporting_files();

        let mut plan = GenerationPlan::new(root);
        plan.push(Step::CreateDirectory(root.to_path_buf()));

        let file_paths = rendered.iter().chain(supporting.iter()).map(|(p, _)| p);
        for dir in required_directories(file_paths, self.catalog.layout_directories()) {
            plan.push(Step::CreateDirectory(root.join(dir)));
        }

        plan.push(Step::RunCommand(self.package_manager.bootstrap(root)));

        let (merges, texts): (Vec<_>, Vec<_>) =
            rendered.into_iter().partition(|(_, content)| content.is_merge());

        for (path, content) in merges {
            plan.push(Step::write(root.join(path), content));
        }

        let deps = self.catalog.dependencies();
        if !deps.runtime.is_empty() {
            plan.push(Step::RunCommand(
                self.package_manager.install(&deps.runtime, root),
            ));
        }
        if !deps.development.is_empty() {
            plan.push(Step::RunCommand(
                self.package_manager.install_dev(&deps.development, root),
            ));
        }

        for (path, content) in supporting.into_iter().chain(texts) {
            plan.push(Step::write(root.join(path), content));
        }

        validator::validate_plan(&plan)?;
        debug!(steps = plan.len(), "Plan built");
        Ok(plan)
    }
}

/// Every directory below the root that must exist, shallowest first and
/// lexicographic within a depth.
fn required_directories<'p>(
    files: impl Iterator<Item = &'p RelativePath>,
    layout: Vec<RelativePath>,
) -> Vec<RelativePath> {
    let mut dirs: BTreeSet<RelativePath> = BTreeSet::new();
    for path in files {
        dirs.extend(path.ancestors());
    }
    for dir in layout {
        dirs.extend(dir.ancestors());
        dirs.insert(dir);
    }

    let mut dirs: Vec<_> = dirs.into_iter().collect();
    dirs.sort_by(|a, b| a.depth().cmp(&b.depth()).then_with(|| a.cmp(b)));
    dirs
}
