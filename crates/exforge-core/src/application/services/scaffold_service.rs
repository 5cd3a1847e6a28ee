//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the entire scaffolding workflow:
//! 1. Refuse an existing root (collision guard)
//! 2. Plan the project from the resolved configuration
//! 3. Execute the plan against the filesystem and package manager
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use std::path::Path;
use tracing::{info, instrument};

use crate::{
    application::{
        ports::{CommandRunner, Filesystem, TemplateCatalog},
        services::{
            CollisionGuard, ExecutionReport, PlanExecutor, ScaffoldPlanner, StepObserver,
        },
    },
    domain::{ConfigurationRecord, GenerationPlan, PackageManager},
    error::ExforgeResult,
};

/// Main scaffolding service.
pub struct ScaffoldService {
    catalog: Box<dyn TemplateCatalog>,
    filesystem: Box<dyn Filesystem>,
    runner: Box<dyn CommandRunner>,
    package_manager: PackageManager,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use exforge_core::application::ScaffoldService;
    /// use exforge_core::domain::PackageManager;
    ///
    /// let service = ScaffoldService::new(
    ///     catalog,    // impl TemplateCatalog
    ///     filesystem, // impl Filesystem
    ///     runner,     // impl CommandRunner
    /// )
    /// .with_package_manager(PackageManager::new("npm"));
    /// ```
    pub fn new(
        catalog: Box<dyn TemplateCatalog>,
        filesystem: Box<dyn Filesystem>,
        runner: Box<dyn CommandRunner>,
    ) -> Self {
        Self {
            catalog,
            filesystem,
            runner,
            package_manager: PackageManager::default(),
        }
    }

    pub fn with_package_manager(mut self, package_manager: PackageManager) -> Self {
        self.package_manager = package_manager;
        self
    }

    /// Scaffold a new project at `root`.
    ///
    /// Nothing is touched when `root` already exists. On an execution
    /// failure, steps that completed stay on disk.
    pub fn scaffold(
        &self,
        config: &ConfigurationRecord,
        root: &Path,
    ) -> ExforgeResult<ExecutionReport> {
        self.run(config, root, None)
    }

    /// Like [`scaffold`](Self::scaffold), reporting each step to `observer`
    /// before it runs.
    pub fn scaffold_observed(
        &self,
        config: &ConfigurationRecord,
        root: &Path,
        observer: &mut dyn StepObserver,
    ) -> ExforgeResult<ExecutionReport> {
        self.run(config, root, Some(observer))
    }

    /// Build the plan for `root` without executing it.
    ///
    /// The collision check still runs, so a preview of an existing root
    /// fails the same way a real run would.
    #[instrument(skip_all, fields(project = %config.project_name(), root = %root.display()))]
    pub fn preview(&self, config: &ConfigurationRecord, root: &Path) -> ExforgeResult<GenerationPlan> {
        CollisionGuard::new(self.filesystem.as_ref()).check(root)?;
        self.planner().plan(config, root)
    }

    #[instrument(skip_all, fields(project = %config.project_name(), root = %root.display()))]
    fn run(
        &self,
        config: &ConfigurationRecord,
        root: &Path,
        observer: Option<&mut dyn StepObserver>,
    ) -> ExforgeResult<ExecutionReport> {
        info!("Scaffolding project");

        // 1. Guard before any side effect
        CollisionGuard::new(self.filesystem.as_ref()).check(root)?;

        // 2. Plan
        let plan = self.planner().plan(config, root)?;
        info!(steps = plan.len(), "Plan ready");

        // 3. Execute
        let mut executor = PlanExecutor::new(self.filesystem.as_ref(), self.runner.as_ref());
        if let Some(observer) = observer {
            executor = executor.with_observer(observer);
        }
        let report = executor.execute(&plan)?;

        info!("Scaffold completed successfully");
        Ok(report)
    }

    fn planner(&self) -> ScaffoldPlanner<'_> {
        ScaffoldPlanner::new(self.catalog.as_ref(), self.package_manager.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        CommandStatus, DependencySet, MockCommandRunner, MockFilesystem,
    };
    use crate::domain::{
        ConfigResolver, FileContent, RawAnswers, Step, TemplateDescriptor,
    };

    struct OneFile;

    fn readme(cfg: &ConfigurationRecord) -> FileContent {
        FileContent::text(format!("# {}\n", cfg.project_name()))
    }

    impl TemplateCatalog for OneFile {
        fn templates_for(&self, _: &ConfigurationRecord) -> Vec<TemplateDescriptor> {
            vec![TemplateDescriptor::new("src/README.md", readme)]
        }

        fn dependencies(&self) -> DependencySet {
            DependencySet {
                runtime: vec!["express".into()],
                development: Vec::new(),
            }
        }
    }

    fn record() -> ConfigurationRecord {
        ConfigResolver::new(Box::new(|| "s3cret".to_string()))
            .resolve(&RawAnswers::default(), "demo-api")
            .unwrap()
    }

    fn service(fs: MockFilesystem, runner: MockCommandRunner) -> ScaffoldService {
        ScaffoldService::new(Box::new(OneFile), Box::new(fs), Box::new(runner))
    }

    #[test]
    fn collision_touches_nothing() {
        let mut fs = MockFilesystem::new();
        let mut runner = MockCommandRunner::new();
        fs.expect_exists().times(1).return_const(true);
        fs.expect_create_dir().never();
        fs.expect_write_file().never();
        fs.expect_read_file().never();
        runner.expect_run().never();

        let err = service(fs, runner)
            .scaffold(&record(), Path::new("demo-api"))
            .unwrap_err();
        assert!(err.is_collision());
    }

    #[test]
    fn scaffold_runs_guard_plan_and_executor() {
        let mut fs = MockFilesystem::new();
        let mut runner = MockCommandRunner::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir().times(2).returning(|_| Ok(()));
        fs.expect_write_file()
            .withf(|p, c| p == Path::new("demo-api/src/README.md") && c == "# demo-api\n")
            .times(1)
            .returning(|_, _| Ok(()));
        runner
            .expect_run()
            .times(2)
            .returning(|_| Ok(CommandStatus::SUCCESS));

        let report = service(fs, runner)
            .scaffold(&record(), Path::new("demo-api"))
            .unwrap();
        assert_eq!(report.directories_created, 2);
        assert_eq!(report.commands_run, 2);
        assert_eq!(report.files_written, 1);
    }

    #[test]
    fn preview_executes_nothing() {
        let mut fs = MockFilesystem::new();
        let mut runner = MockCommandRunner::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir().never();
        fs.expect_write_file().never();
        runner.expect_run().never();

        let plan = service(fs, runner)
            .with_package_manager(PackageManager::new("yarn"))
            .preview(&record(), Path::new("demo-api"))
            .unwrap();

        assert!(matches!(plan.steps()[0], Step::CreateDirectory(_)));
        assert!(plan.commands().all(|c| c.program == "yarn"));
    }

    #[test]
    fn observer_is_forwarded() {
        let mut fs = MockFilesystem::new();
        let mut runner = MockCommandRunner::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir().returning(|_| Ok(()));
        fs.expect_write_file().returning(|_, _| Ok(()));
        runner.expect_run().returning(|_| Ok(CommandStatus::SUCCESS));

        let mut count = 0;
        let mut observer = |_: usize, _: usize, _: &Step| count += 1;
        let report = service(fs, runner)
            .scaffold_observed(&record(), Path::new("demo-api"), &mut observer)
            .unwrap();

        assert_eq!(count, report.total());
    }
}
