//! Plan executor - applies a [`GenerationPlan`] one step at a time.
//!
//! Execution is strictly sequential and stops at the first failure. Steps
//! that already completed are left in place; there is no rollback.

use std::fmt;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{CommandRunner, Filesystem},
    },
    domain::{CommandLine, FileContent, GenerationPlan, Step},
    error::{ExforgeError, ExforgeResult},
};

/// Where an execution currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExecutionState {
    #[default]
    Pending,
    /// Step at this index is being applied.
    Running(usize),
    Succeeded,
    /// Step at `index` failed; steps before it were applied.
    Failed { index: usize, cause: String },
}

impl ExecutionState {
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed { .. })
    }
}

impl fmt::Display for ExecutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("pending"),
            Self::Running(i) => write!(f, "running step {}", i + 1),
            Self::Succeeded => f.write_str("succeeded"),
            Self::Failed { index, .. } => write!(f, "failed at step {}", index + 1),
        }
    }
}

/// What a successful execution did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecutionReport {
    pub directories_created: usize,
    pub files_written: usize,
    pub commands_run: usize,
}

impl ExecutionReport {
    pub fn total(&self) -> usize {
        self.directories_created + self.files_written + self.commands_run
    }

    fn record(&mut self, step: &Step) {
        match step {
            Step::CreateDirectory(_) => self.directories_created += 1,
            Step::WriteFile { .. } => self.files_written += 1,
            Step::RunCommand(_) => self.commands_run += 1,
        }
    }
}

/// Receives each step right before it is applied.
pub trait StepObserver {
    fn before_step(&mut self, index: usize, total: usize, step: &Step);
}

impl<F> StepObserver for F
where
    F: FnMut(usize, usize, &Step),
{
    fn before_step(&mut self, index: usize, total: usize, step: &Step) {
        self(index, total, step)
    }
}

/// Applies plans through the filesystem and command-runner ports.
pub struct PlanExecutor<'a> {
    filesystem: &'a dyn Filesystem,
    runner: &'a dyn CommandRunner,
    observer: Option<&'a mut dyn StepObserver>,
    state: ExecutionState,
}

impl<'a> PlanExecutor<'a> {
    pub fn new(filesystem: &'a dyn Filesystem, runner: &'a dyn CommandRunner) -> Self {
        Self {
            filesystem,
            runner,
            observer: None,
            state: ExecutionState::Pending,
        }
    }

    pub fn with_observer(mut self, observer: &'a mut dyn StepObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn state(&self) -> &ExecutionState {
        &self.state
    }

    /// Apply every step of `plan` in order.
    ///
    /// The first failing step ends execution with
    /// [`ApplicationError::StepFailed`] carrying its index.
    #[instrument(skip_all, fields(root = %plan.root().display(), steps = plan.len()))]
    pub fn execute(&mut self, plan: &GenerationPlan) -> ExforgeResult<ExecutionReport> {
        let total = plan.len();
        let mut report = ExecutionReport::default();

        for (index, step) in plan.steps().iter().enumerate() {
            self.transition(ExecutionState::Running(index));
            if let Some(observer) = self.observer.as_deref_mut() {
                observer.before_step(index, total, step);
            }

            if let Err(cause) = self.apply(step) {
                warn!(index, step = %step, error = %cause, "Step failed");
                self.transition(ExecutionState::Failed {
                    index,
                    cause: cause.to_string(),
                });
                return Err(ApplicationError::step_failed(index, step, cause).into());
            }
            report.record(step);
        }

        self.transition(ExecutionState::Succeeded);
        info!(
            directories = report.directories_created,
            files = report.files_written,
            commands = report.commands_run,
            "Plan executed"
        );
        Ok(report)
    }

    fn transition(&mut self, next: ExecutionState) {
        debug!(from = %self.state, to = %next, "Execution state");
        self.state = next;
    }

    fn apply(&self, step: &Step) -> ExforgeResult<()> {
        match step {
            Step::CreateDirectory(path) => self.filesystem.create_dir(path),
            Step::WriteFile { path, content } => {
                let text = match content {
                    FileContent::Text(text) => text.clone(),
                    merge @ FileContent::JsonMerge(_) => {
                        let existing = self.filesystem.read_file(path)?;
                        merge.materialize(existing.as_deref()).map_err(|e| {
                            ApplicationError::FilesystemError {
                                path: path.clone(),
                                reason: format!("cannot merge into existing JSON: {e}"),
                            }
                        })?
                    }
                };
                self.filesystem.write_file(path, &text)
            }
            Step::RunCommand(command) => self.run(command),
        }
    }

    fn run(&self, command: &CommandLine) -> ExforgeResult<()> {
        let status = self.runner.run(command)?;
        if status.success() {
            Ok(())
        } else {
            Err(ExforgeError::from(ApplicationError::CommandFailed {
                command: command.to_string(),
                code: status.code,
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{CommandStatus, MockCommandRunner, MockFilesystem};
    use serde_json::json;
    use std::path::Path;

    fn merge_content() -> FileContent {
        let mut map = serde_json::Map::new();
        map.insert("name".into(), json!("demo-api"));
        FileContent::JsonMerge(map)
    }

    fn sample_plan() -> GenerationPlan {
        GenerationPlan::new("demo")
            .with_step(Step::CreateDirectory("demo".into()))
            .with_step(Step::RunCommand(CommandLine::new("npm", ["init", "-y"], "demo")))
            .with_step(Step::write("demo/package.json", merge_content()))
            .with_step(Step::RunCommand(CommandLine::new("npm", ["i", "pg"], "demo")))
            .with_step(Step::write("demo/.env", FileContent::text("PORT=3000\n")))
    }

    #[test]
    fn executes_every_step_in_order() {
        let mut fs = MockFilesystem::new();
        let mut runner = MockCommandRunner::new();
        let mut seq = mockall::Sequence::new();

        fs.expect_create_dir()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        runner
            .expect_run()
            .withf(|c| c.args == ["init", "-y"])
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(CommandStatus::SUCCESS));
        fs.expect_read_file()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Some("{\"version\":\"1.0.0\"}".into())));
        fs.expect_write_file()
            .withf(|p, c| p == Path::new("demo/package.json") && c.contains("\"version\""))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        runner
            .expect_run()
            .withf(|c| c.args == ["i", "pg"])
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(CommandStatus::SUCCESS));
        fs.expect_write_file()
            .withf(|p, c| p == Path::new("demo/.env") && c == "PORT=3000\n")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let mut executor = PlanExecutor::new(&fs, &runner);
        let report = executor.execute(&sample_plan()).unwrap();

        assert_eq!(
            report,
            ExecutionReport {
                directories_created: 1,
                files_written: 2,
                commands_run: 2,
            }
        );
        assert_eq!(executor.state(), &ExecutionState::Succeeded);
    }

    #[test]
    fn non_zero_exit_stops_execution() {
        let mut fs = MockFilesystem::new();
        let mut runner = MockCommandRunner::new();

        fs.expect_create_dir().returning(|_| Ok(()));
        fs.expect_read_file().returning(|_| Ok(None));
        fs.expect_write_file()
            .withf(|p, _| p == Path::new("demo/package.json"))
            .times(1)
            .returning(|_, _| Ok(()));
        runner
            .expect_run()
            .withf(|c| c.args[0] == "init")
            .returning(|_| Ok(CommandStatus::SUCCESS));
        runner
            .expect_run()
            .withf(|c| c.args[0] == "i")
            .times(1)
            .returning(|_| Ok(CommandStatus::from_code(1)));

        let mut executor = PlanExecutor::new(&fs, &runner);
        let err = executor.execute(&sample_plan()).unwrap_err();

        assert_eq!(err.failed_step(), Some(3));
        assert!(err.to_string().contains("npm i pg"));
        assert!(matches!(
            executor.state(),
            ExecutionState::Failed { index: 3, .. }
        ));
    }

    #[test]
    fn filesystem_error_is_wrapped_with_step_index() {
        let mut fs = MockFilesystem::new();
        let runner = MockCommandRunner::new();
        fs.expect_create_dir().returning(|p| {
            Err(ApplicationError::FilesystemError {
                path: p.to_path_buf(),
                reason: "exists".into(),
            }
            .into())
        });

        let err = PlanExecutor::new(&fs, &runner)
            .execute(&sample_plan())
            .unwrap_err();
        assert_eq!(err.failed_step(), Some(0));
    }

    #[test]
    fn spawn_failure_stops_execution() {
        let mut fs = MockFilesystem::new();
        let mut runner = MockCommandRunner::new();
        fs.expect_create_dir().returning(|_| Ok(()));
        fs.expect_write_file().never();
        runner.expect_run().returning(|c| {
            Err(ApplicationError::CommandSpawn {
                command: c.to_string(),
                reason: "not found".into(),
            }
            .into())
        });

        let err = PlanExecutor::new(&fs, &runner)
            .execute(&sample_plan())
            .unwrap_err();
        assert_eq!(err.failed_step(), Some(1));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn observer_sees_each_step_before_it_runs() {
        let mut fs = MockFilesystem::new();
        let mut runner = MockCommandRunner::new();
        fs.expect_create_dir().returning(|_| Ok(()));
        fs.expect_read_file().returning(|_| Ok(None));
        fs.expect_write_file().returning(|_, _| Ok(()));
        runner.expect_run().returning(|_| Ok(CommandStatus::SUCCESS));

        let mut seen: Vec<(usize, usize)> = Vec::new();
        let mut observer = |i: usize, total: usize, _: &Step| seen.push((i, total));

        PlanExecutor::new(&fs, &runner)
            .with_observer(&mut observer)
            .execute(&sample_plan())
            .unwrap();

        assert_eq!(seen, [(0, 5), (1, 5), (2, 5), (3, 5), (4, 5)]);
    }

    #[test]
    fn malformed_existing_manifest_fails_the_write() {
        let mut fs = MockFilesystem::new();
        let mut runner = MockCommandRunner::new();
        fs.expect_create_dir().returning(|_| Ok(()));
        fs.expect_read_file()
            .returning(|_| Ok(Some("not json".into())));
        fs.expect_write_file().never();
        runner.expect_run().returning(|_| Ok(CommandStatus::SUCCESS));

        let err = PlanExecutor::new(&fs, &runner)
            .execute(&sample_plan())
            .unwrap_err();
        assert_eq!(err.failed_step(), Some(2));
    }

    #[test]
    fn state_display_is_one_based() {
        assert_eq!(ExecutionState::Running(0).to_string(), "running step 1");
        assert!(!ExecutionState::Pending.is_finished());
        assert!(
            ExecutionState::Failed {
                index: 2,
                cause: "x".into()
            }
            .is_finished()
        );
    }
}
