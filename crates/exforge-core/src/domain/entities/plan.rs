use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use super::template::FileContent;
use crate::domain::error::DomainError;

/// An external program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
    /// Working directory the command runs in.
    pub cwd: PathBuf,
}

impl CommandLine {
    pub fn new<I, S>(program: impl Into<String>, args: I, cwd: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: cwd.into(),
        }
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// One unit of work in a [`GenerationPlan`].
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Create exactly this directory. Fails if it already exists.
    CreateDirectory(PathBuf),
    WriteFile { path: PathBuf, content: FileContent },
    RunCommand(CommandLine),
}

impl Step {
    pub fn write(path: impl Into<PathBuf>, content: FileContent) -> Self {
        Self::WriteFile {
            path: path.into(),
            content,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateDirectory(path) => write!(f, "create directory {}", path.display()),
            Self::WriteFile { path, content } if content.is_merge() => {
                write!(f, "update {}", path.display())
            }
            Self::WriteFile { path, .. } => write!(f, "write {}", path.display()),
            Self::RunCommand(cmd) => write!(f, "run `{cmd}`"),
        }
    }
}

/// Ordered steps that materialize one project under `root`.
///
/// Built once by the planner, consumed once by the executor.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationPlan {
    root: PathBuf,
    steps: Vec<Step>,
}

impl GenerationPlan {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            steps: Vec::new(),
        }
    }

    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    pub fn with_step(mut self, step: Step) -> Self {
        self.push(step);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn directories(&self) -> impl Iterator<Item = &Path> {
        self.steps.iter().filter_map(|s| match s {
            Step::CreateDirectory(p) => Some(p.as_path()),
            _ => None,
        })
    }

    pub fn files(&self) -> impl Iterator<Item = (&Path, &FileContent)> {
        self.steps.iter().filter_map(|s| match s {
            Step::WriteFile { path, content } => Some((path.as_path(), content)),
            _ => None,
        })
    }

    pub fn commands(&self) -> impl Iterator<Item = &CommandLine> {
        self.steps.iter().filter_map(|s| match s {
            Step::RunCommand(c) => Some(c),
            _ => None,
        })
    }

    /// Check the ordering invariants.
    ///
    /// - the first step creates the root
    /// - every directory's parent is created before it
    /// - every written file's parent is created before it
    /// - every command runs in a directory created before it
    /// - nothing is created or written twice, nothing escapes the root
    pub fn validate(&self) -> Result<(), DomainError> {
        let invalid = |msg: String| -> Result<(), DomainError> { Err(DomainError::InvalidPlan(msg)) };

        match self.steps.first() {
            Some(Step::CreateDirectory(p)) if *p == self.root => {}
            Some(_) => return invalid("first step must create the root directory".into()),
            None => return invalid("plan is empty".into()),
        }

        let mut created: HashSet<&Path> = HashSet::new();
        let mut written: HashSet<&Path> = HashSet::new();

        for (index, step) in self.steps.iter().enumerate() {
            match step {
                Step::CreateDirectory(path) => {
                    if !path.starts_with(&self.root) {
                        return invalid(format!("step {index}: {} is outside the root", path.display()));
                    }
                    if path != &self.root && !parent_created(path, &created) {
                        return invalid(format!(
                            "step {index}: parent of {} is not created earlier",
                            path.display()
                        ));
                    }
                    if !created.insert(path) {
                        return invalid(format!("step {index}: {} is created twice", path.display()));
                    }
                }
                Step::WriteFile { path, .. } => {
                    if !path.starts_with(&self.root) || path == &self.root {
                        return invalid(format!("step {index}: {} is outside the root", path.display()));
                    }
                    if !parent_created(path, &created) {
                        return invalid(format!(
                            "step {index}: parent of {} is not created earlier",
                            path.display()
                        ));
                    }
                    if !written.insert(path) {
                        return invalid(format!("step {index}: {} is written twice", path.display()));
                    }
                }
                Step::RunCommand(cmd) => {
                    if !created.contains(cmd.cwd.as_path()) {
                        return invalid(format!(
                            "step {index}: `{cmd}` runs in {} which is not created earlier",
                            cmd.cwd.display()
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}

fn parent_created(path: &Path, created: &HashSet<&Path>) -> bool {
    path.parent().is_some_and(|parent| created.contains(parent))
}

impl<'a> IntoIterator for &'a GenerationPlan {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> PathBuf {
        PathBuf::from("/work/app")
    }

    #[test]
    fn well_ordered_plan_is_valid() {
        let plan = GenerationPlan::new(root())
            .with_step(Step::CreateDirectory(root()))
            .with_step(Step::CreateDirectory(root().join("src")))
            .with_step(Step::RunCommand(CommandLine::new("npm", ["init", "-y"], root())))
            .with_step(Step::write(root().join("src/index.js"), FileContent::text("")));

        assert!(plan.validate().is_ok());
        assert_eq!(plan.directories().count(), 2);
        assert_eq!(plan.files().count(), 1);
        assert_eq!(plan.commands().count(), 1);
    }

    #[test]
    fn write_before_parent_directory_is_invalid() {
        let plan = GenerationPlan::new(root())
            .with_step(Step::CreateDirectory(root()))
            .with_step(Step::write(root().join("src/index.js"), FileContent::text("")))
            .with_step(Step::CreateDirectory(root().join("src")));

        assert!(matches!(plan.validate(), Err(DomainError::InvalidPlan(_))));
    }

    #[test]
    fn child_before_parent_directory_is_invalid() {
        let plan = GenerationPlan::new(root())
            .with_step(Step::CreateDirectory(root()))
            .with_step(Step::CreateDirectory(root().join("src/routes")))
            .with_step(Step::CreateDirectory(root().join("src")));

        assert!(plan.validate().is_err());
    }

    #[test]
    fn root_must_come_first() {
        let empty = GenerationPlan::new(root());
        assert!(empty.validate().is_err());

        let late_root = GenerationPlan::new(root())
            .with_step(Step::RunCommand(CommandLine::new("npm", ["init"], root())))
            .with_step(Step::CreateDirectory(root()));
        assert!(late_root.validate().is_err());
    }

    #[test]
    fn duplicate_writes_are_invalid() {
        let plan = GenerationPlan::new(root())
            .with_step(Step::CreateDirectory(root()))
            .with_step(Step::write(root().join(".env"), FileContent::text("a")))
            .with_step(Step::write(root().join(".env"), FileContent::text("b")));

        assert!(plan.validate().is_err());
    }

    #[test]
    fn paths_outside_root_are_invalid() {
        let plan = GenerationPlan::new(root())
            .with_step(Step::CreateDirectory(root()))
            .with_step(Step::write("/etc/passwd", FileContent::text("")));

        assert!(plan.validate().is_err());
    }

    #[test]
    fn step_display_is_human_readable() {
        let cmd = CommandLine::new("npm", ["i", "-D", "nodemon"], root());
        assert_eq!(Step::RunCommand(cmd).to_string(), "run `npm i -D nodemon`");
        assert_eq!(
            Step::CreateDirectory(PathBuf::from("app/src")).to_string(),
            "create directory app/src"
        );
    }
}
