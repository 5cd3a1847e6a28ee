//! The scaffold run: the only thing `exforge` does besides completions.
//!
//! Responsibility: pick the project name and root, collect answers, build
//! the adapters and hand everything to `ScaffoldService`. No business logic
//! lives here.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use exforge_adapters::{ExpressTypeormCatalog, LocalFilesystem, ProcessRunner, RandomSecretSource};
use exforge_core::{
    application::{CollisionGuard, ScaffoldService},
    domain::{ConfigResolver, ConfigurationRecord, PackageManager, ProjectName, Step},
};

use crate::{
    cli::ScaffoldArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    prompts::{self, DefaultsPrompter, LinePrompter, Prompter},
};

/// Execute a scaffold run.
///
/// Sequence:
/// 1. Validate the project name and derive the root
/// 2. Refuse an existing root before asking anything
/// 3. Collect answers (terminal, piped stdin or `--defaults`)
/// 4. Resolve them into one configuration record
/// 5. Print the plan (`--dry-run`) or execute it
/// 6. Print next-steps guidance
#[instrument(skip_all)]
pub fn execute(args: ScaffoldArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    // 1. Name and root
    let raw_name = args
        .name
        .clone()
        .unwrap_or_else(|| config.defaults.project_name.clone());
    let project = ProjectName::parse(&raw_name).map_err(|e| CliError::Core(e.into()))?;
    let root = project_root(args.dir.as_deref(), &project)?;
    debug!(project = %project, root = %root.display(), "Target resolved");

    let package_manager = match &args.package_manager {
        Some(program) if program.trim().is_empty() => {
            return Err(CliError::InvalidInput {
                message: "--package-manager needs a program name".into(),
            });
        }
        Some(program) => PackageManager::new(program),
        None => config.package_manager(),
    };

    // 2. Fail fast, the service checks again right before planning
    CollisionGuard::new(&LocalFilesystem::new())
        .check(&root)
        .map_err(CliError::Core)?;

    // 3. Answers
    let answers = {
        let mut prompter = select_prompter(args.defaults);
        prompts::collect_answers(prompter.as_mut(), &project)?
    };

    // 4. Configuration record
    let record = ConfigResolver::new(Box::new(RandomSecretSource))
        .resolve(&answers, project.as_str())
        .map_err(|e| CliError::Core(e.into()))?;
    debug!(config = ?record, "Configuration resolved");

    // 5. Plan and execute
    let program = package_manager.program().to_string();
    let service = ScaffoldService::new(
        Box::new(ExpressTypeormCatalog::new()),
        Box::new(LocalFilesystem::new()),
        Box::new(ProcessRunner::new()),
    )
    .with_package_manager(package_manager);

    if args.dry_run {
        let plan = service.preview(&record, &root)?;
        output.header(&format!("Dry run: would create '{project}' at {}", root.display()))?;
        output.plan(plan.steps().iter())?;
        output.warning("Dry run: nothing was written.")?;
        return Ok(());
    }

    output.header(&format!("Creating '{project}'..."))?;
    output.info(&format!("Dependencies are installed with `{program}`"))?;
    info!(project = %project, root = %root.display(), "Scaffold started");

    let mut progress = |index: usize, total: usize, step: &Step| {
        // Progress lines are best effort; a closed stdout must not abort the run.
        let _ = output.step(index, total, step);
    };
    let report = service.scaffold_observed(&record, &root, &mut progress)?;

    info!(
        directories = report.directories_created,
        files = report.files_written,
        commands = report.commands_run,
        "Scaffold completed"
    );

    // 6. Success + next steps
    output.success(&format!("Project '{}' created!", record.project_name()))?;
    output.print("")?;
    output.print("Next steps:")?;
    for line in next_steps(&record, &program) {
        output.print(&format!("  {line}"))?;
    }
    Ok(())
}

/// `<dir>/<name>`, with `dir` defaulting to the working directory.
fn project_root(dir: Option<&Path>, project: &ProjectName) -> CliResult<PathBuf> {
    let parent = match dir {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().map_err(|source| CliError::NoWorkingDirectory { source })?,
    };
    Ok(parent.join(project.as_str()))
}

/// Terminal prompts when stdin is a TTY, one answer per line otherwise.
fn select_prompter(defaults: bool) -> Box<dyn Prompter> {
    if defaults {
        return Box::new(DefaultsPrompter);
    }

    #[cfg(feature = "interactive")]
    if io::IsTerminal::is_terminal(&io::stdin()) {
        return Box::new(prompts::TerminalPrompter::new());
    }

    Box::new(LinePrompter::new(io::stdin().lock(), io::stderr()))
}

/// Commands that start the generated project, run with the same program
/// that installed its dependencies.
fn next_steps(record: &ConfigurationRecord, program: &str) -> [String; 3] {
    [
        format!("cd {}", record.project_name()),
        format!("{program} run dev"),
        format!("{program} run seed"),
    ]
}
