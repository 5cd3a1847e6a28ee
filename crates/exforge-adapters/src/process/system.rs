//! Blocking child-process runner using `std::process`.

use std::process::Command;
use tracing::{debug, instrument};

use exforge_core::{
    application::{
        ApplicationError,
        ports::{CommandRunner, CommandStatus},
    },
    domain::CommandLine,
    error::ExforgeResult,
};

/// Runs commands as child processes that inherit the terminal.
///
/// No timeout is applied; a hung child blocks the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    #[instrument(skip_all, fields(command = %command, cwd = %command.cwd.display()))]
    fn run(&self, command: &CommandLine) -> ExforgeResult<CommandStatus> {
        let status = Command::new(&command.program)
            .args(&command.args)
            .current_dir(&command.cwd)
            .status()
            .map_err(|e| ApplicationError::CommandSpawn {
                command: command.to_string(),
                reason: e.to_string(),
            })?;

        debug!(code = ?status.code(), "Command exited");
        Ok(CommandStatus {
            code: status.code(),
        })
    }
}
