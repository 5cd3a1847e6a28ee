//! Command runner that records invocations instead of spawning them.

use std::sync::{Arc, Mutex};

use exforge_core::{
    application::{
        ApplicationError,
        ports::{CommandRunner, CommandStatus},
    },
    domain::CommandLine,
    error::ExforgeResult,
};

/// Records every command and answers with a scripted status.
///
/// Clones share the same log, so a test can keep a handle after moving
/// the runner into a service.
#[derive(Debug, Clone, Default)]
pub struct RecordingRunner {
    inner: Arc<Mutex<Recording>>,
}

#[derive(Debug, Default)]
struct Recording {
    commands: Vec<CommandLine>,
    failure: Option<(usize, i32)>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the `call`-th invocation (zero-based) exit with `code`.
    pub fn failing_at(self, call: usize, code: i32) -> Self {
        if let Ok(mut inner) = self.inner.lock() {
            inner.failure = Some((call, code));
        }
        self
    }

    /// Commands seen so far, in order.
    pub fn commands(&self) -> Vec<CommandLine> {
        self.inner
            .lock()
            .map(|inner| inner.commands.clone())
            .unwrap_or_default()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &CommandLine) -> ExforgeResult<CommandStatus> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned)?;

        let call = inner.commands.len();
        inner.commands.push(command.clone());

        Ok(match inner.failure {
            Some((at, code)) if at == call => CommandStatus::from_code(code),
            _ => CommandStatus::SUCCESS,
        })
    }
}
