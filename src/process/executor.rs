use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use super::{ExecOutcome, InterruptHandler, ProcessError};
use crate::core::env::SEARCH_PATH_VAR;
use crate::core::ShellState;

/// Spawns external commands with the shell's stdio.
#[derive(Clone, Default)]
pub struct ProcessExecutor {
    interrupts: Option<InterruptHandler>,
}

impl ProcessExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interrupts(interrupts: InterruptHandler) -> Self {
        Self {
            interrupts: Some(interrupts),
        }
    }

    fn command_for(&self, argv: &[String], state: &ShellState) -> Command {
        let mut command = Command::new(&argv[0]);
        command
            .args(&argv[1..])
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Lookup uses the child's PATH, so the session value drives resolution.
        if let Some(search_path) = state.search_path() {
            command.env(SEARCH_PATH_VAR, search_path);
        }
        if let Some(cwd) = state.current_dir() {
            command.current_dir(cwd);
        }
        command
    }

    /// Runs `argv`, blocking until it exits unless `background` is set.
    ///
    /// Background children are never reaped; once the pid is printed the
    /// shell forgets about them.
    pub fn spawn_and_run(
        &self,
        argv: &[String],
        background: bool,
        state: &ShellState,
        out: &mut dyn Write,
    ) -> Result<ExecOutcome, ProcessError> {
        let name = argv.first().ok_or(ProcessError::EmptyCommand)?;

        let mut child = self.command_for(argv, state).spawn().map_err(|e| match e.kind() {
            ErrorKind::NotFound => ProcessError::CommandNotFound(name.clone()),
            ErrorKind::PermissionDenied => ProcessError::PermissionDenied(name.clone()),
            _ => ProcessError::Spawn(name.clone(), e),
        })?;
        let pid = child.id();

        if background {
            log::debug!("{} running in background as pid {}", name, pid);
            if let Err(e) = writeln!(out, "[background] pid {}", pid).and_then(|_| out.flush()) {
                log::warn!("couldn't report background pid {}: {}", pid, e);
            }
            drop(child);
            return Ok(ExecOutcome::Background(pid));
        }

        let status = child.wait().map_err(|e| ProcessError::Wait(pid, e))?;
        log::debug!("{} (pid {}) exited with {}", name, pid, status);

        if let Some(interrupts) = &self.interrupts {
            if interrupts.take() {
                log::debug!("interrupt delivered while pid {} was in the foreground", pid);
            }
        }

        Ok(ExecOutcome::Completed(status))
    }
}
