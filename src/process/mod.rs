use std::fmt;
use std::process::ExitStatus;

pub mod executor;
pub mod signal;

pub use executor::ProcessExecutor;
pub use signal::InterruptHandler;

/// How a spawned command left the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecOutcome {
    /// Foreground child that has terminated; the status is not acted on.
    Completed(ExitStatus),
    /// Background child handed off with this pid and never waited for.
    Background(u32),
}

#[derive(Debug)]
pub enum ProcessError {
    EmptyCommand,
    CommandNotFound(String),
    PermissionDenied(String),
    Spawn(String, std::io::Error),
    Wait(u32, std::io::Error),
    SignalError(String),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::EmptyCommand => write!(f, "empty command"),
            ProcessError::CommandNotFound(cmd) => write!(f, "command not found: {}", cmd),
            ProcessError::PermissionDenied(cmd) => write!(f, "permission denied: {}", cmd),
            ProcessError::Spawn(cmd, e) => write!(f, "failed to start {}: {}", cmd, e),
            ProcessError::Wait(pid, e) => write!(f, "failed to wait for pid {}: {}", pid, e),
            ProcessError::SignalError(msg) => write!(f, "Signal error: {}", msg),
        }
    }
}

impl std::error::Error for ProcessError {}
