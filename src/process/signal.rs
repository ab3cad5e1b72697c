use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use signal_hook::consts::SIGQUIT;

use super::ProcessError;
use crate::error::ShellError;

/// Keeps SIGINT and SIGQUIT from terminating the shell.
///
/// The handlers only raise a flag. Children get default dispositions back on
/// exec, so a foreground job still receives the signal and dies normally
/// while the shell keeps waiting for it.
#[derive(Clone, Default)]
pub struct InterruptHandler {
    pending: Arc<AtomicBool>,
}

impl InterruptHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the process-wide handlers. Can only succeed once per process.
    pub fn install(&self) -> Result<(), ShellError> {
        let pending = Arc::clone(&self.pending);
        ctrlc::set_handler(move || pending.store(true, Ordering::SeqCst))?;

        signal_hook::flag::register(SIGQUIT, Arc::clone(&self.pending))
            .map_err(|e| ProcessError::SignalError(e.to_string()))?;
        Ok(())
    }

    pub fn notify(&self) {
        self.pending.store(true, Ordering::SeqCst);
    }

    /// Returns whether an interrupt arrived since the last call, clearing it.
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_clears_flag() {
        let handler = InterruptHandler::new();
        assert!(!handler.take());

        handler.notify();
        assert!(handler.take());
        assert!(!handler.take());
    }

    #[test]
    fn test_clones_share_state() {
        let handler = InterruptHandler::new();
        let other = handler.clone();
        other.notify();
        assert!(handler.take());
    }
}
