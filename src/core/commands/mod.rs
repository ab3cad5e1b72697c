use std::collections::BTreeMap;
use std::io::Write;

mod cd;
mod date;
mod dir;
mod exit;
mod help;
mod history;
mod path;

pub use cd::CdCommand;
pub use date::DateCommand;
pub use dir::DirCommand;
pub use exit::ExitCommand;
pub use help::HelpCommand;
pub use history::HistoryCommand;
pub use path::{AddPathCommand, PathCommand};

use crate::core::env::EnvError;
use crate::core::ShellState;
use crate::input::{History, Tokens};
use crate::process::{ProcessError, ProcessExecutor};

/// Every name the router answers to itself.
pub const BUILTIN_NAMES: [&str; 9] = [
    "exit", "cd", "help", "date", "time", "history", "path", "addpath", "dir",
];

#[derive(Debug)]
pub enum CommandError {
    InvalidArguments(String),
    ChangeDir(String, EnvError),
    Env(EnvError),
    TimeUnavailable,
    IoError(std::io::Error),
    ProcessError(ProcessError),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::InvalidArguments(msg) => write!(f, "{}", msg),
            CommandError::ChangeDir(path, err) => write!(f, "cd: {}: {}", path, err),
            CommandError::Env(err) => write!(f, "{}", err),
            CommandError::TimeUnavailable => write!(f, "date: local time is unavailable"),
            CommandError::IoError(err) => write!(f, "IO error: {}", err),
            CommandError::ProcessError(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::IoError(err)
    }
}

impl From<EnvError> for CommandError {
    fn from(err: EnvError) -> Self {
        CommandError::Env(err)
    }
}

impl From<ProcessError> for CommandError {
    fn from(err: ProcessError) -> Self {
        CommandError::ProcessError(err)
    }
}

/// Everything a built-in may touch during one iteration.
pub struct CommandContext<'a> {
    pub state: &'a mut ShellState,
    pub history: &'a History,
    pub out: &'a mut dyn Write,
}

/// What a built-in asks the router to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Done,
    Exit,
    /// Replace the argument vector and run it as an external command.
    Run(Vec<String>),
}

pub trait Command {
    fn execute(&self, args: &[String], ctx: &mut CommandContext<'_>)
        -> Result<Action, CommandError>;
}

#[derive(Clone)]
enum CommandType {
    Exit(ExitCommand),
    Cd(CdCommand),
    Help(HelpCommand),
    Date(DateCommand),
    History(HistoryCommand),
    Path(PathCommand),
    AddPath(AddPathCommand),
    Dir(DirCommand),
}

impl Command for CommandType {
    fn execute(
        &self,
        args: &[String],
        ctx: &mut CommandContext<'_>,
    ) -> Result<Action, CommandError> {
        match self {
            CommandType::Exit(cmd) => cmd.execute(args, ctx),
            CommandType::Cd(cmd) => cmd.execute(args, ctx),
            CommandType::Help(cmd) => cmd.execute(args, ctx),
            CommandType::Date(cmd) => cmd.execute(args, ctx),
            CommandType::History(cmd) => cmd.execute(args, ctx),
            CommandType::Path(cmd) => cmd.execute(args, ctx),
            CommandType::AddPath(cmd) => cmd.execute(args, ctx),
            CommandType::Dir(cmd) => cmd.execute(args, ctx),
        }
    }
}

/// Where the router sent an argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Handled,
    Exit,
    External(Vec<String>),
}

/// Loop control after a command has been executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Clone)]
pub struct CommandExecutor {
    commands: BTreeMap<&'static str, CommandType>,
    process_executor: ProcessExecutor,
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new(ProcessExecutor::new())
    }
}

impl CommandExecutor {
    pub fn new(process_executor: ProcessExecutor) -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("exit", CommandType::Exit(ExitCommand::new()));
        commands.insert("cd", CommandType::Cd(CdCommand::new()));
        commands.insert("help", CommandType::Help(HelpCommand::new()));
        commands.insert("date", CommandType::Date(DateCommand::new()));
        commands.insert("time", CommandType::Date(DateCommand::new()));
        commands.insert("history", CommandType::History(HistoryCommand::new()));
        commands.insert("path", CommandType::Path(PathCommand::new()));
        commands.insert("addpath", CommandType::AddPath(AddPathCommand::new()));
        commands.insert("dir", CommandType::Dir(DirCommand::new()));

        Self {
            commands,
            process_executor,
        }
    }

    /// Looks `argv[0]` up in the built-in table without spawning anything.
    pub fn dispatch(
        &self,
        argv: Vec<String>,
        ctx: &mut CommandContext<'_>,
    ) -> Result<Route, CommandError> {
        let Some(name) = argv.first() else {
            return Ok(Route::Handled);
        };

        let Some(cmd) = self.commands.get(name.as_str()) else {
            return Ok(Route::External(argv));
        };

        log::debug!("builtin {}", name);
        match cmd.execute(&argv[1..], ctx)? {
            Action::Done => Ok(Route::Handled),
            Action::Exit => Ok(Route::Exit),
            Action::Run(rewritten) => Ok(Route::External(rewritten)),
        }
    }

    /// Routes the tokens and runs anything that is not handled in-process.
    pub fn execute(&self, tokens: Tokens, ctx: &mut CommandContext<'_>) -> Result<Flow, CommandError> {
        let Tokens { argv, background } = tokens;

        match self.dispatch(argv, ctx)? {
            Route::Handled => Ok(Flow::Continue),
            Route::Exit => Ok(Flow::Exit),
            Route::External(argv) => {
                log::debug!("external {:?} background={}", argv, background);
                self.process_executor
                    .spawn_and_run(&argv, background, ctx.state, ctx.out)?;
                Ok(Flow::Continue)
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{argv, state};
    use super::*;
    use crate::core::env::MemoryEnv;

    fn dispatch(line: &[&str], state: &mut ShellState) -> (Result<Route, CommandError>, String) {
        let executor = CommandExecutor::default();
        let history = History::new();
        let mut out = Vec::new();
        let result = {
            let mut ctx = CommandContext {
                state,
                history: &history,
                out: &mut out,
            };
            executor.dispatch(argv(line), &mut ctx)
        };
        (result, String::from_utf8_lossy(&out).into_owned())
    }

    #[test]
    fn test_builtin_command_detection() {
        let executor = CommandExecutor::default();
        for name in BUILTIN_NAMES {
            assert!(executor.commands.contains_key(name), "{} should be a builtin", name);
        }
        assert_eq!(executor.commands.len(), BUILTIN_NAMES.len());

        let mut state = state(MemoryEnv::default());
        for name in ["ls", "EXIT", "Cd"] {
            let (route, _) = dispatch(&[name], &mut state);
            assert!(matches!(route, Ok(Route::External(_))), "{} should be external", name);
        }
    }

    #[test]
    fn test_unknown_command_is_forwarded_unchanged() -> Result<(), CommandError> {
        let mut state = state(MemoryEnv::default());
        let (route, out) = dispatch(&["grep", "-r", "x"], &mut state);
        assert_eq!(route?, Route::External(argv(&["grep", "-r", "x"])));
        assert!(out.is_empty());
        Ok(())
    }

    #[test]
    fn test_dir_becomes_long_listing() -> Result<(), CommandError> {
        let mut state = state(MemoryEnv::default());
        let (route, _) = dispatch(&["dir"], &mut state);
        assert_eq!(route?, Route::External(argv(&["ls", "-al"])));
        Ok(())
    }

    #[test]
    fn test_exit_routes_to_exit() -> Result<(), CommandError> {
        let mut state = state(MemoryEnv::default());
        let (route, _) = dispatch(&["exit"], &mut state);
        assert_eq!(route?, Route::Exit);
        Ok(())
    }

    #[test]
    fn test_builtins_are_handled_in_process() -> Result<(), CommandError> {
        let mut state = state(MemoryEnv::default().with_var("PATH", "/bin"));
        let lines: [&[&str]; 5] = [&["help"], &["date"], &["time"], &["history"], &["path"]];
        for line in lines {
            let (route, out) = dispatch(line, &mut state);
            assert_eq!(route?, Route::Handled);
            if line != ["history"] {
                assert!(!out.is_empty(), "{:?} printed nothing", line);
            }
        }
        Ok(())
    }

    #[test]
    fn test_empty_argv_is_noop() -> Result<(), CommandError> {
        let mut state = state(MemoryEnv::default());
        let (route, out) = dispatch(&[], &mut state);
        assert_eq!(route?, Route::Handled);
        assert!(out.is_empty());
        Ok(())
    }

    #[test]
    fn test_failed_cd_is_recoverable() {
        let mut state = state(MemoryEnv::new("/tmp"));
        let (route, _) = dispatch(&["cd", "/nonexistent"], &mut state);
        assert!(matches!(route, Err(CommandError::ChangeDir(..))));
        assert_eq!(state.current_dir(), Some(std::path::PathBuf::from("/tmp")));
    }

    #[test]
    fn test_command_error_display() {
        let errors = vec![
            CommandError::InvalidArguments("cd: missing operand".to_string()),
            CommandError::ChangeDir("/x".to_string(), EnvError::NoSuchDirectory("/x".into())),
            CommandError::TimeUnavailable,
            CommandError::ProcessError(ProcessError::CommandNotFound("nope".to_string())),
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }
        assert_eq!(
            CommandError::ChangeDir("/x".to_string(), EnvError::NoSuchDirectory("/x".into()))
                .to_string(),
            "cd: /x: No such file or directory"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_execute_runs_external_in_foreground() -> Result<(), CommandError> {
        let mut state = state(MemoryEnv::default().with_var("PATH", "/bin:/usr/bin"));
        let executor = CommandExecutor::default();
        let history = History::new();
        let mut out = Vec::new();
        let mut ctx = CommandContext {
            state: &mut state,
            history: &history,
            out: &mut out,
        };

        let flow = executor.execute(crate::input::tokenize("true", 64), &mut ctx)?;
        assert_eq!(flow, Flow::Continue);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_execute_reports_missing_command() {
        let mut state = state(MemoryEnv::default().with_var("PATH", "/bin:/usr/bin"));
        let executor = CommandExecutor::default();
        let history = History::new();
        let mut out = Vec::new();
        let mut ctx = CommandContext {
            state: &mut state,
            history: &history,
            out: &mut out,
        };

        let result = executor.execute(crate::input::tokenize("thinsh-missing-cmd", 64), &mut ctx);
        assert!(matches!(
            result,
            Err(CommandError::ProcessError(ProcessError::CommandNotFound(_)))
        ));
    }
}
