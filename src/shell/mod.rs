use std::io::{self, Write};

use crate::{
    core::{
        commands::{CommandContext, CommandError, CommandExecutor, Flow},
        env::SystemEnv,
        ShellState,
    },
    error::ShellError,
    flags::ShellConfig,
    highlight::SyntaxHighlighter,
    input::{tokenize, History, LineResult, LineSource, ReadlineSource},
    process::{InterruptHandler, ProcessExecutor},
    prompt::prompt_for,
};

pub const INTERRUPT_HINT: &str = "Use 'exit' to leave the shell";
pub const FAREWELL: &str = "Goodbye!";

/// The interactive loop: prompt, read, tokenize, route, maybe spawn.
pub struct Shell<S: LineSource = ReadlineSource> {
    source: S,
    state: ShellState,
    executor: CommandExecutor,
    history: History,
    interrupts: InterruptHandler,
    config: ShellConfig,
    highlighter: SyntaxHighlighter,
    out: Box<dyn Write>,
    err: Box<dyn Write>,
}

impl Shell<ReadlineSource> {
    /// Interactive shell on the real terminal, process environment and signals.
    pub fn new(config: ShellConfig) -> Result<Self, ShellError> {
        let interrupts = InterruptHandler::new();
        interrupts.install()?;

        let source = ReadlineSource::new()?;
        let state = ShellState::new(Box::new(SystemEnv::new()));

        let mut shell = Shell::with_parts(config, source, state, interrupts);
        shell.highlighter = SyntaxHighlighter::new();
        Ok(shell)
    }
}

impl<S: LineSource> Shell<S> {
    pub fn with_parts(
        config: ShellConfig,
        source: S,
        state: ShellState,
        interrupts: InterruptHandler,
    ) -> Self {
        let executor = CommandExecutor::new(ProcessExecutor::with_interrupts(interrupts.clone()));

        Shell {
            source,
            state,
            executor,
            history: History::new(),
            interrupts,
            config,
            highlighter: SyntaxHighlighter::plain(),
            out: Box::new(io::stdout()),
            err: Box::new(io::stderr()),
        }
    }

    pub fn with_output(mut self, out: Box<dyn Write>, err: Box<dyn Write>) -> Self {
        self.out = out;
        self.err = err;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Runs until `exit` or end of input.
    pub fn run(&mut self) -> Result<(), ShellError> {
        while self.step()? == Flow::Continue {}
        Ok(())
    }

    /// One iteration of the loop.
    pub fn step(&mut self) -> Result<Flow, ShellError> {
        let prompt = prompt_for(self.state.current_dir().as_deref());
        self.flush_out();

        let line = match self.source.read_line(&prompt)? {
            LineResult::Line(line) => line,
            LineResult::Interrupted => {
                self.interrupts.take();
                self.notice(INTERRUPT_HINT);
                return Ok(Flow::Continue);
            }
            LineResult::EndOfInput => {
                self.notice("");
                self.flush_out();
                return Ok(Flow::Exit);
            }
        };

        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }

        let flow = self.execute_line(&line);
        self.history.add(&line);
        self.source.remember(&line);

        if flow == Flow::Exit {
            self.notice(FAREWELL);
        }
        self.flush_out();
        Ok(flow)
    }

    // Informational lines; a broken stdout is logged, never fatal.
    fn notice(&mut self, message: &str) {
        if self.config.quiet {
            return;
        }
        if let Err(e) = writeln!(self.out, "{}", message) {
            log::warn!("couldn't write to stdout: {}", e);
        }
    }

    fn flush_out(&mut self) {
        if let Err(e) = self.out.flush() {
            log::warn!("couldn't flush stdout: {}", e);
        }
    }

    fn execute_line(&mut self, line: &str) -> Flow {
        let tokens = tokenize(line, self.config.max_args);
        if tokens.is_empty() {
            return Flow::Continue;
        }

        let mut ctx = CommandContext {
            state: &mut self.state,
            history: &self.history,
            out: self.out.as_mut(),
        };
        match self.executor.execute(tokens, &mut ctx) {
            Ok(flow) => flow,
            Err(e) => {
                self.report(&e);
                Flow::Continue
            }
        }
    }

    fn report(&mut self, error: &CommandError) {
        let message = format!("thinsh: {}", error);
        if let Err(e) = writeln!(self.err, "{}", self.highlighter.highlight_error(&message)) {
            log::error!("couldn't write diagnostic: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::env::MemoryEnv;
    use crate::input::ScriptedSource;
    use crate::path::PathExpander;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.borrow()).into_owned()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _data: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::ErrorKind::BrokenPipe.into())
        }
    }

    struct Harness {
        shell: Shell<ScriptedSource>,
        out: SharedBuffer,
        err: SharedBuffer,
    }

    fn harness(source: ScriptedSource, env: MemoryEnv, config: ShellConfig) -> Harness {
        let out = SharedBuffer::default();
        let err = SharedBuffer::default();
        let state =
            ShellState::new(Box::new(env)).with_expander(PathExpander::with_home("/home/test"));
        let shell = Shell::with_parts(config, source, state, InterruptHandler::new())
            .with_output(Box::new(out.clone()), Box::new(err.clone()));
        Harness { shell, out, err }
    }

    fn scripted(lines: &[&str]) -> Harness {
        harness(
            ScriptedSource::from_lines(lines),
            MemoryEnv::new("/home/test").with_var("PATH", "/bin:/usr/bin"),
            ShellConfig::default(),
        )
    }

    // Spawned children chdir into the session directory, so it must exist.
    fn spawning(lines: &[&str]) -> Harness {
        harness(
            ScriptedSource::from_lines(lines),
            MemoryEnv::new("/").with_var("PATH", "/bin:/usr/bin"),
            ShellConfig::default(),
        )
    }

    #[test]
    fn test_blank_lines_are_skipped() -> Result<(), ShellError> {
        let mut h = scripted(&["", "   ", "\t"]);
        h.shell.run()?;

        assert!(h.shell.history().is_empty());
        assert!(h.shell.source().remembered().is_empty());
        assert_eq!(h.out.contents(), "\n");
        assert!(h.err.contents().is_empty());
        assert_eq!(h.shell.source().prompts().len(), 4);
        Ok(())
    }

    #[test]
    fn test_history_lists_prior_submissions() -> Result<(), ShellError> {
        let mut h = scripted(&["path", "", "help", "date", "history"]);
        h.shell.run()?;

        let out = h.out.contents();
        assert!(out.ends_with("1: path\n2: help\n3: date\n\n"), "{}", out);
        assert_eq!(h.shell.history().len(), 4);
        Ok(())
    }

    #[test]
    fn test_failed_cd_keeps_prompt() -> Result<(), ShellError> {
        let mut h = scripted(&["cd /nonexistent", "cd /"]);
        h.shell.run()?;

        assert_eq!(
            h.shell.source().prompts(),
            ["test > ", "test > ", "/ > "]
        );
        assert!(h.err.contents().contains("cd: /nonexistent"));
        assert_eq!(h.shell.state().current_dir(), Some(PathBuf::from("/")));
        Ok(())
    }

    #[test]
    fn test_addpath_then_path() -> Result<(), ShellError> {
        let mut h = scripted(&["addpath /x", "path", "path"]);
        h.shell.run()?;

        let out = h.out.contents();
        let path_lines: Vec<&str> = out.lines().filter(|l| l.starts_with("PATH:")).collect();
        assert_eq!(path_lines, ["PATH: /bin:/usr/bin:/x", "PATH: /bin:/usr/bin:/x"]);
        Ok(())
    }

    #[test]
    fn test_exit_stops_loop() -> Result<(), ShellError> {
        let mut h = scripted(&["exit", "path"]);
        h.shell.run()?;

        assert_eq!(h.out.contents(), format!("{}\n", FAREWELL));
        assert_eq!(h.shell.source().prompts().len(), 1);
        Ok(())
    }

    #[test]
    fn test_end_of_input_stops_loop() -> Result<(), ShellError> {
        let mut h = scripted(&[]);
        assert_eq!(h.shell.step()?, Flow::Exit);
        assert!(!h.out.contents().contains(FAREWELL));
        Ok(())
    }

    #[test]
    fn test_quiet_mode() -> Result<(), ShellError> {
        let config = ShellConfig {
            quiet: true,
            ..ShellConfig::default()
        };
        let mut h = harness(
            ScriptedSource::new([LineResult::Interrupted, LineResult::Line("exit".into())]),
            MemoryEnv::default(),
            config,
        );
        h.shell.run()?;
        assert!(h.out.contents().is_empty());
        Ok(())
    }

    #[test]
    fn test_interrupt_recovers() -> Result<(), ShellError> {
        let mut h = harness(
            ScriptedSource::new([
                LineResult::Interrupted,
                LineResult::Line("path".into()),
            ]),
            MemoryEnv::default().with_var("PATH", "/bin"),
            ShellConfig::default(),
        );

        assert_eq!(h.shell.step()?, Flow::Continue);
        assert_eq!(h.shell.step()?, Flow::Continue);
        assert_eq!(h.shell.step()?, Flow::Exit);

        let out = h.out.contents();
        assert!(out.starts_with(INTERRUPT_HINT));
        assert!(out.contains("PATH: /bin\n"));
        assert_eq!(h.shell.history().len(), 1);
        Ok(())
    }

    #[test]
    fn test_marker_only_line_runs_nothing() -> Result<(), ShellError> {
        let mut h = scripted(&["&", "  &  "]);
        h.shell.run()?;
        assert!(h.err.contents().is_empty());
        assert_eq!(h.out.contents(), "\n");
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_unknown_command_is_reported() -> Result<(), ShellError> {
        let mut h = spawning(&["thinsh-no-such-command --flag", "path"]);
        h.shell.run()?;

        assert!(h
            .err
            .contents()
            .contains("thinsh: command not found: thinsh-no-such-command"));
        assert!(h.out.contents().contains("PATH: /bin:/usr/bin"));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_foreground_blocks_background_does_not() -> Result<(), ShellError> {
        use std::time::{Duration, Instant};

        let mut h = spawning(&["sleep 0.3", "sleep 2 &"]);

        let start = Instant::now();
        assert_eq!(h.shell.step()?, Flow::Continue);
        assert!(start.elapsed() >= Duration::from_millis(300));

        let start = Instant::now();
        assert_eq!(h.shell.step()?, Flow::Continue);
        assert!(start.elapsed() < Duration::from_secs(2));
        assert!(h.out.contents().contains("[background] pid "));
        Ok(())
    }

    #[test]
    fn test_broken_stdout_does_not_end_session() -> Result<(), ShellError> {
        let err = SharedBuffer::default();
        let state = ShellState::new(Box::new(MemoryEnv::default().with_var("PATH", "/bin")));
        let mut shell = Shell::with_parts(
            ShellConfig::default(),
            ScriptedSource::new([
                LineResult::Interrupted,
                LineResult::Line("path".into()),
                LineResult::Line("cd /nonexistent".into()),
                LineResult::Line("exit".into()),
            ]),
            state,
            InterruptHandler::new(),
        )
        .with_output(Box::new(BrokenPipe), Box::new(err.clone()));

        shell.run()?;
        assert_eq!(shell.source().prompts().len(), 4);
        assert_eq!(shell.history().len(), 3);
        assert!(err.contents().contains("cd: /nonexistent"));
        Ok(())
    }

    #[test]
    fn test_truncates_long_lines() -> Result<(), ShellError> {
        let config = ShellConfig {
            max_args: 1,
            ..ShellConfig::default()
        };
        let mut h = harness(
            ScriptedSource::from_lines(&["cd /nonexistent"]),
            MemoryEnv::new("/tmp"),
            config,
        );
        h.shell.run()?;
        assert!(h.err.contents().contains("cd: missing operand"));
        Ok(())
    }
}
