use std::collections::VecDeque;

use rustyline::{config::Configurer, error::ReadlineError, history::DefaultHistory, Editor};

use super::completer::ShellHelper;
use crate::error::ShellError;

/// Outcome of asking the line source for one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineResult {
    Line(String),
    EndOfInput,
    Interrupted,
}

pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<LineResult, ShellError>;

    /// Makes `line` available to the line editor's recall.
    fn remember(&mut self, line: &str);
}

/// Interactive line source backed by rustyline.
pub struct ReadlineSource {
    editor: Editor<ShellHelper, DefaultHistory>,
}

impl ReadlineSource {
    pub fn new() -> Result<Self, ShellError> {
        let mut editor = Editor::<ShellHelper, DefaultHistory>::new()?;
        editor.set_helper(Some(ShellHelper::new()));
        editor.set_auto_add_history(false);
        editor.set_history_ignore_dups(false)?;

        Ok(ReadlineSource { editor })
    }
}

impl LineSource for ReadlineSource {
    fn read_line(&mut self, prompt: &str) -> Result<LineResult, ShellError> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(LineResult::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(LineResult::Interrupted),
            Err(ReadlineError::Eof) => Ok(LineResult::EndOfInput),
            #[cfg(unix)]
            Err(ReadlineError::WindowResized) => Ok(LineResult::Line(String::new())),
            Err(e) => Err(e.into()),
        }
    }

    fn remember(&mut self, line: &str) {
        if let Err(e) = self.editor.add_history_entry(line) {
            log::warn!("couldn't add to line recall: {}", e);
        }
    }
}

/// Replays a fixed sequence of results, then reports end of input.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    pending: VecDeque<LineResult>,
    prompts: Vec<String>,
    remembered: Vec<String>,
}

impl ScriptedSource {
    pub fn new(results: impl IntoIterator<Item = LineResult>) -> Self {
        Self {
            pending: results.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        Self::new(
            lines
                .iter()
                .map(|line| LineResult::Line(line.as_ref().to_string())),
        )
    }

    /// Prompts shown so far, one per `read_line` call.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn remembered(&self) -> &[String] {
        &self.remembered
    }
}

impl LineSource for ScriptedSource {
    fn read_line(&mut self, prompt: &str) -> Result<LineResult, ShellError> {
        self.prompts.push(prompt.to_string());
        Ok(self.pending.pop_front().unwrap_or(LineResult::EndOfInput))
    }

    fn remember(&mut self, line: &str) {
        self.remembered.push(line.to_string());
    }
}
