use super::{Action, Command, CommandContext, CommandError};
use crate::core::env::SEARCH_PATH_VAR;

/// Prints the search path. Extra arguments are ignored.
#[derive(Clone, Default)]
pub struct PathCommand;

impl PathCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for PathCommand {
    fn execute(
        &self,
        _args: &[String],
        ctx: &mut CommandContext<'_>,
    ) -> Result<Action, CommandError> {
        writeln!(ctx.out, "{}: {}", SEARCH_PATH_VAR, ctx.state.search_path_lossy())?;
        Ok(Action::Done)
    }
}

#[derive(Clone, Default)]
pub struct AddPathCommand;

impl AddPathCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for AddPathCommand {
    fn execute(&self, args: &[String], ctx: &mut CommandContext<'_>) -> Result<Action, CommandError> {
        let dir = args
            .first()
            .ok_or_else(|| CommandError::InvalidArguments("usage: addpath DIR".to_string()))?;

        ctx.state.append_search_path(dir).map_err(|e| {
            CommandError::InvalidArguments(format!("addpath: {}: {}", dir, e))
        })?;
        writeln!(ctx.out, "{} updated.", SEARCH_PATH_VAR)?;
        Ok(Action::Done)
    }
}
