use super::{Action, Command, CommandContext, CommandError};

#[derive(Clone, Default)]
pub struct CdCommand;

impl CdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for CdCommand {
    fn execute(&self, args: &[String], ctx: &mut CommandContext<'_>) -> Result<Action, CommandError> {
        let target = args
            .first()
            .ok_or_else(|| CommandError::InvalidArguments("cd: missing operand".to_string()))?;

        ctx.state
            .change_dir(target)
            .map_err(|e| CommandError::ChangeDir(target.clone(), e))?;
        Ok(Action::Done)
    }
}
