use super::{Action, Command, CommandContext, CommandError};

#[derive(Clone, Default)]
pub struct HistoryCommand;

impl HistoryCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for HistoryCommand {
    fn execute(
        &self,
        _args: &[String],
        ctx: &mut CommandContext<'_>,
    ) -> Result<Action, CommandError> {
        for (index, line) in ctx.history.iter() {
            writeln!(ctx.out, "{}: {}", index, line)?;
        }
        Ok(Action::Done)
    }
}
