use super::{Action, Command, CommandContext, CommandError};

/// Long listing including hidden entries.
const LISTING: [&str; 2] = ["ls", "-al"];

#[derive(Clone, Default)]
pub struct DirCommand;

impl DirCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for DirCommand {
    fn execute(
        &self,
        _args: &[String],
        _ctx: &mut CommandContext<'_>,
    ) -> Result<Action, CommandError> {
        Ok(Action::Run(LISTING.iter().map(|s| s.to_string()).collect()))
    }
}
