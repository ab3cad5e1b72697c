use super::{Action, Command, CommandContext, CommandError};

const ENTRIES: [(&str, &str); 9] = [
    ("cd DIR", "Change the working directory"),
    ("dir", "List files (ls -al)"),
    ("date", "Show the current date and time"),
    ("time", "Same as date"),
    ("history", "List the commands entered this session"),
    ("path", "Show the current PATH"),
    ("addpath X", "Append X to PATH"),
    ("help", "Show this list"),
    ("exit", "Quit the shell"),
];

#[derive(Clone, Default)]
pub struct HelpCommand;

impl HelpCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for HelpCommand {
    fn execute(
        &self,
        _args: &[String],
        ctx: &mut CommandContext<'_>,
    ) -> Result<Action, CommandError> {
        writeln!(ctx.out, "--- thinsh builtins ---")?;
        for (usage, description) in ENTRIES {
            writeln!(ctx.out, "{:<10}: {}", usage, description)?;
        }
        writeln!(ctx.out, "{:<10}: {}", "command &", "Run command in the background")?;
        writeln!(
            ctx.out,
            "Anything else is run as an external program found on PATH."
        )?;
        Ok(Action::Done)
    }
}
