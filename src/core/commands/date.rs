use super::{Action, Command, CommandContext, CommandError};

/// strftime's locale-preferred date and time; the shell never calls
/// setlocale, so this is the fixed C-locale layout.
const FORMAT: &[u8] = b"%c\0";

#[derive(Clone, Default)]
pub struct DateCommand;

impl DateCommand {
    pub fn new() -> Self {
        Self
    }
}

fn local_time() -> Option<String> {
    let mut buf = [0 as libc::c_char; 128];

    // SAFETY: `tm` is fully written by localtime_r before use, and strftime
    // never writes more than `buf.len()` bytes including the terminator.
    let len = unsafe {
        let now = libc::time(std::ptr::null_mut());
        let mut tm: libc::tm = std::mem::zeroed();
        if libc::localtime_r(&now, &mut tm).is_null() {
            return None;
        }
        libc::strftime(
            buf.as_mut_ptr(),
            buf.len(),
            FORMAT.as_ptr() as *const libc::c_char,
            &tm,
        )
    };

    if len == 0 {
        return None;
    }
    let bytes: Vec<u8> = buf[..len].iter().map(|&c| c as u8).collect();
    Some(String::from_utf8_lossy(&bytes).into_owned())
}

impl Command for DateCommand {
    fn execute(
        &self,
        _args: &[String],
        ctx: &mut CommandContext<'_>,
    ) -> Result<Action, CommandError> {
        let now = local_time().ok_or(CommandError::TimeUnavailable)?;
        writeln!(ctx.out, "Current date/time: {}", now)?;
        Ok(Action::Done)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{run, state};
    use super::*;
    use crate::core::env::MemoryEnv;
    use crate::input::History;

    #[test]
    fn test_local_time_has_year() {
        let now = local_time().unwrap_or_default();
        // "%c" in the C locale ends with the four-digit year
        let year = now.rsplit(' ').next().unwrap_or_default();
        assert_eq!(year.len(), 4);
        assert!(year.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_date_prints_single_line() {
        let mut state = state(MemoryEnv::default());
        let (result, out) = run(&DateCommand::new(), &[], &mut state, &History::new());
        assert_eq!(result.ok(), Some(Action::Done));
        assert!(out.starts_with("Current date/time: "));
        assert_eq!(out.lines().count(), 1);
    }
}
