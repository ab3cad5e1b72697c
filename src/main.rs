use std::env;
use std::process::ExitCode;

use thinsh::error::ShellError;
use thinsh::flags::{Flags, ShellConfig};
use thinsh::logger;
use thinsh::shell::Shell;

fn run(config: ShellConfig) -> Result<(), ShellError> {
    logger::init(config.log_level())?;
    log::debug!("starting with {:?}", config);

    let mut shell = Shell::new(config)?;
    shell.run()
}

fn main() -> ExitCode {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();

    let parsed = flags
        .parse(&args)
        .and_then(|()| ShellConfig::from_flags(&flags));
    let config = match parsed {
        Ok(config) => config,
        Err(e) => {
            eprintln!("thinsh: {}", e);
            flags.print_help();
            return ExitCode::from(2);
        }
    };

    if flags.is_set("help") {
        flags.print_help();
        return ExitCode::SUCCESS;
    }

    if flags.is_set("version") {
        println!("thinsh {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("thinsh: {}", e);
            ExitCode::FAILURE
        }
    }
}
