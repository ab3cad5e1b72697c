use inksac::prelude::*;
use log::{Level, LevelFilter, Log, Metadata, Record};

static LOGGER: Logger = Logger;

pub struct Logger;

pub fn init(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}

fn level_tag(level: Level) -> (Color, char) {
    match level {
        Level::Error => (Color::Red, 'E'),
        Level::Warn => (Color::Yellow, 'W'),
        Level::Info => (Color::Green, '*'),
        Level::Debug => (Color::Magenta, 'D'),
        Level::Trace => (Color::RGB(128, 128, 128), 'T'),
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let (color, ch) = level_tag(record.level());
        let tag = match check_color_support() {
            Ok(ColorSupport::NoColor) | Err(_) => ch.to_string(),
            Ok(_) => {
                let style = Style::builder().foreground(color).bold().build();
                ch.to_string().style(style).to_string()
            }
        };
        eprintln!("[{}] {}", tag, record.args());
    }

    fn flush(&self) {}
}
