mod memory;
mod system;

pub use memory::MemoryEnv;
pub use system::SystemEnv;

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Name of the search-path variable the shell reads and extends.
pub const SEARCH_PATH_VAR: &str = "PATH";

#[cfg(unix)]
pub const PATH_SEPARATOR: char = ':';
#[cfg(windows)]
pub const PATH_SEPARATOR: char = ';';

/// Key-value store plus working directory the shell observes and mutates.
///
/// `SystemEnv` forwards to the process globals. `MemoryEnv` keeps everything
/// in memory so the loop can be driven without touching the real process.
pub trait Environment {
    fn current_dir(&self) -> Result<PathBuf, EnvError>;
    fn set_current_dir(&mut self, path: &Path) -> Result<(), EnvError>;
    fn var(&self, key: &str) -> Option<OsString>;
    fn set_var(&mut self, key: &str, value: &OsStr) -> Result<(), EnvError>;
}

#[derive(Debug)]
pub enum EnvError {
    HomeDirNotFound,
    NoSuchDirectory(PathBuf),
    InvalidValue(&'static str),
    IoError(std::io::Error),
}

impl std::fmt::Display for EnvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvError::HomeDirNotFound => write!(f, "Home directory not found"),
            EnvError::NoSuchDirectory(_) => write!(f, "No such file or directory"),
            EnvError::InvalidValue(val) => write!(f, "Invalid value: {}", val),
            EnvError::IoError(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for EnvError {}

impl From<std::io::Error> for EnvError {
    fn from(e: std::io::Error) -> Self {
        EnvError::IoError(e)
    }
}
