use std::ffi::OsString;
use std::path::PathBuf;

use super::env::{EnvError, Environment, PATH_SEPARATOR, SEARCH_PATH_VAR};
use crate::path::PathExpander;

/// Session state threaded through built-ins and the process engine.
///
/// Holds no copy of the working directory or the search path; both are read
/// back from the environment store on every access.
pub struct ShellState {
    env: Box<dyn Environment>,
    expander: PathExpander,
}

impl ShellState {
    pub fn new(env: Box<dyn Environment>) -> Self {
        Self {
            env,
            expander: PathExpander::new(),
        }
    }

    pub fn with_expander(mut self, expander: PathExpander) -> Self {
        self.expander = expander;
        self
    }

    pub fn current_dir(&self) -> Option<PathBuf> {
        self.env.current_dir().ok()
    }

    pub fn change_dir(&mut self, target: &str) -> Result<PathBuf, EnvError> {
        let path = self.expander.expand(target)?;
        self.env.set_current_dir(&path)?;
        self.env.current_dir()
    }

    /// The search path exactly as stored, or `None` when it is unset.
    pub fn search_path(&self) -> Option<OsString> {
        self.env.var(SEARCH_PATH_VAR)
    }

    /// The search path for display; bytes that aren't UTF-8 are replaced.
    pub fn search_path_lossy(&self) -> String {
        self.search_path()
            .map(|path| path.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn append_search_path(&mut self, dir: &str) -> Result<OsString, EnvError> {
        if dir.is_empty() {
            return Err(EnvError::InvalidValue("empty path component"));
        }
        if dir.contains(PATH_SEPARATOR) {
            return Err(EnvError::InvalidValue("path component contains the separator"));
        }

        let updated = match self.search_path() {
            Some(mut current) if !current.is_empty() => {
                current.push(PATH_SEPARATOR.encode_utf8(&mut [0; 4]));
                current.push(dir);
                current
            }
            _ => OsString::from(dir),
        };
        self.env.set_var(SEARCH_PATH_VAR, &updated)?;
        log::debug!("{} is now {}", SEARCH_PATH_VAR, updated.to_string_lossy());
        Ok(updated)
    }
}
