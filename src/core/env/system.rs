use super::{EnvError, Environment};
use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl SystemEnv {
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    fn current_dir(&self) -> Result<PathBuf, EnvError> {
        Ok(env::current_dir()?)
    }

    fn set_current_dir(&mut self, path: &Path) -> Result<(), EnvError> {
        Ok(env::set_current_dir(path)?)
    }

    fn var(&self, key: &str) -> Option<OsString> {
        env::var_os(key)
    }

    fn set_var(&mut self, key: &str, value: &OsStr) -> Result<(), EnvError> {
        if key.is_empty() || key.contains('=') || key.contains('\0') {
            return Err(EnvError::InvalidValue("variable name"));
        }
        if value.as_encoded_bytes().contains(&0) {
            return Err(EnvError::InvalidValue("NUL byte in value"));
        }
        env::set_var(key, value);
        Ok(())
    }
}
