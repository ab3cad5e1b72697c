use super::{EnvError, Environment};
use std::collections::{BTreeSet, HashMap};
use std::ffi::{OsStr, OsString};
use std::path::{Component, Path, PathBuf};

/// In-memory environment with a fixed set of known directories.
#[derive(Debug, Clone)]
pub struct MemoryEnv {
    cwd: Option<PathBuf>,
    dirs: BTreeSet<PathBuf>,
    vars: HashMap<String, OsString>,
}

impl Default for MemoryEnv {
    fn default() -> Self {
        Self::new("/")
    }
}

impl MemoryEnv {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        let cwd = cwd.into();
        let mut env = Self {
            cwd: Some(cwd.clone()),
            dirs: BTreeSet::new(),
            vars: HashMap::new(),
        };
        env.add_dir("/");
        env.add_dir(cwd);
        env
    }

    /// An environment whose working directory cannot be determined.
    pub fn without_cwd() -> Self {
        let mut env = Self::new("/");
        env.cwd = None;
        env
    }

    /// Registers `path` and all of its ancestors as existing directories.
    pub fn add_dir(&mut self, path: impl Into<PathBuf>) {
        let path = normalize(&path.into());
        for ancestor in path.ancestors() {
            self.dirs.insert(ancestor.to_path_buf());
        }
    }

    pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.add_dir(path);
        self
    }

    pub fn with_var(mut self, key: &str, value: impl Into<OsString>) -> Self {
        self.vars.insert(key.to_string(), value.into());
        self
    }
}

// Lexical cleanup only; there are no symlinks to follow in memory.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::from("/");
    for component in path.components() {
        match component {
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
            Component::RootDir | Component::CurDir | Component::Prefix(_) => {}
        }
    }
    out
}

impl Environment for MemoryEnv {
    fn current_dir(&self) -> Result<PathBuf, EnvError> {
        self.cwd.clone().ok_or_else(|| {
            EnvError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "current directory is unavailable",
            ))
        })
    }

    fn set_current_dir(&mut self, path: &Path) -> Result<(), EnvError> {
        let joined = match &self.cwd {
            Some(cwd) if path.is_relative() => cwd.join(path),
            _ => path.to_path_buf(),
        };
        let target = normalize(&joined);
        if !self.dirs.contains(&target) {
            return Err(EnvError::NoSuchDirectory(path.to_path_buf()));
        }
        self.cwd = Some(target);
        Ok(())
    }

    fn var(&self, key: &str) -> Option<OsString> {
        self.vars.get(key).cloned()
    }

    fn set_var(&mut self, key: &str, value: &OsStr) -> Result<(), EnvError> {
        if key.is_empty() {
            return Err(EnvError::InvalidValue("Empty variable name"));
        }
        self.vars.insert(key.to_string(), value.to_os_string());
        Ok(())
    }
}
