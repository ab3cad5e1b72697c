use crate::core::env::EnvError;
use std::path::{Path, PathBuf};

/// Expands a leading `~` to the user's home directory.
#[derive(Clone)]
pub struct PathExpander {
    home: Option<PathBuf>,
}

impl Default for PathExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl PathExpander {
    pub fn new() -> Self {
        Self {
            home: dirs::home_dir(),
        }
    }

    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: Some(home.into()),
        }
    }

    pub fn expand(&self, path: &str) -> Result<PathBuf, EnvError> {
        if path.starts_with('~') {
            self.expand_tilde(path)
        } else {
            Ok(Path::new(path).to_path_buf())
        }
    }

    fn expand_tilde(&self, path: &str) -> Result<PathBuf, EnvError> {
        let without_tilde = &path[1..];
        if without_tilde.is_empty() {
            return self.home.clone().ok_or(EnvError::HomeDirNotFound);
        }

        match without_tilde.strip_prefix('/') {
            Some(stripped) => {
                let mut home_path = self.home.clone().ok_or(EnvError::HomeDirNotFound)?;
                for part in stripped.split('/').filter(|part| !part.is_empty()) {
                    home_path.push(part);
                }
                Ok(home_path)
            }
            // "~user" forms are left alone
            None => Ok(Path::new(path).to_path_buf()),
        }
    }
}
