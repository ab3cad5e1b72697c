use std::{
    fs,
    path::{Path, PathBuf},
};

use rustyline::completion::Pair;

/// Completes file system paths for argument positions.
#[derive(Clone, Default)]
pub struct PathCompleter;

impl PathCompleter {
    pub fn new() -> Self {
        Self
    }

    pub fn complete_path(&self, incomplete: &str) -> Vec<Pair> {
        let (dir, prefix) = split_input(incomplete);
        let Ok(entries) = fs::read_dir(&dir) else {
            return Vec::new();
        };

        // Keep whatever the user already typed before the final segment.
        let typed_dir = &incomplete[..incomplete.len() - prefix.len()];

        let mut matches: Vec<Pair> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                if !name.starts_with(prefix) || (prefix.is_empty() && name.starts_with('.')) {
                    return None;
                }
                let candidate = format!("{}{}", typed_dir, name);
                Some(if entry.path().is_dir() {
                    Pair {
                        display: format!("{}/", name),
                        replacement: format!("{}/", candidate),
                    }
                } else {
                    Pair {
                        display: name,
                        replacement: format!("{} ", candidate),
                    }
                })
            })
            .collect();

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }
}

fn split_input(incomplete: &str) -> (PathBuf, &str) {
    match incomplete.rfind('/') {
        Some(0) => (PathBuf::from("/"), &incomplete[1..]),
        Some(idx) => (Path::new(&incomplete[..idx]).to_path_buf(), &incomplete[idx + 1..]),
        None => (PathBuf::from("."), incomplete),
    }
}
