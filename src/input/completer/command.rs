use std::{collections::BTreeSet, env, ffi::OsString, fs};

use rustyline::completion::Pair;

use crate::core::commands::BUILTIN_NAMES;
use crate::core::env::SEARCH_PATH_VAR;

/// Completes the command word from the built-in table and the search path.
#[derive(Clone, Default)]
pub struct CommandCompleter;

impl CommandCompleter {
    pub fn new() -> Self {
        Self
    }

    // The search path is re-read on every completion so `addpath` is seen
    // without any refresh hook.
    fn path_commands(&self, search_path: Option<OsString>) -> BTreeSet<String> {
        let mut commands = BTreeSet::new();
        let Some(path_var) = search_path else {
            return commands;
        };

        for dir in env::split_paths(&path_var) {
            let Ok(entries) = fs::read_dir(dir) else {
                continue;
            };
            for entry in entries.filter_map(Result::ok) {
                let is_candidate = entry
                    .file_type()
                    .map(|t| t.is_file() || t.is_symlink())
                    .unwrap_or(false);
                if !is_candidate {
                    continue;
                }
                if let Some(name) = entry.file_name().to_str() {
                    commands.insert(name.to_string());
                }
            }
        }
        commands
    }

    pub fn complete_command(&self, word: &str) -> Vec<Pair> {
        let mut matches = Vec::new();
        let input = word.trim();

        for builtin in BUILTIN_NAMES.iter().filter(|b| b.starts_with(input)) {
            matches.push(Pair {
                display: format!("{} (builtin)", builtin),
                replacement: format!("{} ", builtin),
            });
        }

        let external = self.path_commands(env::var_os(SEARCH_PATH_VAR));
        for cmd in external.iter().filter(|c| c.starts_with(input)) {
            if BUILTIN_NAMES.contains(&cmd.as_str()) {
                continue;
            }
            matches.push(Pair {
                display: cmd.clone(),
                replacement: format!("{} ", cmd),
            });
        }

        matches
    }
}
