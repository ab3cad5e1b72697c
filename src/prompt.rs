use std::path::Path;

pub const ROOT_PROMPT: &str = "/ > ";
pub const FALLBACK_PROMPT: &str = "thinsh > ";
const SUFFIX: &str = " > ";

/// Builds the prompt label for the given working directory.
///
/// The root directory gets a fixed marker, any other directory shows its
/// last path segment, and an unknown directory falls back to a generic label.
pub fn prompt_for(cwd: Option<&Path>) -> String {
    let Some(cwd) = cwd else {
        return FALLBACK_PROMPT.to_string();
    };

    if cwd.parent().is_none() && cwd.has_root() {
        return ROOT_PROMPT.to_string();
    }

    let lossy = cwd.to_string_lossy();
    let segment = match cwd.file_name() {
        Some(name) => name.to_string_lossy(),
        None => lossy
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string()
            .into(),
    };

    if segment.is_empty() {
        FALLBACK_PROMPT.to_string()
    } else {
        format!("{}{}", segment, SUFFIX)
    }
}
