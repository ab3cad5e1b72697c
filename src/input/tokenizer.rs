pub const BACKGROUND_MARKER: &str = "&";

/// Argument vector and background flag for a single line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tokens {
    pub argv: Vec<String>,
    pub background: bool,
}

impl Tokens {
    pub fn is_empty(&self) -> bool {
        self.argv.is_empty()
    }
}

/// Splits `line` on runs of whitespace, keeping at most `max_args` tokens.
///
/// The background marker only counts when it is the last token kept; it is
/// removed from the vector and reported through `background`.
pub fn tokenize(line: &str, max_args: usize) -> Tokens {
    let mut argv: Vec<String> = line
        .split_whitespace()
        .take(max_args)
        .map(String::from)
        .collect();

    let background = argv.last().is_some_and(|last| last == BACKGROUND_MARKER);
    if background {
        argv.pop();
    }

    Tokens { argv, background }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_trailing_marker() {
        let tokens = tokenize("ls -al &", 64);
        assert_eq!(tokens.argv, argv(&["ls", "-al"]));
        assert!(tokens.background);
    }

    #[test]
    fn test_marker_not_last() {
        let tokens = tokenize("echo a & b", 64);
        assert_eq!(tokens.argv, argv(&["echo", "a", "&", "b"]));
        assert!(!tokens.background);
    }

    #[test]
    fn test_attached_ampersand_is_plain_token() {
        let tokens = tokenize("sleep 5&", 64);
        assert_eq!(tokens.argv, argv(&["sleep", "5&"]));
        assert!(!tokens.background);
    }

    #[test]
    fn test_whitespace_runs() {
        let tokens = tokenize("  echo\t hello   world \n", 64);
        assert_eq!(tokens.argv, argv(&["echo", "hello", "world"]));
    }

    #[test]
    fn test_marker_only_is_empty() {
        let tokens = tokenize("   &  ", 64);
        assert!(tokens.is_empty());
        assert!(tokens.background);
        assert!(tokenize("", 64).is_empty());
    }

    #[test]
    fn test_truncation() {
        let tokens = tokenize("a b c d e", 3);
        assert_eq!(tokens.argv, argv(&["a", "b", "c"]));
    }

    #[test]
    fn test_marker_past_cap_is_dropped() {
        let tokens = tokenize("a b c &", 3);
        assert_eq!(tokens.argv, argv(&["a", "b", "c"]));
        assert!(!tokens.background);
    }
}
