use inksac::prelude::*;

use crate::core::commands::BUILTIN_NAMES;
use crate::input::tokenizer::BACKGROUND_MARKER;

#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    pub fn plain() -> Self {
        Self {
            color_support: ColorSupport::NoColor,
        }
    }

    fn enabled(&self) -> bool {
        !matches!(self.color_support, ColorSupport::NoColor)
    }

    /// Colours each word of `input` in place; whitespace is copied through
    /// untouched so the rendered line lines up with the edit buffer.
    pub fn highlight_command(&self, input: &str) -> String {
        if !self.enabled() {
            return input.to_string();
        }

        let words = word_spans(input);
        let mut highlighted = String::with_capacity(input.len() * 2);
        let mut copied = 0;

        for (i, &(start, end)) in words.iter().enumerate() {
            highlighted.push_str(&input[copied..start]);
            let word = &input[start..end];
            let is_last = i + 1 == words.len();
            highlighted.push_str(&self.style_word(word, i == 0, is_last));
            copied = end;
        }
        highlighted.push_str(&input[copied..]);
        highlighted
    }

    fn style_word(&self, word: &str, is_first: bool, is_last: bool) -> String {
        let style = if is_first {
            if BUILTIN_NAMES.contains(&word) {
                Style::builder().foreground(Color::Cyan).bold().build()
            } else {
                Style::builder().foreground(Color::Cyan).build()
            }
        } else if is_last && word == BACKGROUND_MARKER {
            Style::builder().foreground(Color::Magenta).bold().build()
        } else if word.starts_with('-') {
            Style::builder().foreground(Color::Yellow).build()
        } else {
            return word.to_string();
        };
        word.style(style).to_string()
    }

    pub fn highlight_error(&self, error: &str) -> String {
        if !self.enabled() {
            return error.to_string();
        }

        let error_style = Style::builder().foreground(Color::Red).bold().build();
        error.style(error_style).to_string()
    }
}

/// Byte ranges of the whitespace-separated words in `input`.
fn word_spans(input: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = None;

    for (i, c) in input.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                spans.push((s, i));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        spans.push((s, input.len()));
    }
    spans
}
