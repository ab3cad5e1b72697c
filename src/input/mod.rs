mod completer;
pub mod history;
pub mod line_source;
pub mod tokenizer;

pub use completer::ShellHelper;
pub use history::History;
pub use line_source::{LineResult, LineSource, ReadlineSource, ScriptedSource};
pub use tokenizer::{tokenize, Tokens};
