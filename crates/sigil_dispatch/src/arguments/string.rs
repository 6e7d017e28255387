//! String argument types.

use sigil_foundation::{CommandResult, StringReader};

use super::{ArgumentSuggestions, ArgumentType};

/// How much input a [`StringArgumentType`] consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StringKind {
    /// A single unquoted word.
    SingleWord,
    /// A word, or a quoted phrase.
    QuotablePhrase,
    /// Everything up to the end of input.
    GreedyPhrase,
}

/// Parses a string token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StringArgumentType {
    kind: StringKind,
}

/// Creates an argument reading one unquoted word.
#[must_use]
pub fn word() -> StringArgumentType {
    StringArgumentType {
        kind: StringKind::SingleWord,
    }
}

/// Creates an argument reading a word or a quoted phrase.
#[must_use]
pub fn string() -> StringArgumentType {
    StringArgumentType {
        kind: StringKind::QuotablePhrase,
    }
}

/// Creates an argument consuming the rest of the input.
#[must_use]
pub fn greedy_string() -> StringArgumentType {
    StringArgumentType {
        kind: StringKind::GreedyPhrase,
    }
}

impl StringArgumentType {
    /// Returns what this argument consumes.
    #[must_use]
    pub const fn kind(&self) -> StringKind {
        self.kind
    }
}

impl ArgumentType for StringArgumentType {
    type Value = String;

    fn parse(&self, reader: &mut StringReader) -> CommandResult<String> {
        match self.kind {
            StringKind::GreedyPhrase => Ok(reader.read_remaining()),
            StringKind::SingleWord => Ok(reader.read_unquoted_string()),
            StringKind::QuotablePhrase => reader.read_string(),
        }
    }

    fn examples(&self) -> Vec<String> {
        let examples: &[&str] = match self.kind {
            StringKind::SingleWord => &["word", "words_with_underscores"],
            StringKind::QuotablePhrase => &["\"quoted phrase\"", "word", "\"\""],
            StringKind::GreedyPhrase => &["word", "words with spaces", "\"and symbols\""],
        };
        examples.iter().map(ToString::to_string).collect()
    }
}

impl<S> ArgumentSuggestions<S> for StringArgumentType {}

/// Quotes `input` if it contains characters an unquoted string cannot hold.
#[must_use]
pub fn escape_if_required(input: &str) -> String {
    if input.chars().all(StringReader::is_allowed_in_unquoted_string) {
        return input.to_string();
    }
    let mut result = String::with_capacity(input.len() + 2);
    result.push('"');
    for c in input.chars() {
        if c == '\\' || c == '"' {
            result.push('\\');
        }
        result.push(c);
    }
    result.push('"');
    result
}
