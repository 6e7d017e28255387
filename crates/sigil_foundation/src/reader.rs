//! Cursor-based reader over a command line.
//!
//! The reader is the only way parsers consume input. Every primitive reader
//! either advances past exactly the text it accepted or fails with a
//! positioned [`CommandSyntaxError`]; failures on malformed tokens restore the
//! cursor to where the token started so the caller can try another branch.

use std::str::FromStr;
use std::sync::Arc;

use crate::builtin;
use crate::error::{CommandResult, DynamicErrorType, SimpleErrorType};

const SYNTAX_ESCAPE: char = '\\';
const SYNTAX_DOUBLE_QUOTE: char = '"';
const SYNTAX_SINGLE_QUOTE: char = '\'';

/// A cursor over an immutable input string.
///
/// The cursor is a byte offset and always sits on a `char` boundary. Cloning
/// is cheap: the text is shared, only the cursor is copied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StringReader {
    string: Arc<str>,
    cursor: usize,
}

impl StringReader {
    /// Creates a reader positioned at the start of `input`.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            string: Arc::from(input),
            cursor: 0,
        }
    }

    /// Returns the full input.
    #[must_use]
    pub fn string(&self) -> &str {
        &self.string
    }

    /// Returns the current cursor position.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor, clamped to the end of the input.
    pub fn set_cursor(&mut self, cursor: usize) {
        let mut cursor = cursor.min(self.string.len());
        while !self.string.is_char_boundary(cursor) {
            cursor -= 1;
        }
        self.cursor = cursor;
    }

    /// Returns the number of bytes left to read.
    #[must_use]
    pub fn remaining_length(&self) -> usize {
        self.string.len() - self.cursor
    }

    /// Returns the length of the whole input.
    #[must_use]
    pub fn total_length(&self) -> usize {
        self.string.len()
    }

    /// Returns the input consumed so far.
    #[must_use]
    pub fn read_portion(&self) -> &str {
        &self.string[..self.cursor]
    }

    /// Returns the input not consumed yet.
    #[must_use]
    pub fn remaining(&self) -> &str {
        &self.string[self.cursor..]
    }

    /// Returns the input between two byte offsets.
    #[must_use]
    pub fn substring(&self, start: usize, end: usize) -> &str {
        &self.string[start.min(end)..end.min(self.string.len())]
    }

    /// Returns true if at least `length` more bytes can be read.
    #[must_use]
    pub fn can_read_n(&self, length: usize) -> bool {
        self.cursor + length <= self.string.len()
    }

    /// Returns true if anything is left to read.
    #[must_use]
    pub fn can_read(&self) -> bool {
        self.can_read_n(1)
    }

    /// Returns the next character without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Returns the character `offset` characters ahead without consuming it.
    #[must_use]
    pub fn peek_at(&self, offset: usize) -> Option<char> {
        self.remaining().chars().nth(offset)
    }

    /// Consumes and returns the next character.
    pub fn read(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.cursor += c.len_utf8();
        Some(c)
    }

    /// Skips the next character, if any.
    pub fn skip(&mut self) {
        let _ = self.read();
    }

    /// Returns true for characters that may appear in a number token.
    #[must_use]
    pub const fn is_allowed_number(c: char) -> bool {
        c.is_ascii_digit() || c == '.' || c == '-'
    }

    /// Returns true for characters that open a quoted string.
    #[must_use]
    pub const fn is_quoted_string_start(c: char) -> bool {
        c == SYNTAX_DOUBLE_QUOTE || c == SYNTAX_SINGLE_QUOTE
    }

    /// Returns true for characters accepted by [`Self::read_unquoted_string`].
    #[must_use]
    pub const fn is_allowed_in_unquoted_string(c: char) -> bool {
        c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+')
    }

    /// Skips any whitespace at the cursor.
    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.skip();
        }
    }

    fn read_number<T: FromStr>(
        &mut self,
        expected: &SimpleErrorType,
        invalid: &DynamicErrorType,
    ) -> CommandResult<T> {
        let start = self.cursor;
        while self.peek().is_some_and(Self::is_allowed_number) {
            self.skip();
        }
        let number = &self.string[start..self.cursor];
        if number.is_empty() {
            return Err(expected.create_with_context(self));
        }
        match number.parse::<T>() {
            Ok(value) => Ok(value),
            Err(_) => {
                let number = number.to_string();
                self.cursor = start;
                Err(invalid.create_with_context(self, number))
            }
        }
    }

    /// Reads a 32-bit integer.
    ///
    /// # Errors
    ///
    /// Fails if no number characters are present or they do not form an integer.
    pub fn read_int(&mut self) -> CommandResult<i32> {
        self.read_number(
            &builtin::READER_EXPECTED_INT,
            &builtin::READER_INVALID_INT,
        )
    }

    /// Reads a 64-bit integer.
    ///
    /// # Errors
    ///
    /// Fails if no number characters are present or they do not form an integer.
    pub fn read_long(&mut self) -> CommandResult<i64> {
        self.read_number(
            &builtin::READER_EXPECTED_LONG,
            &builtin::READER_INVALID_LONG,
        )
    }

    /// Reads a double-precision float.
    ///
    /// # Errors
    ///
    /// Fails if no number characters are present or they do not form a number.
    pub fn read_double(&mut self) -> CommandResult<f64> {
        self.read_number(
            &builtin::READER_EXPECTED_DOUBLE,
            &builtin::READER_INVALID_DOUBLE,
        )
    }

    /// Reads a single-precision float.
    ///
    /// # Errors
    ///
    /// Fails if no number characters are present or they do not form a number.
    pub fn read_float(&mut self) -> CommandResult<f32> {
        self.read_number(
            &builtin::READER_EXPECTED_FLOAT,
            &builtin::READER_INVALID_FLOAT,
        )
    }

    /// Reads `[0-9A-Za-z_.+-]*`. Never fails; may return an empty string.
    pub fn read_unquoted_string(&mut self) -> String {
        let start = self.cursor;
        while self.peek().is_some_and(Self::is_allowed_in_unquoted_string) {
            self.skip();
        }
        self.string[start..self.cursor].to_string()
    }

    /// Reads a string delimited by `"` or `'`.
    ///
    /// Returns an empty string at end of input.
    ///
    /// # Errors
    ///
    /// Fails if the next character is not a quote, or the quoted string is
    /// malformed.
    pub fn read_quoted_string(&mut self) -> CommandResult<String> {
        let Some(next) = self.peek() else {
            return Ok(String::new());
        };
        if !Self::is_quoted_string_start(next) {
            return Err(builtin::READER_EXPECTED_START_OF_QUOTE.create_with_context(self));
        }
        self.skip();
        self.read_string_until(next)
    }

    /// Reads up to (and consumes) `terminator`, resolving escapes.
    ///
    /// Only the terminator and the escape character itself may be escaped.
    ///
    /// # Errors
    ///
    /// Fails on an invalid escape or when the input ends before the
    /// terminator. Unlike the numeric and boolean readers this does not
    /// restore the cursor: it is left on the offending escaped character, or
    /// at the end of input, so the error context points at the problem.
    pub fn read_string_until(&mut self, terminator: char) -> CommandResult<String> {
        let mut result = String::new();
        let mut escaped = false;
        while let Some(c) = self.read() {
            if escaped {
                if c == terminator || c == SYNTAX_ESCAPE {
                    result.push(c);
                    escaped = false;
                } else {
                    self.cursor -= c.len_utf8();
                    return Err(builtin::READER_INVALID_ESCAPE.create_with_context(self, c));
                }
            } else if c == SYNTAX_ESCAPE {
                escaped = true;
            } else if c == terminator {
                return Ok(result);
            } else {
                result.push(c);
            }
        }
        Err(builtin::READER_EXPECTED_END_OF_QUOTE.create_with_context(self))
    }

    /// Reads a quoted string if one starts at the cursor, else an unquoted one.
    ///
    /// # Errors
    ///
    /// Fails if a quoted string is malformed.
    pub fn read_string(&mut self) -> CommandResult<String> {
        match self.peek() {
            None => Ok(String::new()),
            Some(next) if Self::is_quoted_string_start(next) => {
                self.skip();
                self.read_string_until(next)
            }
            Some(_) => Ok(self.read_unquoted_string()),
        }
    }

    /// Reads `true` or `false`.
    ///
    /// # Errors
    ///
    /// Fails when nothing is present or the token is not a boolean; in the
    /// latter case the cursor is restored.
    pub fn read_boolean(&mut self) -> CommandResult<bool> {
        let start = self.cursor;
        let value = self.read_string()?;
        if value.is_empty() {
            return Err(builtin::READER_EXPECTED_BOOL.create_with_context(self));
        }
        match value.as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => {
                self.cursor = start;
                Err(builtin::READER_INVALID_BOOL.create_with_context(self, value))
            }
        }
    }

    /// Consumes everything up to the end of input.
    pub fn read_remaining(&mut self) -> String {
        let text = self.remaining().to_string();
        self.cursor = self.string.len();
        text
    }

    /// Consumes `c` or fails.
    ///
    /// # Errors
    ///
    /// Fails if the next character is not `c`.
    pub fn expect(&mut self, c: char) -> CommandResult<()> {
        if self.peek() != Some(c) {
            return Err(builtin::READER_EXPECTED_SYMBOL.create_with_context(self, c));
        }
        self.skip();
        Ok(())
    }
}

impl From<&str> for StringReader {
    fn from(input: &str) -> Self {
        Self::new(input)
    }
}
