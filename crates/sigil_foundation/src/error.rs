//! Syntax errors for command parsing.
//!
//! Uses `thiserror` for the error type itself. Every recoverable failure in
//! the reader, the dispatcher and the argument parsers is a
//! [`CommandSyntaxError`], produced by one of three stateless factory shapes:
//! [`SimpleErrorType`] (no operands), [`DynamicErrorType`] (one operand) and
//! [`Dynamic2ErrorType`] (two operands).

use std::fmt;

use thiserror::Error;

use crate::reader::StringReader;

/// Number of characters shown before the cursor when rendering error context.
pub const CONTEXT_AMOUNT: usize = 10;

/// Result alias used throughout the command system.
pub type CommandResult<T> = std::result::Result<T, CommandSyntaxError>;

/// A structured message: a translation key, its operands and the rendered text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    key: &'static str,
    args: Vec<String>,
    text: String,
}

impl Message {
    /// Creates a message from a key, a `{}` template and its operands.
    #[must_use]
    pub fn translatable(key: &'static str, template: &str, args: Vec<String>) -> Self {
        let text = fill_template(template, &args);
        Self { key, args, text }
    }

    /// Creates a message with no translation key.
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            key: "",
            args: Vec::new(),
            text: text.into(),
        }
    }

    /// Returns the translation key (empty for literal messages).
    #[must_use]
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Returns the operands substituted into the template.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Returns the rendered text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn fill_template(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut rest = template;
    while let Some(idx) = rest.find("{}") {
        out.push_str(&rest[..idx]);
        if let Some(arg) = args.next() {
            out.push_str(arg);
        }
        rest = &rest[idx + 2..];
    }
    out.push_str(rest);
    out
}

/// A positioned syntax error.
///
/// When `input` and `cursor` are present the error renders the ten characters
/// preceding the cursor followed by `<--[HERE]`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}{}", context_suffix(.input, .cursor))]
pub struct CommandSyntaxError {
    message: Message,
    input: Option<String>,
    cursor: Option<usize>,
}

impl CommandSyntaxError {
    /// Creates an error without position information.
    #[must_use]
    pub fn new(message: Message) -> Self {
        Self {
            message,
            input: None,
            cursor: None,
        }
    }

    /// Creates an error positioned at `cursor` within `input`.
    #[must_use]
    pub fn with_context(message: Message, input: impl Into<String>, cursor: usize) -> Self {
        Self {
            message,
            input: Some(input.into()),
            cursor: Some(cursor),
        }
    }

    /// Returns the same error repositioned at `cursor`.
    #[must_use]
    pub fn at_cursor(mut self, cursor: usize) -> Self {
        if self.input.is_some() {
            self.cursor = Some(cursor);
        }
        self
    }

    /// Returns the structured message.
    #[must_use]
    pub fn message(&self) -> &Message {
        &self.message
    }

    /// Returns the rendered message without position information.
    #[must_use]
    pub fn raw_message(&self) -> &str {
        self.message.text()
    }

    /// Returns the translation key identifying the error kind.
    #[must_use]
    pub fn key(&self) -> &'static str {
        self.message.key()
    }

    /// Returns true if this error was produced by the given factory.
    #[must_use]
    pub fn is(&self, error_type: &impl ErrorType) -> bool {
        self.message.key() == error_type.key()
    }

    /// Returns the input the error was raised against, if known.
    #[must_use]
    pub fn input(&self) -> Option<&str> {
        self.input.as_deref()
    }

    /// Returns the cursor position of the error, if known.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Returns the truncated input preceding the cursor, if positioned.
    #[must_use]
    pub fn context(&self) -> Option<String> {
        match (&self.input, self.cursor) {
            (Some(input), Some(cursor)) => Some(render_context(input, cursor)),
            _ => None,
        }
    }
}

fn context_suffix(input: &Option<String>, cursor: &Option<usize>) -> String {
    match (input, cursor) {
        (Some(input), Some(cursor)) => {
            format!(" at position {cursor}: {}", render_context(input, *cursor))
        }
        _ => String::new(),
    }
}

fn render_context(input: &str, cursor: usize) -> String {
    let mut cursor = cursor.min(input.len());
    while !input.is_char_boundary(cursor) {
        cursor -= 1;
    }
    let before = &input[..cursor];
    let count = before.chars().count();
    let mut out = String::new();
    if count > CONTEXT_AMOUNT {
        out.push_str("...");
    }
    out.extend(before.chars().skip(count.saturating_sub(CONTEXT_AMOUNT)));
    out.push_str("<--[HERE]");
    out
}

/// Common behaviour of the error factories.
pub trait ErrorType {
    /// The translation key shared by every error this factory creates.
    fn key(&self) -> &'static str;
}

/// Factory for errors with a fixed message.
#[derive(Clone, Copy, Debug)]
pub struct SimpleErrorType {
    key: &'static str,
    message: &'static str,
}

impl SimpleErrorType {
    /// Creates a factory.
    #[must_use]
    pub const fn new(key: &'static str, message: &'static str) -> Self {
        Self { key, message }
    }

    /// Creates an error without position information.
    #[must_use]
    pub fn create(&self) -> CommandSyntaxError {
        CommandSyntaxError::new(Message::translatable(self.key, self.message, Vec::new()))
    }

    /// Creates an error positioned at the reader's cursor.
    #[must_use]
    pub fn create_with_context(&self, reader: &StringReader) -> CommandSyntaxError {
        CommandSyntaxError::with_context(
            Message::translatable(self.key, self.message, Vec::new()),
            reader.string(),
            reader.cursor(),
        )
    }
}

impl ErrorType for SimpleErrorType {
    fn key(&self) -> &'static str {
        self.key
    }
}

/// Factory for errors whose message embeds one operand.
#[derive(Clone, Copy, Debug)]
pub struct DynamicErrorType {
    key: &'static str,
    template: &'static str,
}

impl DynamicErrorType {
    /// Creates a factory from a template with one `{}` placeholder.
    #[must_use]
    pub const fn new(key: &'static str, template: &'static str) -> Self {
        Self { key, template }
    }

    /// Creates an error without position information.
    #[must_use]
    pub fn create(&self, a: impl fmt::Display) -> CommandSyntaxError {
        CommandSyntaxError::new(self.message(a))
    }

    /// Creates an error positioned at the reader's cursor.
    #[must_use]
    pub fn create_with_context(
        &self,
        reader: &StringReader,
        a: impl fmt::Display,
    ) -> CommandSyntaxError {
        CommandSyntaxError::with_context(self.message(a), reader.string(), reader.cursor())
    }

    fn message(&self, a: impl fmt::Display) -> Message {
        Message::translatable(self.key, self.template, vec![a.to_string()])
    }
}

impl ErrorType for DynamicErrorType {
    fn key(&self) -> &'static str {
        self.key
    }
}

/// Factory for errors whose message embeds two operands.
#[derive(Clone, Copy, Debug)]
pub struct Dynamic2ErrorType {
    key: &'static str,
    template: &'static str,
}

impl Dynamic2ErrorType {
    /// Creates a factory from a template with two `{}` placeholders.
    #[must_use]
    pub const fn new(key: &'static str, template: &'static str) -> Self {
        Self { key, template }
    }

    /// Creates an error without position information.
    #[must_use]
    pub fn create(&self, a: impl fmt::Display, b: impl fmt::Display) -> CommandSyntaxError {
        CommandSyntaxError::new(self.message(a, b))
    }

    /// Creates an error positioned at the reader's cursor.
    #[must_use]
    pub fn create_with_context(
        &self,
        reader: &StringReader,
        a: impl fmt::Display,
        b: impl fmt::Display,
    ) -> CommandSyntaxError {
        CommandSyntaxError::with_context(self.message(a, b), reader.string(), reader.cursor())
    }

    fn message(&self, a: impl fmt::Display, b: impl fmt::Display) -> Message {
        Message::translatable(self.key, self.template, vec![a.to_string(), b.to_string()])
    }
}

impl ErrorType for Dynamic2ErrorType {
    fn key(&self) -> &'static str {
        self.key
    }
}
