//! Human-readable rendering of command errors.
//!
//! A [`Diagnostic`] carries the error message, the input and cursor it was
//! raised at, and the usages of the deepest node the parser reached:
//!
//! ```text
//! Incorrect argument for command
//! ...@e[type=pig<--[HERE]
//! Usage: tp @e[type=pig] <location>
//! ```

use std::fmt;

use sigil_dispatch::{CommandDispatcher, ParseResults};
use sigil_foundation::CommandSyntaxError;

/// Marker appended after the input context.
pub const HERE_MARKER: &str = "<--[HERE]";

/// A command error prepared for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    message: String,
    input: Option<String>,
    cursor: Option<usize>,
    usages: Vec<String>,
    context_width: usize,
}

impl Diagnostic {
    /// Creates a diagnostic from an error, with no usages.
    #[must_use]
    pub fn from_error(error: &CommandSyntaxError, context_width: usize) -> Self {
        Self {
            message: error.raw_message().to_string(),
            input: error.input().map(str::to_string),
            cursor: error.cursor(),
            usages: Vec::new(),
            context_width,
        }
    }

    /// Creates a diagnostic for an error raised while parsing or executing
    /// `parse`, listing the usages available after the last matched node.
    /// Each usage is prefixed with the input that led to that node.
    #[must_use]
    pub fn for_parse<S: Clone + 'static>(
        dispatcher: &CommandDispatcher<S>,
        parse: &ParseResults<S>,
        error: &CommandSyntaxError,
        context_width: usize,
    ) -> Self {
        let context = parse.context().last_child();
        let (node, end) = match context.nodes().last() {
            Some(parsed) => (parsed.node, parsed.range.end),
            None => (context.root_node(), context.range().start),
        };
        let prefix = parse
            .reader()
            .string()
            .get(..end)
            .unwrap_or_default()
            .trim_end();
        let usages = dispatcher
            .get_smart_usage(node, context.source())
            .into_iter()
            .map(|(_, usage)| {
                if prefix.is_empty() {
                    usage
                } else {
                    format!("{prefix} {usage}")
                }
            })
            .collect();
        Self::from_error(error, context_width).with_usages(usages)
    }

    /// Replaces the usages.
    #[must_use]
    pub fn with_usages(mut self, usages: Vec<String>) -> Self {
        self.usages = usages;
        self
    }

    /// Returns the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the input the error was raised against, if known.
    #[must_use]
    pub fn input(&self) -> Option<&str> {
        self.input.as_deref()
    }

    /// Returns the error position, if known.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Returns the suggested usages.
    #[must_use]
    pub fn usages(&self) -> &[String] {
        &self.usages
    }

    /// Returns up to `context_width` characters before the cursor followed
    /// by [`HERE_MARKER`], or `None` without a position.
    #[must_use]
    pub fn context(&self) -> Option<String> {
        let input = self.input.as_deref()?;
        let mut cursor = self.cursor?.min(input.len());
        while !input.is_char_boundary(cursor) {
            cursor -= 1;
        }
        let before = &input[..cursor];
        let count = before.chars().count();
        let mut out = String::new();
        if count > self.context_width {
            out.push_str("...");
        }
        out.extend(before.chars().skip(count.saturating_sub(self.context_width)));
        out.push_str(HERE_MARKER);
        Some(out)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(context) = self.context() {
            write!(f, "\n{context}")?;
        }
        for usage in &self.usages {
            write!(f, "\nUsage: {usage}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigil_dispatch::{argument, integer, literal};
    use sigil_foundation::builtin;

    fn dispatcher() -> CommandDispatcher<()> {
        let mut dispatcher = CommandDispatcher::new();
        dispatcher.register(
            literal("give")
                .then(argument("count", integer()).executes(|_| Ok(1)))
                .then(literal("all").executes(|_| Ok(2))),
        );
        dispatcher
    }

    #[test]
    fn context_is_truncated_to_width() {
        let error = builtin::DISPATCHER_UNKNOWN_COMMAND.create().at_cursor(0);
        assert_eq!(Diagnostic::from_error(&error, 10).context(), None);

        let error = CommandSyntaxError::with_context(
            builtin::DISPATCHER_UNKNOWN_COMMAND.create().message().clone(),
            "give everyone a cake",
            15,
        );
        let diagnostic = Diagnostic::from_error(&error, 10);
        assert_eq!(diagnostic.context().as_deref(), Some("...everyone a<--[HERE]"));
        assert_eq!(diagnostic.cursor(), Some(15));

        let narrow = Diagnostic::from_error(&error, 3);
        assert_eq!(narrow.context().as_deref(), Some("...e a<--[HERE]"));
    }

    #[test]
    fn short_input_has_no_ellipsis() {
        let error = CommandSyntaxError::with_context(
            builtin::DISPATCHER_UNKNOWN_COMMAND.create().message().clone(),
            "foo",
            0,
        );
        let diagnostic = Diagnostic::from_error(&error, 10);
        assert_eq!(diagnostic.context().as_deref(), Some("<--[HERE]"));
        assert_eq!(diagnostic.to_string(), "Unknown command\n<--[HERE]");
    }

    #[test]
    fn incomplete_command_lists_usages() {
        let dispatcher = dispatcher();
        let parse = dispatcher.parse("give", ());
        let error = dispatcher.execute(&parse).unwrap_err();
        let diagnostic = Diagnostic::for_parse(&dispatcher, &parse, &error, 10);
        assert_eq!(diagnostic.usages(), ["give <count>", "give all"]);
        assert!(diagnostic.to_string().ends_with("Usage: give <count>\nUsage: give all"));
    }

    #[test]
    fn unknown_command_lists_roots() {
        let dispatcher = dispatcher();
        let parse = dispatcher.parse("take 3", ());
        let error = dispatcher.execute(&parse).unwrap_err();
        let diagnostic = Diagnostic::for_parse(&dispatcher, &parse, &error, 10);
        assert_eq!(diagnostic.message(), "Unknown command");
        assert_eq!(diagnostic.usages(), ["give (<count>|all)"]);
    }
}
