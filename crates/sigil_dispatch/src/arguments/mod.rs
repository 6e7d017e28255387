//! Typed argument parsers.
//!
//! An [`ArgumentType`] consumes a token from the reader and produces a typed
//! value. Parsing is a pure function of the reader: it never sees the source,
//! so the same tree parses identically for every caller. Suggestions, which
//! may depend on the source, live in the separate [`ArgumentSuggestions`]
//! trait.
//!
//! Parsed values are stored type-erased in the context as [`ArgumentValue`]s
//! and recovered with [`CommandContext::get_argument`].

mod primitive;
mod string;

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use sigil_foundation::{CommandResult, StringReader};

use crate::context::CommandContext;
use crate::suggestion::{SuggestionFuture, Suggestions, SuggestionsBuilder};

pub use primitive::{
    BoolArgumentType, DoubleArgumentType, FloatArgumentType, IntegerArgumentType,
    LongArgumentType, boolean, double, float, integer, long,
};
pub use string::{StringArgumentType, StringKind, escape_if_required, greedy_string, string, word};

/// Parses one argument value from the reader.
pub trait ArgumentType: Send + Sync + 'static {
    /// The parsed value.
    type Value: Send + Sync + 'static;

    /// Consumes the argument's token.
    ///
    /// # Errors
    ///
    /// Returns a positioned syntax error if the token is malformed. The
    /// cursor position after a failure is unspecified; the dispatcher parses
    /// every alternative on its own copy of the reader.
    fn parse(&self, reader: &mut StringReader) -> CommandResult<Self::Value>;

    /// Returns sample inputs this type accepts, used for ambiguity detection.
    fn examples(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Completion support for an argument type, given a source type `S`.
pub trait ArgumentSuggestions<S>: ArgumentType {
    /// Lists suggestions for the partial token in `builder`.
    fn list_suggestions(
        &self,
        _context: &CommandContext<S>,
        _builder: SuggestionsBuilder,
    ) -> SuggestionFuture {
        Suggestions::empty_future()
    }
}

/// A parsed argument value with its type erased.
#[derive(Clone)]
pub struct ArgumentValue {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl ArgumentValue {
    /// Wraps a value.
    #[must_use]
    pub fn new<T: Send + Sync + 'static>(value: T) -> Self {
        Self {
            value: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Returns the value if it has type `T`.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Returns true if the value has type `T`.
    #[must_use]
    pub fn is<T: 'static>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Returns the name of the stored type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for ArgumentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentValue")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Object-safe view of an argument type, as stored in the tree.
///
/// Implemented for every [`ArgumentSuggestions`] type; there is no need to
/// implement it by hand.
pub trait ErasedArgumentType<S>: Send + Sync {
    /// Parses a value and wraps it.
    ///
    /// # Errors
    ///
    /// Returns the underlying parser's error.
    fn parse_value(&self, reader: &mut StringReader) -> CommandResult<ArgumentValue>;

    /// Lists suggestions for the partial token in `builder`.
    fn suggestions(&self, context: &CommandContext<S>, builder: SuggestionsBuilder)
    -> SuggestionFuture;

    /// Returns sample inputs.
    fn example_inputs(&self) -> Vec<String>;

    /// Returns the name of the parsed value's type.
    fn value_type_name(&self) -> &'static str;
}

impl<S, T> ErasedArgumentType<S> for T
where
    T: ArgumentSuggestions<S>,
{
    fn parse_value(&self, reader: &mut StringReader) -> CommandResult<ArgumentValue> {
        <T as ArgumentType>::parse(self, reader).map(ArgumentValue::new)
    }

    fn suggestions(
        &self,
        context: &CommandContext<S>,
        builder: SuggestionsBuilder,
    ) -> SuggestionFuture {
        <T as ArgumentSuggestions<S>>::list_suggestions(self, context, builder)
    }

    fn example_inputs(&self) -> Vec<String> {
        <T as ArgumentType>::examples(self)
    }

    fn value_type_name(&self) -> &'static str {
        std::any::type_name::<T::Value>()
    }
}
