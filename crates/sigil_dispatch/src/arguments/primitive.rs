//! Boolean and bounded numeric argument types.

use futures::FutureExt;
use futures::future;
use sigil_foundation::{CommandResult, StringReader, builtin};

use super::{ArgumentSuggestions, ArgumentType};
use crate::context::CommandContext;
use crate::suggestion::{SuggestionFuture, SuggestionsBuilder};

/// Parses `true` or `false`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoolArgumentType;

/// Creates a boolean argument.
#[must_use]
pub fn boolean() -> BoolArgumentType {
    BoolArgumentType
}

impl ArgumentType for BoolArgumentType {
    type Value = bool;

    fn parse(&self, reader: &mut StringReader) -> CommandResult<bool> {
        reader.read_boolean()
    }

    fn examples(&self) -> Vec<String> {
        vec!["true".to_string(), "false".to_string()]
    }
}

impl<S> ArgumentSuggestions<S> for BoolArgumentType {
    fn list_suggestions(
        &self,
        _context: &CommandContext<S>,
        mut builder: SuggestionsBuilder,
    ) -> SuggestionFuture {
        for candidate in ["true", "false"] {
            if candidate.starts_with(builder.remaining_lowercase()) {
                builder.suggest(candidate);
            }
        }
        future::ready(builder.build()).boxed()
    }
}

/// Parses a 32-bit integer within inclusive bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntegerArgumentType {
    minimum: i32,
    maximum: i32,
}

impl IntegerArgumentType {
    /// Creates an integer argument accepting `minimum..=maximum`.
    #[must_use]
    pub const fn new(minimum: i32, maximum: i32) -> Self {
        Self { minimum, maximum }
    }

    /// Returns the lower bound.
    #[must_use]
    pub const fn minimum(&self) -> i32 {
        self.minimum
    }

    /// Returns the upper bound.
    #[must_use]
    pub const fn maximum(&self) -> i32 {
        self.maximum
    }
}

impl Default for IntegerArgumentType {
    fn default() -> Self {
        Self::new(i32::MIN, i32::MAX)
    }
}

/// Creates an unbounded integer argument.
#[must_use]
pub fn integer() -> IntegerArgumentType {
    IntegerArgumentType::default()
}

impl ArgumentType for IntegerArgumentType {
    type Value = i32;

    fn parse(&self, reader: &mut StringReader) -> CommandResult<i32> {
        let start = reader.cursor();
        let result = reader.read_int()?;
        if result < self.minimum {
            reader.set_cursor(start);
            return Err(builtin::INTEGER_TOO_LOW.create_with_context(reader, self.minimum, result));
        }
        if result > self.maximum {
            reader.set_cursor(start);
            return Err(builtin::INTEGER_TOO_HIGH.create_with_context(reader, self.maximum, result));
        }
        Ok(result)
    }

    fn examples(&self) -> Vec<String> {
        ["0", "123", "-123"].map(String::from).to_vec()
    }
}

impl<S> ArgumentSuggestions<S> for IntegerArgumentType {}

/// Parses a 64-bit integer within inclusive bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LongArgumentType {
    minimum: i64,
    maximum: i64,
}

impl LongArgumentType {
    /// Creates a long argument accepting `minimum..=maximum`.
    #[must_use]
    pub const fn new(minimum: i64, maximum: i64) -> Self {
        Self { minimum, maximum }
    }
}

impl Default for LongArgumentType {
    fn default() -> Self {
        Self::new(i64::MIN, i64::MAX)
    }
}

/// Creates an unbounded long argument.
#[must_use]
pub fn long() -> LongArgumentType {
    LongArgumentType::default()
}

impl ArgumentType for LongArgumentType {
    type Value = i64;

    fn parse(&self, reader: &mut StringReader) -> CommandResult<i64> {
        let start = reader.cursor();
        let result = reader.read_long()?;
        if result < self.minimum {
            reader.set_cursor(start);
            return Err(builtin::LONG_TOO_LOW.create_with_context(reader, self.minimum, result));
        }
        if result > self.maximum {
            reader.set_cursor(start);
            return Err(builtin::LONG_TOO_HIGH.create_with_context(reader, self.maximum, result));
        }
        Ok(result)
    }

    fn examples(&self) -> Vec<String> {
        ["0", "123", "-123"].map(String::from).to_vec()
    }
}

impl<S> ArgumentSuggestions<S> for LongArgumentType {}

/// Parses a 32-bit float within inclusive bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatArgumentType {
    minimum: f32,
    maximum: f32,
}

impl FloatArgumentType {
    /// Creates a float argument accepting `minimum..=maximum`.
    #[must_use]
    pub const fn new(minimum: f32, maximum: f32) -> Self {
        Self { minimum, maximum }
    }
}

impl Default for FloatArgumentType {
    fn default() -> Self {
        Self::new(f32::MIN, f32::MAX)
    }
}

/// Creates an unbounded float argument.
#[must_use]
pub fn float() -> FloatArgumentType {
    FloatArgumentType::default()
}

impl ArgumentType for FloatArgumentType {
    type Value = f32;

    fn parse(&self, reader: &mut StringReader) -> CommandResult<f32> {
        let start = reader.cursor();
        let result = reader.read_float()?;
        if result < self.minimum {
            reader.set_cursor(start);
            return Err(builtin::FLOAT_TOO_LOW.create_with_context(reader, self.minimum, result));
        }
        if result > self.maximum {
            reader.set_cursor(start);
            return Err(builtin::FLOAT_TOO_HIGH.create_with_context(reader, self.maximum, result));
        }
        Ok(result)
    }

    fn examples(&self) -> Vec<String> {
        ["0", "1.2", ".5", "-1", "-.5", "-1234.56"]
            .map(String::from)
            .to_vec()
    }
}

impl<S> ArgumentSuggestions<S> for FloatArgumentType {}

/// Parses a 64-bit float within inclusive bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DoubleArgumentType {
    minimum: f64,
    maximum: f64,
}

impl DoubleArgumentType {
    /// Creates a double argument accepting `minimum..=maximum`.
    #[must_use]
    pub const fn new(minimum: f64, maximum: f64) -> Self {
        Self { minimum, maximum }
    }

    /// Returns the lower bound.
    #[must_use]
    pub const fn minimum(&self) -> f64 {
        self.minimum
    }

    /// Returns the upper bound.
    #[must_use]
    pub const fn maximum(&self) -> f64 {
        self.maximum
    }
}

impl Default for DoubleArgumentType {
    fn default() -> Self {
        Self::new(f64::MIN, f64::MAX)
    }
}

/// Creates an unbounded double argument.
#[must_use]
pub fn double() -> DoubleArgumentType {
    DoubleArgumentType::default()
}

impl ArgumentType for DoubleArgumentType {
    type Value = f64;

    fn parse(&self, reader: &mut StringReader) -> CommandResult<f64> {
        let start = reader.cursor();
        let result = reader.read_double()?;
        if result < self.minimum {
            reader.set_cursor(start);
            return Err(builtin::DOUBLE_TOO_LOW.create_with_context(reader, self.minimum, result));
        }
        if result > self.maximum {
            reader.set_cursor(start);
            return Err(builtin::DOUBLE_TOO_HIGH.create_with_context(reader, self.maximum, result));
        }
        Ok(result)
    }

    fn examples(&self) -> Vec<String> {
        ["0", "1.2", ".5", "-1", "-.5", "-1234.56"]
            .map(String::from)
            .to_vec()
    }
}

impl<S> ArgumentSuggestions<S> for DoubleArgumentType {}
