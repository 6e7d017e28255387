//! Built-in error factories used by the reader, the primitive argument types
//! and the dispatcher.

use crate::error::{Dynamic2ErrorType, DynamicErrorType, SimpleErrorType};

// =============================================================================
// Numeric bounds
// =============================================================================

/// A double below its argument's minimum. Operands: minimum, found.
pub static DOUBLE_TOO_LOW: Dynamic2ErrorType = Dynamic2ErrorType::new(
    "argument.double.low",
    "Double must not be less than {}, found {}",
);
/// A double above its argument's maximum. Operands: maximum, found.
pub static DOUBLE_TOO_HIGH: Dynamic2ErrorType = Dynamic2ErrorType::new(
    "argument.double.big",
    "Double must not be more than {}, found {}",
);
/// A float below its argument's minimum.
pub static FLOAT_TOO_LOW: Dynamic2ErrorType = Dynamic2ErrorType::new(
    "argument.float.low",
    "Float must not be less than {}, found {}",
);
/// A float above its argument's maximum.
pub static FLOAT_TOO_HIGH: Dynamic2ErrorType = Dynamic2ErrorType::new(
    "argument.float.big",
    "Float must not be more than {}, found {}",
);
/// An integer below its argument's minimum.
pub static INTEGER_TOO_LOW: Dynamic2ErrorType = Dynamic2ErrorType::new(
    "argument.integer.low",
    "Integer must not be less than {}, found {}",
);
/// An integer above its argument's maximum.
pub static INTEGER_TOO_HIGH: Dynamic2ErrorType = Dynamic2ErrorType::new(
    "argument.integer.big",
    "Integer must not be more than {}, found {}",
);
/// A long below its argument's minimum.
pub static LONG_TOO_LOW: Dynamic2ErrorType = Dynamic2ErrorType::new(
    "argument.long.low",
    "Long must not be less than {}, found {}",
);
/// A long above its argument's maximum.
pub static LONG_TOO_HIGH: Dynamic2ErrorType = Dynamic2ErrorType::new(
    "argument.long.big",
    "Long must not be more than {}, found {}",
);

// =============================================================================
// Literals and reader
// =============================================================================

/// A literal node did not match.
pub static LITERAL_INCORRECT: DynamicErrorType =
    DynamicErrorType::new("argument.literal.incorrect", "Expected literal {}");

/// A quoted string was expected.
pub static READER_EXPECTED_START_OF_QUOTE: SimpleErrorType =
    SimpleErrorType::new("parsing.quote.expected.start", "Expected quote to start a string");
/// A quoted string was not closed.
pub static READER_EXPECTED_END_OF_QUOTE: SimpleErrorType =
    SimpleErrorType::new("parsing.quote.expected.end", "Unclosed quoted string");
/// An escape sequence other than the quote or backslash.
pub static READER_INVALID_ESCAPE: DynamicErrorType = DynamicErrorType::new(
    "parsing.quote.escape",
    "Invalid escape sequence '{}' in quoted string",
);
/// A token that is neither `true` nor `false`.
pub static READER_INVALID_BOOL: DynamicErrorType = DynamicErrorType::new(
    "parsing.bool.invalid",
    "Invalid bool, expected true or false but found '{}'",
);
/// A malformed integer.
pub static READER_INVALID_INT: DynamicErrorType =
    DynamicErrorType::new("parsing.int.invalid", "Invalid integer '{}'");
/// No integer present.
pub static READER_EXPECTED_INT: SimpleErrorType =
    SimpleErrorType::new("parsing.int.expected", "Expected integer");
/// A malformed long.
pub static READER_INVALID_LONG: DynamicErrorType =
    DynamicErrorType::new("parsing.long.invalid", "Invalid long '{}'");
/// No long present.
pub static READER_EXPECTED_LONG: SimpleErrorType =
    SimpleErrorType::new("parsing.long.expected", "Expected long");
/// A malformed double.
pub static READER_INVALID_DOUBLE: DynamicErrorType =
    DynamicErrorType::new("parsing.double.invalid", "Invalid double '{}'");
/// No double present.
pub static READER_EXPECTED_DOUBLE: SimpleErrorType =
    SimpleErrorType::new("parsing.double.expected", "Expected double");
/// A malformed float.
pub static READER_INVALID_FLOAT: DynamicErrorType =
    DynamicErrorType::new("parsing.float.invalid", "Invalid float '{}'");
/// No float present.
pub static READER_EXPECTED_FLOAT: SimpleErrorType =
    SimpleErrorType::new("parsing.float.expected", "Expected float");
/// No boolean present.
pub static READER_EXPECTED_BOOL: SimpleErrorType =
    SimpleErrorType::new("parsing.bool.expected", "Expected bool");
/// A specific character was expected.
pub static READER_EXPECTED_SYMBOL: DynamicErrorType =
    DynamicErrorType::new("parsing.expected", "Expected '{}'");

// =============================================================================
// Dispatcher
// =============================================================================

/// Nothing in the tree matched the input.
pub static DISPATCHER_UNKNOWN_COMMAND: SimpleErrorType =
    SimpleErrorType::new("command.unknown.command", "Unknown command");
/// A command matched but the following argument did not.
pub static DISPATCHER_UNKNOWN_ARGUMENT: SimpleErrorType =
    SimpleErrorType::new("command.unknown.argument", "Incorrect argument for command");
/// The input ended at a node without a command.
pub static DISPATCHER_INCOMPLETE_COMMAND: SimpleErrorType = SimpleErrorType::new(
    "command.incomplete",
    "Unknown or incomplete command, see below for error",
);
/// An argument was followed by something other than a separator.
pub static DISPATCHER_EXPECTED_ARGUMENT_SEPARATOR: SimpleErrorType = SimpleErrorType::new(
    "command.expected.separator",
    "Expected whitespace to end one argument, but found trailing data",
);
/// An argument parser failed outside the error taxonomy.
pub static DISPATCHER_PARSE_EXCEPTION: DynamicErrorType =
    DynamicErrorType::new("command.exception", "Could not parse command: {}");
