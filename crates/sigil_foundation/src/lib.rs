//! String reader, ranges and syntax errors for Sigil.
//!
//! This crate provides:
//! - [`StringReader`] - Cursor over a command line with primitive token readers
//! - [`StringRange`] - Byte span into the command line
//! - [`CommandSyntaxError`] - Positioned syntax error shared by every parser
//! - Error factories ([`SimpleErrorType`], [`DynamicErrorType`], [`Dynamic2ErrorType`])
//! - [`builtin`] - The built-in error factories used by the reader and dispatcher

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod builtin;
pub mod error;
pub mod range;
pub mod reader;

pub use error::{
    CommandResult, CommandSyntaxError, Dynamic2ErrorType, DynamicErrorType, ErrorType, Message,
    SimpleErrorType,
};
pub use range::StringRange;
pub use reader::StringReader;
