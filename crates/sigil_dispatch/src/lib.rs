//! Command tree, dispatcher and typed arguments for Sigil.
//!
//! This crate provides:
//! - [`CommandDispatcher`] - Owns the command tree; parses, executes and completes input
//! - [`ArgumentBuilder`] - Fluent construction of literal, argument, option and flag nodes
//! - [`ArgumentType`] - Typed parsers plugged into argument nodes
//! - [`CommandContext`] - Parsed arguments and options handed to command handlers
//! - [`Suggestions`] / [`SuggestionsBuilder`] - Completion candidates
//!
//! A typical round trip:
//!
//! ```
//! use sigil_dispatch::{CommandDispatcher, argument, integer, literal};
//!
//! let mut dispatcher = CommandDispatcher::<()>::new();
//! dispatcher.register(
//!     literal("add").then(
//!         argument("a", integer()).then(
//!             argument("b", integer()).executes(|ctx| {
//!                 Ok(ctx.get_argument::<i32>("a")? + ctx.get_argument::<i32>("b")?)
//!             }),
//!         ),
//!     ),
//! );
//! assert_eq!(dispatcher.execute_command("add 2 3", ()).unwrap(), 5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod arguments;
pub mod builder;
pub mod config;
pub mod context;
pub mod dispatcher;
mod fuzz_tests;
pub mod suggestion;
pub mod tree;
mod usage;

pub use arguments::{
    ArgumentSuggestions, ArgumentType, ArgumentValue, BoolArgumentType, DoubleArgumentType,
    ErasedArgumentType, FloatArgumentType, IntegerArgumentType, LongArgumentType,
    StringArgumentType, StringKind, boolean, double, escape_if_required, float, greedy_string,
    integer, long, string, word,
};
pub use builder::{ArgumentBuilder, argument, flag, literal, option};
pub use config::DispatcherConfig;
pub use context::{CommandContext, CommandContextBuilder, ParsedArgument, ParsedCommandNode};
pub use dispatcher::{CommandDispatcher, ParseResults};
pub use suggestion::{Suggestion, SuggestionFuture, Suggestions, SuggestionsBuilder};
pub use tree::{
    ArgumentTarget, Command, CommandNode, NodeId, NodeKind, RedirectModifier, Requirement,
    ResultConsumer, SuggestionProvider,
};
