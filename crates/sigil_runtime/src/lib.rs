//! REPL, diagnostics and a demo world for Sigil.
//!
//! This crate provides:
//! - [`Repl`] - Interactive command prompt with tab completion
//! - [`Diagnostic`] - Human-readable rendering of command errors
//! - [`DemoWorld`] and [`DemoSource`] - An in-memory world to run commands against
//! - [`register_demo_commands`] - `say`, `tp`, `kill`, `list` and `execute`

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod commands;
pub mod config;
pub mod diagnostic;
pub mod editor;
pub mod error;
pub mod repl;
pub mod session;
pub mod world;

pub use commands::register_demo_commands;
pub use config::ReplConfig;
pub use diagnostic::Diagnostic;
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use error::{ReplError, Result};
pub use repl::Repl;
pub use session::{Outcome, Session};
pub use world::{DemoEntity, DemoSource, DemoWorld};
