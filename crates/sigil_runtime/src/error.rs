//! Errors raised by the REPL itself, as opposed to command errors.

use thiserror::Error;

/// Result alias for REPL operations.
pub type Result<T> = std::result::Result<T, ReplError>;

/// A failure of the REPL machinery.
#[derive(Debug, Error)]
pub enum ReplError {
    /// The line editor could not be created or failed while reading.
    #[error("line editor error: {0}")]
    Editor(#[from] rustyline::error::ReadlineError),

    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The demo world could not be built.
    #[error("failed to build the demo world: {0}")]
    World(#[from] sigil_foundation::CommandSyntaxError),
}
