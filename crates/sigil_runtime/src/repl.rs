//! The main REPL implementation.

use std::io::{self, Write};

use sigil_dispatch::NodeId;

use crate::config::ReplConfig;
use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::error::Result;
use crate::session::{Outcome, Session};

/// Lists every command the console can run.
const HELP_COMMAND: &str = ":help";

/// Leaves the REPL.
const QUIT_COMMAND: &str = ":quit";

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// Dispatcher, world and console source.
    session: Session,

    /// Prompt, prefix and display settings.
    config: ReplConfig,
}

impl Repl<RustylineEditor> {
    /// Creates a REPL over the sample world with the rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the world or the editor fails to initialize.
    pub fn new(config: ReplConfig) -> Result<Self> {
        let session = Session::new(&config)?;
        let editor = RustylineEditor::new(session.clone())?;
        Ok(Self::with_editor(editor, session, config))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a REPL with the given editor and session.
    pub fn with_editor(editor: E, session: Session, config: ReplConfig) -> Self {
        Self {
            editor,
            session,
            config,
        }
    }

    /// Returns the session.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Runs the REPL loop on stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub fn run(&mut self) -> Result<()> {
        let stdout = io::stdout();
        self.run_with(&mut stdout.lock())
    }

    /// Runs the REPL loop, writing all output to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub fn run_with<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if self.config.show_banner {
            self.print_banner(out)?;
        }

        loop {
            let line = match self.editor.read_line(&self.config.prompt)? {
                ReadResult::Line(line) => line,
                ReadResult::Interrupted => continue,
                ReadResult::Eof => break,
            };
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            self.editor.add_history(&line);
            if trimmed == QUIT_COMMAND {
                break;
            }
            self.eval_line(trimmed, out)?;
        }

        if self.config.show_banner {
            writeln!(out, "\nGoodbye!")?;
        }
        Ok(())
    }

    /// Runs one line and prints its feedback and any error.
    ///
    /// Returns true if the command succeeded.
    ///
    /// # Errors
    ///
    /// Returns an error if writing output fails.
    pub fn eval_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<bool> {
        if line == HELP_COMMAND {
            self.print_help(out)?;
            return Ok(true);
        }
        let Outcome { result, feedback } = self.session.execute(line);
        for message in &feedback {
            writeln!(out, "{message}")?;
        }
        match result {
            Ok(value) => {
                if feedback.is_empty() {
                    writeln!(out, "\x1b[2m=> {value}\x1b[0m")?;
                }
                Ok(true)
            }
            Err(diagnostic) => {
                writeln!(out, "\x1b[31m{diagnostic}\x1b[0m")?;
                Ok(false)
            }
        }
    }

    fn print_help<W: Write>(&self, out: &mut W) -> Result<()> {
        let dispatcher = self.session.dispatcher();
        for usage in dispatcher.get_all_usage(NodeId::ROOT, self.session.source(), true) {
            writeln!(out, "{usage}")?;
        }
        Ok(())
    }

    fn print_banner<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "\x1b[1;36mSigil v{}\x1b[0m", env!("CARGO_PKG_VERSION"))?;
        match self.config.prefix {
            Some(prefix) => writeln!(
                out,
                "Type commands, optionally prefixed with '{prefix}'. Tab completes."
            )?,
            None => writeln!(out, "Type commands. Tab completes.")?,
        }
        writeln!(out, "{HELP_COMMAND} lists commands, {QUIT_COMMAND} or Ctrl+D exits.\n")?;
        out.flush()?;
        Ok(())
    }
}
