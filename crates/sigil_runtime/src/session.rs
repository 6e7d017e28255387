//! A dispatcher, a world and the console source, bundled for the REPL.

use std::sync::Arc;

use futures::executor::block_on;
use sigil_dispatch::{CommandDispatcher, Suggestions};
use sigil_foundation::builtin;
use tracing::debug;

use crate::commands::register_demo_commands;
use crate::config::ReplConfig;
use crate::diagnostic::Diagnostic;
use crate::error::Result;
use crate::world::{DemoSource, DemoWorld};

/// What running one line produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    /// The command's result, or the diagnostic explaining its failure.
    pub result: std::result::Result<i32, Diagnostic>,
    /// Feedback lines the command sent.
    pub feedback: Vec<String>,
}

/// Command state shared by the REPL loop and the completer.
///
/// Cloning is cheap: the dispatcher and world are shared.
#[derive(Clone, Debug)]
pub struct Session {
    dispatcher: Arc<CommandDispatcher<DemoSource>>,
    world: Arc<DemoWorld>,
    source: DemoSource,
    prefix: Option<char>,
    context_width: usize,
}

impl Session {
    /// Creates a session over the sample world with the demo commands.
    ///
    /// # Errors
    ///
    /// Returns an error if the sample world cannot be built.
    pub fn new(config: &ReplConfig) -> Result<Self> {
        let world = Arc::new(DemoWorld::sample()?);
        let mut dispatcher = CommandDispatcher::new();
        register_demo_commands(&mut dispatcher);
        Ok(Self::with_dispatcher(dispatcher, world, config))
    }

    /// Creates a session from parts; commands run as the console of `world`.
    #[must_use]
    pub fn with_dispatcher(
        dispatcher: CommandDispatcher<DemoSource>,
        world: Arc<DemoWorld>,
        config: &ReplConfig,
    ) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            source: DemoSource::console(Arc::clone(&world)),
            world,
            prefix: config.prefix,
            context_width: config.context_width,
        }
    }

    /// Returns the dispatcher.
    #[must_use]
    pub fn dispatcher(&self) -> &CommandDispatcher<DemoSource> {
        &self.dispatcher
    }

    /// Returns the world.
    #[must_use]
    pub fn world(&self) -> &Arc<DemoWorld> {
        &self.world
    }

    /// Returns the source commands run as.
    #[must_use]
    pub fn source(&self) -> &DemoSource {
        &self.source
    }

    /// Splits the optional prefix off `line`, returning its byte length and
    /// the command text.
    #[must_use]
    pub fn strip_prefix<'a>(&self, line: &'a str) -> (usize, &'a str) {
        match self.prefix {
            Some(prefix) if line.starts_with(prefix) => {
                let len = prefix.len_utf8();
                (len, &line[len..])
            }
            _ => (0, line),
        }
    }

    /// Parses and runs one line.
    pub fn execute(&self, line: &str) -> Outcome {
        let (_, command) = self.strip_prefix(line);
        let parse = self.dispatcher.parse(command, self.source.clone());
        let result = self.dispatcher.execute(&parse).map_err(|error| {
            debug!(command, %error, "command failed");
            let from_handler =
                parse.is_complete() && !error.is(&builtin::DISPATCHER_INCOMPLETE_COMMAND);
            if from_handler {
                Diagnostic::from_error(&error, self.context_width)
            } else {
                Diagnostic::for_parse(&self.dispatcher, &parse, &error, self.context_width)
            }
        });
        Outcome {
            result,
            feedback: self.source.take_feedback(),
        }
    }

    /// Computes completions for `line` with the cursor at byte `pos`.
    ///
    /// Returns the byte offset in `line` the suggestions replace from, and
    /// the suggestions themselves.
    #[must_use]
    pub fn complete(&self, line: &str, pos: usize) -> (usize, Suggestions) {
        let mut pos = pos.min(line.len());
        while !line.is_char_boundary(pos) {
            pos -= 1;
        }
        let (offset, command) = self.strip_prefix(&line[..pos]);
        let parse = self.dispatcher.parse(command, self.source.clone());
        let suggestions = block_on(self.dispatcher.get_completion_suggestions(&parse));
        (offset + suggestions.range().start, suggestions)
    }
}
