//! Player game modes.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use sigil_dispatch::{
    ArgumentSuggestions, ArgumentType, CommandContext, SuggestionFuture, SuggestionsBuilder,
};
use sigil_foundation::{CommandResult, DynamicErrorType, StringReader};

use crate::suggest::suggest;

/// The game mode name is not known. Operand: the name.
pub static GAME_MODE_INVALID: DynamicErrorType =
    DynamicErrorType::new("argument.gamemode.invalid", "Unknown game mode: {}");

/// How a player interacts with the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GameMode {
    /// Normal play.
    Survival,
    /// Unlimited resources, flight.
    Creative,
    /// Survival without block breaking.
    Adventure,
    /// Invisible, no-clip observer.
    Spectator,
}

impl GameMode {
    /// Every game mode, in id order.
    pub const ALL: [GameMode; 4] = [
        GameMode::Survival,
        GameMode::Creative,
        GameMode::Adventure,
        GameMode::Spectator,
    ];

    /// Returns the lowercase name used in commands.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            GameMode::Survival => "survival",
            GameMode::Creative => "creative",
            GameMode::Adventure => "adventure",
            GameMode::Spectator => "spectator",
        }
    }

    /// Looks up a game mode by its exact name.
    #[must_use]
    pub fn by_name(name: &str) -> Option<GameMode> {
        Self::ALL.into_iter().find(|mode| mode.name() == name)
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses a [`GameMode`] name.
#[derive(Clone, Copy, Debug, Default)]
pub struct GameModeArgument;

/// Creates a game mode argument.
#[must_use]
pub fn game_mode() -> GameModeArgument {
    GameModeArgument
}

impl GameModeArgument {
    /// Returns the game mode parsed for `name`.
    ///
    /// # Errors
    ///
    /// Fails if the argument is missing or has another type.
    pub fn get_game_mode<S>(context: &CommandContext<S>, name: &str) -> CommandResult<GameMode> {
        context.get_argument(name)
    }
}

impl ArgumentType for GameModeArgument {
    type Value = GameMode;

    fn parse(&self, reader: &mut StringReader) -> CommandResult<GameMode> {
        let start = reader.cursor();
        let name = reader.read_unquoted_string();
        GameMode::by_name(&name).ok_or_else(|| {
            reader.set_cursor(start);
            GAME_MODE_INVALID.create_with_context(reader, name)
        })
    }

    fn examples(&self) -> Vec<String> {
        vec!["survival".into(), "creative".into()]
    }
}

impl<S> ArgumentSuggestions<S> for GameModeArgument {
    fn list_suggestions(
        &self,
        _context: &CommandContext<S>,
        mut builder: SuggestionsBuilder,
    ) -> SuggestionFuture {
        suggest(GameMode::ALL.iter().map(|mode| mode.name()), &mut builder);
        builder.build_future()
    }
}
