//! The entity and player argument types.

use std::fmt;
use std::sync::Arc;

use sigil_dispatch::{
    ArgumentSuggestions, ArgumentType, CommandContext, SuggestionFuture, SuggestionsBuilder,
};
use sigil_foundation::{CommandResult, StringReader};
use tracing::trace;

use super::entity_selector::EntitySelector;
use super::options::SelectorOptions;
use super::parser::EntitySelectorParser;
use super::{NO_ENTITY_FOUND, NO_PLAYER_FOUND, ONLY_PLAYERS_ALLOWED, TOO_MANY_ENTITIES, TOO_MANY_PLAYERS};
use crate::entity_type::EntityTypeRegistry;
use crate::source::{CommandSource, EntityRef, USE_SELECTORS};
use crate::suggest::suggest;

/// Parses an [`EntitySelector`], restricted to one result and/or to players.
#[derive(Clone)]
pub struct EntityArgument {
    single: bool,
    players_only: bool,
    options: Option<Arc<SelectorOptions>>,
    entity_types: Arc<EntityTypeRegistry>,
}

/// One entity.
#[must_use]
pub fn entity() -> EntityArgument {
    EntityArgument::new(true, false)
}

/// Any number of entities.
#[must_use]
pub fn entities() -> EntityArgument {
    EntityArgument::new(false, false)
}

/// One player.
#[must_use]
pub fn player() -> EntityArgument {
    EntityArgument::new(true, true)
}

/// Any number of players.
#[must_use]
pub fn players() -> EntityArgument {
    EntityArgument::new(false, true)
}

impl EntityArgument {
    fn new(single: bool, players_only: bool) -> Self {
        Self {
            single,
            players_only,
            options: None,
            entity_types: EntityTypeRegistry::shared_vanilla(),
        }
    }

    /// Uses a custom option registry instead of the standard one.
    #[must_use]
    pub fn with_options(mut self, options: Arc<SelectorOptions>) -> Self {
        self.options = Some(options);
        self
    }

    /// Uses a custom entity type registry instead of the vanilla one.
    #[must_use]
    pub fn with_entity_types(mut self, entity_types: Arc<EntityTypeRegistry>) -> Self {
        self.entity_types = entity_types;
        self
    }

    /// Returns true if at most one result is accepted.
    #[must_use]
    pub const fn is_single(&self) -> bool {
        self.single
    }

    /// Returns true if only players are accepted.
    #[must_use]
    pub const fn is_players_only(&self) -> bool {
        self.players_only
    }

    fn options(&self) -> &SelectorOptions {
        match self.options.as_deref() {
            Some(options) => options,
            None => SelectorOptions::standard_ref(),
        }
    }

    /// Returns the parsed selector.
    ///
    /// # Errors
    ///
    /// Fails if the argument is missing or has another type.
    pub fn get_selector<S>(context: &CommandContext<S>, name: &str) -> CommandResult<EntitySelector> {
        context.get_argument(name)
    }

    /// Resolves the argument to exactly one entity.
    ///
    /// # Errors
    ///
    /// Fails if nothing or more than one entity matches, or the source may
    /// not use selectors.
    pub fn get_entity<S: CommandSource>(context: &CommandContext<S>, name: &str) -> CommandResult<EntityRef> {
        Self::get_selector(context, name)?.find_single_entity(context.source())
    }

    /// Resolves the argument to at least one entity.
    ///
    /// # Errors
    ///
    /// Returns [`NO_ENTITY_FOUND`] if nothing matches.
    pub fn get_entities<S: CommandSource>(
        context: &CommandContext<S>,
        name: &str,
    ) -> CommandResult<Vec<EntityRef>> {
        let found = Self::get_optional_entities(context, name)?;
        if found.is_empty() {
            return Err(NO_ENTITY_FOUND.create());
        }
        Ok(found)
    }

    /// Resolves the argument to any number of entities, possibly none.
    ///
    /// # Errors
    ///
    /// Fails if the source may not use selectors.
    pub fn get_optional_entities<S: CommandSource>(
        context: &CommandContext<S>,
        name: &str,
    ) -> CommandResult<Vec<EntityRef>> {
        Self::get_selector(context, name)?.find_entities(context.source())
    }

    /// Resolves the argument to exactly one player.
    ///
    /// # Errors
    ///
    /// Returns [`NO_PLAYER_FOUND`] unless exactly one player matches.
    pub fn get_player<S: CommandSource>(context: &CommandContext<S>, name: &str) -> CommandResult<EntityRef> {
        Self::get_selector(context, name)?.find_single_player(context.source())
    }

    /// Resolves the argument to at least one player.
    ///
    /// # Errors
    ///
    /// Returns [`NO_PLAYER_FOUND`] if nothing matches.
    pub fn get_players<S: CommandSource>(
        context: &CommandContext<S>,
        name: &str,
    ) -> CommandResult<Vec<EntityRef>> {
        let found = Self::get_optional_players(context, name)?;
        if found.is_empty() {
            return Err(NO_PLAYER_FOUND.create());
        }
        Ok(found)
    }

    /// Resolves the argument to any number of players, possibly none.
    ///
    /// # Errors
    ///
    /// Fails if the source may not use selectors.
    pub fn get_optional_players<S: CommandSource>(
        context: &CommandContext<S>,
        name: &str,
    ) -> CommandResult<Vec<EntityRef>> {
        Self::get_selector(context, name)?.find_players(context.source())
    }
}

impl ArgumentType for EntityArgument {
    type Value = EntitySelector;

    fn parse(&self, reader: &mut StringReader) -> CommandResult<EntitySelector> {
        let start = reader.cursor();
        let selector =
            EntitySelectorParser::with_registries(reader, true, self.options(), &self.entity_types)
                .parse()?;
        if selector.max_results() > 1 && self.single {
            reader.set_cursor(start);
            let error = if self.players_only {
                &TOO_MANY_PLAYERS
            } else {
                &TOO_MANY_ENTITIES
            };
            return Err(error.create_with_context(reader));
        }
        if selector.includes_entities() && self.players_only && !selector.is_self_selector() {
            reader.set_cursor(start);
            return Err(ONLY_PLAYERS_ALLOWED.create_with_context(reader));
        }
        Ok(selector)
    }

    fn examples(&self) -> Vec<String> {
        vec![
            "Player".into(),
            "0123".into(),
            "@e".into(),
            "@e[type=pig]".into(),
            "dd12be42-52a9-4a91-a8a1-11c01849e498".into(),
        ]
    }
}

impl<S: CommandSource> ArgumentSuggestions<S> for EntityArgument {
    fn list_suggestions(
        &self,
        context: &CommandContext<S>,
        builder: SuggestionsBuilder,
    ) -> SuggestionFuture {
        let source = context.source();
        let mut reader = StringReader::new(builder.input());
        reader.set_cursor(builder.start());
        let allow_selectors = source.has_permission(USE_SELECTORS);
        let mut parser = EntitySelectorParser::with_registries(
            &mut reader,
            allow_selectors,
            self.options(),
            &self.entity_types,
        );
        if let Err(error) = parser.parse() {
            trace!(%error, "completing a partial selector");
        }

        let mut names = source.online_player_names();
        if !self.players_only {
            names.extend(source.selected_entities());
        }
        parser.fill_suggestions(&builder, |builder| suggest(&names, builder))
    }
}

impl fmt::Debug for EntityArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityArgument")
            .field("single", &self.single)
            .field("players_only", &self.players_only)
            .field("options", &self.options())
            .finish_non_exhaustive()
    }
}
