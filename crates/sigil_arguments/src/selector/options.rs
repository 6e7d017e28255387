//! The registry of `[key=value]` selector options.
//!
//! Each option pairs a handler that consumes its value from the parser's
//! reader with a guard deciding whether the option may appear given what has
//! been parsed so far. Guards are what reject `limit` twice, `sort` on `@s`
//! or `type` on `@a`.

use std::fmt;
use std::sync::{Arc, LazyLock};

use indexmap::{IndexMap, IndexSet};
use sigil_dispatch::SuggestionsBuilder;
use sigil_foundation::CommandResult;
use tracing::debug;

use super::entity_selector::SelectorOrder;
use super::parser::{EntitySelectorParser, SelectorSuggestions};
use super::{
    DISTANCE_NEGATIVE, ENTITY_TYPE_INVALID, GAME_MODE_UNKNOWN, INAPPLICABLE_OPTION,
    LEVEL_NEGATIVE, LIMIT_TOO_SMALL, SORT_UNKNOWN,
};
use crate::bounds::{DoubleBounds, IntBounds, WrappedBounds};
use crate::entity_type::player_type;
use crate::game_mode::GameMode;
use crate::resource::ResourceLocation;
use crate::source::Entity;

/// Consumes an option's value and updates the parser.
pub type OptionHandler = Arc<dyn Fn(&mut EntitySelectorParser<'_>) -> CommandResult<()> + Send + Sync>;

/// Decides whether an option may appear in the current parser state.
pub type OptionGuard = Arc<dyn Fn(&EntitySelectorParser<'_>) -> bool + Send + Sync>;

static STANDARD: LazyLock<SelectorOptions> = LazyLock::new(SelectorOptions::standard);

/// One registered option.
#[derive(Clone)]
pub struct SelectorOption {
    handler: OptionHandler,
    guard: OptionGuard,
    tooltip: String,
}

impl SelectorOption {
    /// Returns true if the option may appear now.
    #[must_use]
    pub fn is_applicable(&self, parser: &EntitySelectorParser<'_>) -> bool {
        (self.guard)(parser)
    }

    /// Parses the option's value.
    ///
    /// # Errors
    ///
    /// Propagates the handler's error.
    pub fn handle(&self, parser: &mut EntitySelectorParser<'_>) -> CommandResult<()> {
        (self.handler)(parser)
    }

    /// Text shown next to the key in completions.
    #[must_use]
    pub fn tooltip(&self) -> &str {
        &self.tooltip
    }
}

/// Option name to handler table.
#[derive(Clone, Default)]
pub struct SelectorOptions {
    options: IndexMap<String, SelectorOption>,
}

impl SelectorOptions {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the shared registry of standard options.
    #[must_use]
    pub fn standard_ref() -> &'static SelectorOptions {
        &STANDARD
    }

    /// Registers an option, replacing any option with the same name.
    pub fn register<H, G>(
        &mut self,
        name: impl Into<String>,
        handler: H,
        guard: G,
        tooltip: impl Into<String>,
    ) -> &mut Self
    where
        H: Fn(&mut EntitySelectorParser<'_>) -> CommandResult<()> + Send + Sync + 'static,
        G: Fn(&EntitySelectorParser<'_>) -> bool + Send + Sync + 'static,
    {
        let name = name.into();
        debug!(option = %name, "registering selector option");
        self.options.insert(
            name,
            SelectorOption {
                handler: Arc::new(handler),
                guard: Arc::new(guard),
                tooltip: tooltip.into(),
            },
        );
        self
    }

    /// Looks up an option by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SelectorOption> {
        self.options.get(name)
    }

    /// Iterates option names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.options.keys().map(String::as_str)
    }

    /// Number of registered options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Returns true if no option is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Suggests `key=` for every applicable option starting with the partial
    /// token.
    pub fn suggest_names(&self, parser: &EntitySelectorParser<'_>, builder: &mut SuggestionsBuilder) {
        let remaining = builder.remaining_lowercase().to_string();
        for (name, option) in &self.options {
            if option.is_applicable(parser) && name.to_lowercase().starts_with(&remaining) {
                builder.suggest_with_tooltip(format!("{name}="), option.tooltip.clone());
            }
        }
    }

    /// Creates a registry holding the standard options.
    #[must_use]
    pub fn standard() -> Self {
        let mut options = Self::new();
        options
            .register("name", parse_name, |p| !p.has_name_equals, "Entity name")
            .register("distance", parse_distance, |p| p.distance.is_any(), "Distance to entity")
            .register("level", parse_level, |p| p.level.is_any(), "Experience level")
            .register(
                "x",
                |p| {
                    p.world_limited = true;
                    p.x = Some(p.reader.read_double()?);
                    Ok(())
                },
                |p| p.x.is_none(),
                "x position",
            )
            .register(
                "y",
                |p| {
                    p.world_limited = true;
                    p.y = Some(p.reader.read_double()?);
                    Ok(())
                },
                |p| p.y.is_none(),
                "y position",
            )
            .register(
                "z",
                |p| {
                    p.world_limited = true;
                    p.z = Some(p.reader.read_double()?);
                    Ok(())
                },
                |p| p.z.is_none(),
                "z position",
            )
            .register(
                "dx",
                |p| {
                    p.world_limited = true;
                    p.dx = Some(p.reader.read_double()?);
                    Ok(())
                },
                |p| p.dx.is_none(),
                "Entities between x and x + dx",
            )
            .register(
                "dy",
                |p| {
                    p.world_limited = true;
                    p.dy = Some(p.reader.read_double()?);
                    Ok(())
                },
                |p| p.dy.is_none(),
                "Entities between y and y + dy",
            )
            .register(
                "dz",
                |p| {
                    p.world_limited = true;
                    p.dz = Some(p.reader.read_double()?);
                    Ok(())
                },
                |p| p.dz.is_none(),
                "Entities between z and z + dz",
            )
            .register(
                "x_rotation",
                |p| {
                    p.x_rotation = WrappedBounds::read(p.reader, true)?;
                    Ok(())
                },
                |p| p.x_rotation.is_any(),
                "Entity's x rotation",
            )
            .register(
                "y_rotation",
                |p| {
                    p.y_rotation = WrappedBounds::read(p.reader, true)?;
                    Ok(())
                },
                |p| p.y_rotation.is_any(),
                "Entity's y rotation",
            )
            .register(
                "limit",
                parse_limit,
                |p| !p.current_entity && !p.limited,
                "Maximum number of entities to return",
            )
            .register(
                "sort",
                parse_sort,
                |p| !p.current_entity && !p.sorted,
                "Sort the entities",
            )
            .register("gamemode", parse_game_mode, |p| !p.has_gamemode_equals, "Players with game mode")
            .register("team", parse_team, |p| !p.has_team_equals, "Entities on team")
            .register("type", parse_type, |p| p.type_limit.is_none(), "Entities of type")
            .register("tag", parse_tag, |_| true, "Entity tag")
            .register("scores", parse_scores, |p| !p.has_scores, "Scores")
            .register("advancements", parse_advancements, |p| !p.has_advancements, "Player advancements")
            .register("predicate", parse_predicate, |_| true, "Predicate");
        options
    }
}

impl fmt::Debug for SelectorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

fn inapplicable(parser: &mut EntitySelectorParser<'_>, start: usize, key: &str) -> CommandResult<()> {
    parser.reader.set_cursor(start);
    Err(INAPPLICABLE_OPTION.create_with_context(parser.reader, key))
}

fn parse_name(parser: &mut EntitySelectorParser<'_>) -> CommandResult<()> {
    let start = parser.reader.cursor();
    let invert = parser.should_invert_value();
    let name = parser.reader.read_string()?;
    if parser.has_name_not_equals && !invert {
        return inapplicable(parser, start, "name");
    }
    if invert {
        parser.has_name_not_equals = true;
    } else {
        parser.has_name_equals = true;
    }
    parser.add_predicate(move |entity| (entity.name() == name) != invert);
    Ok(())
}

fn parse_distance(parser: &mut EntitySelectorParser<'_>) -> CommandResult<()> {
    let start = parser.reader.cursor();
    let bounds = DoubleBounds::read(parser.reader)?;
    if bounds.min.is_some_and(|min| min < 0.0) || bounds.max.is_some_and(|max| max < 0.0) {
        parser.reader.set_cursor(start);
        return Err(DISTANCE_NEGATIVE.create_with_context(parser.reader));
    }
    parser.distance = bounds;
    parser.world_limited = true;
    Ok(())
}

fn parse_level(parser: &mut EntitySelectorParser<'_>) -> CommandResult<()> {
    let start = parser.reader.cursor();
    let bounds = IntBounds::read(parser.reader)?;
    if bounds.min.is_some_and(|min| min < 0) || bounds.max.is_some_and(|max| max < 0) {
        parser.reader.set_cursor(start);
        return Err(LEVEL_NEGATIVE.create_with_context(parser.reader));
    }
    parser.level = bounds;
    parser.includes_entities = false;
    Ok(())
}

fn parse_limit(parser: &mut EntitySelectorParser<'_>) -> CommandResult<()> {
    let start = parser.reader.cursor();
    let value = parser.reader.read_int()?;
    let limit = match usize::try_from(value) {
        Ok(limit) if limit >= 1 => limit,
        _ => {
            parser.reader.set_cursor(start);
            return Err(LIMIT_TOO_SMALL.create_with_context(parser.reader));
        }
    };
    parser.max_results = limit;
    parser.limited = true;
    Ok(())
}

fn parse_sort(parser: &mut EntitySelectorParser<'_>) -> CommandResult<()> {
    let start = parser.reader.cursor();
    parser.set_suggestions(SelectorSuggestions::Sort);
    let name = parser.reader.read_unquoted_string();
    let Some(order) = SelectorOrder::by_name(&name) else {
        parser.reader.set_cursor(start);
        return Err(SORT_UNKNOWN.create_with_context(parser.reader, name));
    };
    parser.order = order;
    parser.sorted = true;
    Ok(())
}

fn parse_game_mode(parser: &mut EntitySelectorParser<'_>) -> CommandResult<()> {
    parser.set_suggestions(SelectorSuggestions::GameMode);
    let start = parser.reader.cursor();
    let invert = parser.should_invert_value();
    if parser.has_gamemode_not_equals && !invert {
        return inapplicable(parser, start, "gamemode");
    }
    let name = parser.reader.read_unquoted_string();
    let Some(mode) = GameMode::by_name(&name) else {
        parser.reader.set_cursor(start);
        return Err(GAME_MODE_UNKNOWN.create_with_context(parser.reader, name));
    };
    parser.includes_entities = false;
    parser.add_predicate(move |entity| {
        entity.is_player()
            && entity
                .game_mode()
                .is_some_and(|current| (current == mode) != invert)
    });
    if invert {
        parser.has_gamemode_not_equals = true;
    } else {
        parser.has_gamemode_equals = true;
    }
    Ok(())
}

fn parse_team(parser: &mut EntitySelectorParser<'_>) -> CommandResult<()> {
    let invert = parser.should_invert_value();
    let team = parser.reader.read_unquoted_string();
    parser.add_predicate(move |entity| {
        entity.is_living() && (entity.team().unwrap_or_default() == team) != invert
    });
    if invert {
        parser.has_team_not_equals = true;
    } else {
        parser.has_team_equals = true;
    }
    Ok(())
}

fn parse_type(parser: &mut EntitySelectorParser<'_>) -> CommandResult<()> {
    parser.set_suggestions(SelectorSuggestions::EntityType);
    let start = parser.reader.cursor();
    let invert = parser.should_invert_value();
    if parser.type_inverse && !invert {
        return inapplicable(parser, start, "type");
    }
    if invert {
        parser.type_inverse = true;
    }

    if parser.is_tag() {
        let tag = ResourceLocation::read(parser.reader)?;
        let members: IndexSet<ResourceLocation> =
            parser.entity_types().tag(&tag).cloned().unwrap_or_default();
        parser.add_predicate(move |entity| members.contains(&entity.entity_type()) != invert);
        return Ok(());
    }

    let kind = ResourceLocation::read(parser.reader)?;
    if !parser.entity_types().contains(&kind) {
        parser.reader.set_cursor(start);
        return Err(ENTITY_TYPE_INVALID.create_with_context(parser.reader, kind));
    }
    if kind == player_type() && !invert {
        parser.includes_entities = false;
    }
    let expected = kind.clone();
    parser.add_predicate(move |entity| (entity.entity_type() == expected) != invert);
    if !invert {
        parser.limit_to_type(kind);
    }
    Ok(())
}

fn parse_tag(parser: &mut EntitySelectorParser<'_>) -> CommandResult<()> {
    let invert = parser.should_invert_value();
    let tag = parser.reader.read_unquoted_string();
    parser.add_predicate(move |entity| {
        let tags = entity.tags();
        let found = if tag.is_empty() {
            tags.is_empty()
        } else {
            tags.contains(&tag)
        };
        found != invert
    });
    Ok(())
}

fn parse_scores(parser: &mut EntitySelectorParser<'_>) -> CommandResult<()> {
    let reader = &mut *parser.reader;
    let mut scores: IndexMap<String, IntBounds> = IndexMap::new();
    reader.expect('{')?;
    reader.skip_whitespace();
    while reader.can_read() && reader.peek() != Some('}') {
        reader.skip_whitespace();
        let objective = reader.read_unquoted_string();
        reader.skip_whitespace();
        reader.expect('=')?;
        reader.skip_whitespace();
        let bounds = IntBounds::read(reader)?;
        scores.insert(objective, bounds);
        reader.skip_whitespace();
        if reader.peek() == Some(',') {
            reader.skip();
        }
    }
    reader.expect('}')?;

    if !scores.is_empty() {
        parser.add_predicate(move |entity| {
            scores.iter().all(|(objective, bounds)| {
                entity
                    .score(objective)
                    .is_some_and(|value| bounds.matches(value))
            })
        });
    }
    parser.has_scores = true;
    Ok(())
}

enum AdvancementCheck {
    Done(ResourceLocation, bool),
    Criteria(ResourceLocation, IndexMap<String, bool>),
}

impl AdvancementCheck {
    fn matches(&self, entity: &dyn Entity) -> bool {
        match self {
            Self::Done(advancement, done) => entity.advancement_done(advancement) == Some(*done),
            Self::Criteria(advancement, criteria) => criteria.iter().all(|(criterion, done)| {
                entity.criterion_done(advancement, criterion) == Some(*done)
            }),
        }
    }
}

fn parse_advancements(parser: &mut EntitySelectorParser<'_>) -> CommandResult<()> {
    let reader = &mut *parser.reader;
    let mut checks = Vec::new();
    reader.expect('{')?;
    reader.skip_whitespace();
    while reader.can_read() && reader.peek() != Some('}') {
        reader.skip_whitespace();
        let advancement = ResourceLocation::read(reader)?;
        reader.skip_whitespace();
        reader.expect('=')?;
        reader.skip_whitespace();
        if reader.peek() == Some('{') {
            reader.skip();
            reader.skip_whitespace();
            let mut criteria = IndexMap::new();
            while reader.can_read() && reader.peek() != Some('}') {
                reader.skip_whitespace();
                let criterion = reader.read_unquoted_string();
                reader.skip_whitespace();
                reader.expect('=')?;
                reader.skip_whitespace();
                let done = reader.read_boolean()?;
                criteria.insert(criterion, done);
                reader.skip_whitespace();
                if reader.peek() == Some(',') {
                    reader.skip();
                }
            }
            reader.skip_whitespace();
            reader.expect('}')?;
            checks.push(AdvancementCheck::Criteria(advancement, criteria));
        } else {
            let done = reader.read_boolean()?;
            checks.push(AdvancementCheck::Done(advancement, done));
        }
        reader.skip_whitespace();
        if reader.peek() == Some(',') {
            reader.skip();
        }
    }
    reader.expect('}')?;

    if !checks.is_empty() {
        parser.add_predicate(move |entity| {
            entity.is_player() && checks.iter().all(|check| check.matches(entity))
        });
        parser.includes_entities = false;
    }
    parser.has_advancements = true;
    Ok(())
}

fn parse_predicate(parser: &mut EntitySelectorParser<'_>) -> CommandResult<()> {
    let invert = parser.should_invert_value();
    let predicate = ResourceLocation::read(parser.reader)?;
    parser.add_predicate(move |entity| entity.matches_predicate(&predicate) != invert);
    Ok(())
}
