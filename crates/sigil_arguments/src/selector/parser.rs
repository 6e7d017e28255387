//! The selector parser and its completion state machine.

use std::fmt;
use std::sync::Arc;

use sigil_dispatch::{SuggestionFuture, SuggestionsBuilder};
use sigil_foundation::{CommandResult, StringReader};
use tracing::trace;
use uuid::Uuid;

use super::entity_selector::{EntityPredicate, EntitySelector, PositionOverride, SelectorOrder};
use super::options::SelectorOptions;
use super::{
    EXPECTED_END_OF_OPTIONS, EXPECTED_OPTION_VALUE, INAPPLICABLE_OPTION, INVALID_NAME_OR_UUID,
    MAX_NAME_LENGTH, MAX_RESULTS, MISSING_SELECTOR_TYPE, SELECTORS_NOT_ALLOWED, UNKNOWN_OPTION,
    UNKNOWN_SELECTOR_TYPE,
};
use crate::bounds::{DoubleBounds, IntBounds, WrappedBounds};
use crate::entity_type::{EntityTypeRegistry, player_type};
use crate::game_mode::GameMode;
use crate::math::{Aabb, Vec3};
use crate::resource::ResourceLocation;
use crate::source::Entity;
use crate::suggest::{suggest, suggest_resource, suggest_resource_with_prefix};

/// What to complete at the point where parsing stopped.
#[derive(Clone, Default)]
pub enum SelectorSuggestions {
    /// Nothing to offer.
    #[default]
    Nothing,
    /// Player names and, if allowed, the `@` selectors.
    NameOrSelector,
    /// Player names, replacing the whole token.
    Name,
    /// The `@` selectors, replacing the `@`.
    Selector,
    /// `[`.
    OpenOptions,
    /// `]` and option keys.
    OptionsKeyOrClose,
    /// Option keys.
    OptionsKey,
    /// `,` and `]`.
    OptionsNextOrClose,
    /// `sort=` values.
    Sort,
    /// `gamemode=` values, negated or not.
    GameMode,
    /// `type=` ids and tags, negated or not.
    EntityType,
    /// A provider installed by a custom option.
    Custom(Arc<dyn Fn(&mut SuggestionsBuilder) + Send + Sync>),
}

impl fmt::Debug for SelectorSuggestions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Nothing => "Nothing",
            Self::NameOrSelector => "NameOrSelector",
            Self::Name => "Name",
            Self::Selector => "Selector",
            Self::OpenOptions => "OpenOptions",
            Self::OptionsKeyOrClose => "OptionsKeyOrClose",
            Self::OptionsKey => "OptionsKey",
            Self::OptionsNextOrClose => "OptionsNextOrClose",
            Self::Sort => "Sort",
            Self::GameMode => "GameMode",
            Self::EntityType => "EntityType",
            Self::Custom(_) => "Custom",
        };
        f.write_str(name)
    }
}

/// Parses a selector from a reader shared with the surrounding grammar.
///
/// The parser records what it was expecting when it stopped, so that after a
/// parse (successful or not) [`fill_suggestions`](Self::fill_suggestions)
/// can complete the input from exactly that point.
#[allow(clippy::struct_excessive_bools)]
pub struct EntitySelectorParser<'a> {
    pub(super) reader: &'a mut StringReader,
    allow_selectors: bool,
    options: &'a SelectorOptions,
    entity_types: &'a EntityTypeRegistry,
    pub(super) max_results: usize,
    pub(super) includes_entities: bool,
    pub(super) world_limited: bool,
    pub(super) distance: DoubleBounds,
    pub(super) level: IntBounds,
    pub(super) x: Option<f64>,
    pub(super) y: Option<f64>,
    pub(super) z: Option<f64>,
    pub(super) dx: Option<f64>,
    pub(super) dy: Option<f64>,
    pub(super) dz: Option<f64>,
    pub(super) x_rotation: WrappedBounds,
    pub(super) y_rotation: WrappedBounds,
    predicates: Vec<EntityPredicate>,
    pub(super) order: SelectorOrder,
    pub(super) current_entity: bool,
    player_name: Option<String>,
    start_position: usize,
    entity_uuid: Option<Uuid>,
    suggestions: SelectorSuggestions,
    pub(super) has_name_equals: bool,
    pub(super) has_name_not_equals: bool,
    pub(super) limited: bool,
    pub(super) sorted: bool,
    pub(super) has_gamemode_equals: bool,
    pub(super) has_gamemode_not_equals: bool,
    pub(super) has_team_equals: bool,
    pub(super) has_team_not_equals: bool,
    pub(super) type_limit: Option<ResourceLocation>,
    pub(super) type_inverse: bool,
    pub(super) has_scores: bool,
    pub(super) has_advancements: bool,
    uses_selector: bool,
}

impl<'a> EntitySelectorParser<'a> {
    /// Creates a parser with the standard options and vanilla entity types.
    pub fn new(reader: &'a mut StringReader, allow_selectors: bool) -> Self {
        Self::with_registries(
            reader,
            allow_selectors,
            SelectorOptions::standard_ref(),
            EntityTypeRegistry::vanilla_ref(),
        )
    }

    /// Creates a parser with custom option and entity type registries.
    pub fn with_registries(
        reader: &'a mut StringReader,
        allow_selectors: bool,
        options: &'a SelectorOptions,
        entity_types: &'a EntityTypeRegistry,
    ) -> Self {
        let start_position = reader.cursor();
        Self {
            reader,
            allow_selectors,
            options,
            entity_types,
            max_results: 0,
            includes_entities: false,
            world_limited: false,
            distance: DoubleBounds::ANY,
            level: IntBounds::ANY,
            x: None,
            y: None,
            z: None,
            dx: None,
            dy: None,
            dz: None,
            x_rotation: WrappedBounds::ANY,
            y_rotation: WrappedBounds::ANY,
            predicates: Vec::new(),
            order: SelectorOrder::Arbitrary,
            current_entity: false,
            player_name: None,
            start_position,
            entity_uuid: None,
            suggestions: SelectorSuggestions::Nothing,
            has_name_equals: false,
            has_name_not_equals: false,
            limited: false,
            sorted: false,
            has_gamemode_equals: false,
            has_gamemode_not_equals: false,
            has_team_equals: false,
            has_team_not_equals: false,
            type_limit: None,
            type_inverse: false,
            has_scores: false,
            has_advancements: false,
            uses_selector: false,
        }
    }

    /// Parses a selector starting at the reader's cursor.
    ///
    /// # Errors
    ///
    /// Returns a positioned syntax error for malformed selectors, unknown
    /// or inapplicable options and bad option values. The parser keeps its
    /// completion state either way.
    pub fn parse(&mut self) -> CommandResult<EntitySelector> {
        self.start_position = self.reader.cursor();
        self.suggestions = SelectorSuggestions::NameOrSelector;
        if self.reader.peek() == Some('@') {
            if !self.allow_selectors {
                return Err(SELECTORS_NOT_ALLOWED.create_with_context(self.reader));
            }
            self.reader.skip();
            self.parse_selector()?;
        } else {
            self.parse_name_or_uuid()?;
        }
        self.finalize_predicates();
        let selector = self.selector();
        trace!(?selector, "parsed entity selector");
        Ok(selector)
    }

    fn parse_selector(&mut self) -> CommandResult<()> {
        self.uses_selector = true;
        self.suggestions = SelectorSuggestions::Selector;
        let start = self.reader.cursor();
        let Some(kind) = self.reader.read() else {
            return Err(MISSING_SELECTOR_TYPE.create_with_context(self.reader));
        };
        match kind {
            'p' => {
                self.max_results = 1;
                self.includes_entities = false;
                self.order = SelectorOrder::Nearest;
                self.limit_to_type(player_type());
            }
            'a' => {
                self.max_results = MAX_RESULTS;
                self.includes_entities = false;
                self.order = SelectorOrder::Arbitrary;
                self.limit_to_type(player_type());
            }
            'r' => {
                self.max_results = 1;
                self.includes_entities = false;
                self.order = SelectorOrder::Random;
                self.limit_to_type(player_type());
            }
            's' => {
                self.max_results = 1;
                self.includes_entities = true;
                self.current_entity = true;
            }
            'e' => {
                self.max_results = MAX_RESULTS;
                self.includes_entities = true;
                self.order = SelectorOrder::Arbitrary;
                self.add_predicate(|entity| entity.is_alive());
            }
            other => {
                self.reader.set_cursor(start);
                return Err(UNKNOWN_SELECTOR_TYPE.create_with_context(self.reader, format!("@{other}")));
            }
        }

        self.suggestions = SelectorSuggestions::OpenOptions;
        if self.reader.peek() == Some('[') {
            self.reader.skip();
            self.suggestions = SelectorSuggestions::OptionsKeyOrClose;
            self.parse_options()?;
        }
        Ok(())
    }

    fn parse_name_or_uuid(&mut self) -> CommandResult<()> {
        if self.reader.can_read() {
            self.suggestions = SelectorSuggestions::Name;
        }
        let start = self.reader.cursor();
        let token = self.reader.read_string()?;
        if let Ok(uuid) = Uuid::parse_str(&token) {
            self.entity_uuid = Some(uuid);
            self.includes_entities = true;
        } else if token.is_empty() || token.chars().count() > MAX_NAME_LENGTH {
            self.reader.set_cursor(start);
            return Err(INVALID_NAME_OR_UUID.create_with_context(self.reader));
        } else {
            self.player_name = Some(token);
            self.includes_entities = false;
        }
        self.max_results = 1;
        Ok(())
    }

    fn parse_options(&mut self) -> CommandResult<()> {
        self.suggestions = SelectorSuggestions::OptionsKey;
        self.reader.skip_whitespace();
        loop {
            if self.reader.can_read() && self.reader.peek() != Some(']') {
                self.reader.skip_whitespace();
                let start = self.reader.cursor();
                let key = self.reader.read_string()?;
                let options = self.options;
                let Some(option) = options.get(&key) else {
                    self.reader.set_cursor(start);
                    return Err(UNKNOWN_OPTION.create_with_context(self.reader, key));
                };
                if !option.is_applicable(self) {
                    return Err(INAPPLICABLE_OPTION.create_with_context(self.reader, key));
                }

                self.reader.skip_whitespace();
                if self.reader.peek() != Some('=') {
                    self.reader.set_cursor(start);
                    return Err(EXPECTED_OPTION_VALUE.create_with_context(self.reader, key));
                }
                self.reader.skip();
                self.reader.skip_whitespace();
                self.suggestions = SelectorSuggestions::Nothing;
                option.handle(self)?;
                self.reader.skip_whitespace();
                self.suggestions = SelectorSuggestions::OptionsNextOrClose;

                match self.reader.peek() {
                    None => continue,
                    Some(',') => {
                        self.reader.skip();
                        self.suggestions = SelectorSuggestions::OptionsKey;
                        continue;
                    }
                    Some(']') => {}
                    Some(_) => return Err(EXPECTED_END_OF_OPTIONS.create_with_context(self.reader)),
                }
            }

            if self.reader.can_read() {
                self.reader.skip();
                self.suggestions = SelectorSuggestions::Nothing;
                return Ok(());
            }
            return Err(EXPECTED_END_OF_OPTIONS.create_with_context(self.reader));
        }
    }

    fn finalize_predicates(&mut self) {
        if !self.x_rotation.is_any() {
            let bounds = self.x_rotation;
            self.add_predicate(move |entity| bounds.matches(entity.rotation().x));
        }
        if !self.y_rotation.is_any() {
            let bounds = self.y_rotation;
            self.add_predicate(move |entity| bounds.matches(entity.rotation().y));
        }
        if !self.level.is_any() {
            let bounds = self.level;
            self.add_predicate(move |entity| {
                entity.is_player() && entity.experience_level().is_some_and(|level| bounds.matches(level))
            });
        }
    }

    fn selector(&self) -> EntitySelector {
        let aabb = if self.dx.is_none() && self.dy.is_none() && self.dz.is_none() {
            self.distance.max.map(|max| {
                Aabb::new(
                    Vec3::new(-max, -max, -max),
                    Vec3::new(max + 1.0, max + 1.0, max + 1.0),
                )
            })
        } else {
            Some(volume(
                self.dx.unwrap_or(0.0),
                self.dy.unwrap_or(0.0),
                self.dz.unwrap_or(0.0),
            ))
        };
        EntitySelector {
            max_results: self.max_results,
            includes_entities: self.includes_entities,
            world_limited: self.world_limited,
            predicates: self.predicates.clone(),
            distance: self.distance,
            position: PositionOverride {
                x: self.x,
                y: self.y,
                z: self.z,
            },
            aabb,
            order: self.order,
            current_entity: self.current_entity,
            player_name: self.player_name.clone(),
            entity_uuid: self.entity_uuid,
            type_limit: self.type_limit.clone(),
            uses_selector: self.uses_selector,
        }
    }

    // ==================== Option handler API ====================

    /// The reader being parsed.
    pub fn reader(&mut self) -> &mut StringReader {
        &mut *self.reader
    }

    /// Current reader position.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.reader.cursor()
    }

    /// Known entity types and tags.
    #[must_use]
    pub fn entity_types(&self) -> &'a EntityTypeRegistry {
        self.entity_types
    }

    /// Adds a term to the selector's filter.
    pub fn add_predicate<F>(&mut self, predicate: F)
    where
        F: Fn(&dyn Entity) -> bool + Send + Sync + 'static,
    {
        self.predicates.push(Arc::new(predicate));
    }

    /// Sets what completion offers at the current position.
    pub fn set_suggestions(&mut self, suggestions: SelectorSuggestions) {
        self.suggestions = suggestions;
    }

    /// Consumes a leading `!` and returns true if there was one.
    pub fn should_invert_value(&mut self) -> bool {
        self.consume_marker('!')
    }

    /// Consumes a leading `#` and returns true if there was one.
    pub fn is_tag(&mut self) -> bool {
        self.consume_marker('#')
    }

    fn consume_marker(&mut self, marker: char) -> bool {
        self.reader.skip_whitespace();
        if self.reader.peek() == Some(marker) {
            self.reader.skip();
            self.reader.skip_whitespace();
            true
        } else {
            false
        }
    }

    /// Restricts candidates to one entity type.
    pub fn limit_to_type(&mut self, kind: ResourceLocation) {
        self.type_limit = Some(kind);
    }

    /// Maximum number of results so far.
    #[must_use]
    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Overrides the maximum number of results.
    pub fn set_max_results(&mut self, max_results: usize) {
        self.max_results = max_results;
    }

    /// Returns false if only players can match so far.
    #[must_use]
    pub fn includes_entities(&self) -> bool {
        self.includes_entities
    }

    /// Sets whether non-players can match.
    pub fn set_includes_entities(&mut self, includes_entities: bool) {
        self.includes_entities = includes_entities;
    }

    /// Restricts the search to the source's world.
    pub fn set_world_limited(&mut self) {
        self.world_limited = true;
    }

    /// Returns true for `@s`.
    #[must_use]
    pub fn is_current_entity(&self) -> bool {
        self.current_entity
    }

    /// Returns true once an `@` selector has been read.
    #[must_use]
    pub fn uses_selector(&self) -> bool {
        self.uses_selector
    }

    // ==================== Completion ====================

    /// Completes the input from where parsing stopped.
    ///
    /// `names` adds the candidate player and entity names.
    pub fn fill_suggestions<F>(&self, builder: &SuggestionsBuilder, names: F) -> SuggestionFuture
    where
        F: Fn(&mut SuggestionsBuilder),
    {
        let mut builder = builder.create_offset(self.reader.cursor());
        match &self.suggestions {
            SelectorSuggestions::Nothing => {}
            SelectorSuggestions::NameOrSelector => {
                names(&mut builder);
                if self.allow_selectors {
                    fill_selectors(&mut builder);
                }
            }
            SelectorSuggestions::Name => {
                let mut offset = builder.create_offset(self.start_position);
                names(&mut offset);
                builder.add(&offset);
            }
            SelectorSuggestions::Selector => {
                let mut offset = builder.create_offset(builder.start().saturating_sub(1));
                fill_selectors(&mut offset);
                builder.add(&offset);
            }
            SelectorSuggestions::OpenOptions => {
                builder.suggest("[");
            }
            SelectorSuggestions::OptionsKeyOrClose => {
                builder.suggest("]");
                self.options.suggest_names(self, &mut builder);
            }
            SelectorSuggestions::OptionsKey => {
                self.options.suggest_names(self, &mut builder);
            }
            SelectorSuggestions::OptionsNextOrClose => {
                builder.suggest(",");
                builder.suggest("]");
            }
            SelectorSuggestions::Sort => {
                suggest(SelectorOrder::ALL.iter().map(|order| order.name()), &mut builder);
            }
            SelectorSuggestions::GameMode => self.suggest_game_modes(&mut builder),
            SelectorSuggestions::EntityType => self.suggest_entity_types(&mut builder),
            SelectorSuggestions::Custom(provider) => provider(&mut builder),
        }
        builder.build_future()
    }

    fn suggest_game_modes(&self, builder: &mut SuggestionsBuilder) {
        let mut remaining = builder.remaining_lowercase().to_string();
        let mut positive = !self.has_gamemode_not_equals;
        let mut negated = true;
        if !remaining.is_empty() {
            if let Some(rest) = remaining.strip_prefix('!') {
                positive = false;
                remaining = rest.to_string();
            } else {
                negated = false;
            }
        }
        for mode in GameMode::ALL {
            if mode.name().starts_with(&remaining) {
                if negated {
                    builder.suggest(format!("!{}", mode.name()));
                }
                if positive {
                    builder.suggest(mode.name());
                }
            }
        }
    }

    fn suggest_entity_types(&self, builder: &mut SuggestionsBuilder) {
        let types = self.entity_types;
        suggest_resource_with_prefix(types.types(), builder, "!");
        suggest_resource_with_prefix(types.tag_names(), builder, "!#");
        if !self.type_inverse {
            suggest_resource(types.types(), builder);
            suggest_resource_with_prefix(types.tag_names(), builder, "#");
        }
    }
}

fn fill_selectors(builder: &mut SuggestionsBuilder) {
    builder.suggest_with_tooltip("@p", "Nearest player");
    builder.suggest_with_tooltip("@a", "All players");
    builder.suggest_with_tooltip("@r", "Random player");
    builder.suggest_with_tooltip("@s", "Current entity");
    builder.suggest_with_tooltip("@e", "All entities");
}

/// Box spanning a block-aligned volume from the origin by the given deltas.
fn volume(dx: f64, dy: f64, dz: f64) -> Aabb {
    let low = |delta: f64| if delta < 0.0 { delta } else { 0.0 };
    let high = |delta: f64| if delta < 0.0 { 1.0 } else { delta + 1.0 };
    Aabb::new(
        Vec3::new(low(dx), low(dy), low(dz)),
        Vec3::new(high(dx), high(dy), high(dz)),
    )
}

impl fmt::Debug for EntitySelectorParser<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntitySelectorParser")
            .field("cursor", &self.reader.cursor())
            .field("start_position", &self.start_position)
            .field("allow_selectors", &self.allow_selectors)
            .field("uses_selector", &self.uses_selector)
            .field("suggestions", &self.suggestions)
            .finish_non_exhaustive()
    }
}
